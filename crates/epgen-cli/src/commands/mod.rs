//! CLI command implementations

pub mod doctor;
pub mod gen_src;
pub mod generate;

mod reporting;
