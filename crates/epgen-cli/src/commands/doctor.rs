//! Doctor command implementation
//!
//! Checks that the generator can be found and shows the resolved project
//! layout.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use epgen_generator::{CommandGenerator, GeneratorError};
use epgen_spec::{ProjectConfig, CONFIG_FILE_NAME};

use crate::project;

/// Run the doctor command
///
/// # Returns
/// Exit code: 0 if the generator was found, 1 otherwise
pub fn run(config: &ProjectConfig) -> Result<ExitCode> {
    run_with(config, &project::generator(config))
}

/// Like [`run`], checking the given generator.
pub fn run_with(config: &ProjectConfig, generator: &CommandGenerator) -> Result<ExitCode> {
    println!("{}", "epgen Doctor".cyan().bold());
    println!("{}", "============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!("  {} epgen v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    println!();

    let mut all_ok = true;

    println!("{}", "Generator:".bold());
    match generator.find_program() {
        Ok((path, source)) => {
            println!(
                "  {} {} (from {})",
                "ok".green(),
                path.display(),
                source.as_str()
            );
        }
        Err(GeneratorError::NotFound { program }) => {
            println!("  {} {} not found", "!!".red(), program);
            println!(
                "     {}",
                "Set generator.command in epgen.json, EPGEN_TOOL_PATH, or add it to PATH.".dimmed()
            );
            all_ok = false;
        }
        Err(e) => {
            println!("  {} generator check failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Project:".bold());
    let config_file = config.project_dir().join(CONFIG_FILE_NAME);
    if config_file.is_file() {
        println!("  {} {}", "ok".green(), config_file.display());
    } else {
        println!(
            "  {} {} not found, using defaults",
            "--".yellow(),
            CONFIG_FILE_NAME
        );
    }
    let dirs = [
        ("classes", config.classes_dir()),
        ("webapp", config.webapp_dir()),
        ("discovery docs", config.discovery_doc_dir()),
        ("openapi docs", config.openapi_doc_dir()),
        ("client libs", config.client_lib_dir()),
        ("generated sources", config.generated_src_dir()),
    ];
    for (label, dir) in dirs {
        println!("  {} {:<18} {}", "->".green(), label, dir.display());
    }
    println!();

    if all_ok {
        println!("{}", "All checks passed.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed.".red().bold());
        Ok(ExitCode::from(1))
    }
}
