//! Human-readable command output.

use colored::Colorize;
use epgen_generator::{GoalReport, PipelineReport};

pub(crate) fn print_goal_report(report: &GoalReport) {
    println!(
        "{} {} -> {}",
        "ok".green(),
        report.action.as_str().bold(),
        report.output_dir.display()
    );
    if report.artifacts.is_empty() {
        println!("   {}", "generator produced no matching files".yellow());
    }
    for artifact in &report.artifacts {
        println!("   {} {}", "->".green(), artifact.display());
    }
}

pub(crate) fn print_pipeline_report(report: &PipelineReport) {
    println!(
        "{} {} -> {}",
        "ok".green(),
        "gen-client-lib".bold(),
        report.source_root.display()
    );
    for archive in &report.archives {
        println!(
            "   {} {} ({} written, {} already present)",
            "->".green(),
            archive.name,
            archive.summary.written.len(),
            archive.summary.skipped.len()
        );
    }
    println!(
        "   {}",
        format!("source root: {}", report.source_root.display()).dimmed()
    );
}
