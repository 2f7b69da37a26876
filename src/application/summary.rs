use std::path::Path;

use colored::Colorize;

use crate::ext::PathDisplayExt;
use crate::materializer::MaterializeReport;

pub fn print_summary(root: &Path, report: &MaterializeReport) {
    println!(
        "{} {}",
        "Materialized structure in".green().bold(),
        root.display_best_effort()
    );
    for name in &report.top_level {
        println!("  {} {}", "+".green(), name);
    }
    println!("{}", format_counts(report).dimmed());
}

fn format_counts(report: &MaterializeReport) -> String {
    format!(
        "{} directories, {} files, {} placeholders",
        report.directories, report.files, report.placeholders
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_listed_in_order() {
        let report = MaterializeReport {
            top_level: vec!["a".into()],
            directories: 3,
            files: 2,
            placeholders: 1,
        };
        assert_eq!(
            format_counts(&report),
            "3 directories, 2 files, 1 placeholders"
        );
    }
}
