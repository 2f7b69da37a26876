use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Create a directory tree from a YAML description")]
pub struct Cli {
    /// YAML file describing the directories and files to create
    pub description: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The directory the tree is created in
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Continue past failing entries and report all of them at the end
    #[clap(long, short)]
    pub keep_going: bool,

    /// Worker threads; more than one materializes sibling directories in parallel
    #[clap(long, short, default_value = "1")]
    pub jobs: NonZeroUsize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sequential_run_in_current_dir() {
        let cli = Cli::try_parse_from(["sprout", "layout.yaml"]).unwrap();
        assert_eq!(cli.description, PathBuf::from("layout.yaml"));
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.jobs.get(), 1);
        assert!(!cli.keep_going);
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "sprout",
            "layout.yaml",
            "--root",
            "out",
            "--keep-going",
            "-j",
            "4",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("out"));
        assert!(cli.keep_going);
        assert_eq!(cli.jobs.get(), 4);
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(Cli::try_parse_from(["sprout", "layout.yaml", "--jobs", "0"]).is_err());
    }

    #[test]
    fn requires_a_description() {
        assert!(Cli::try_parse_from(["sprout"]).is_err());
    }
}
