use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2025-10-06 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "calcz", bin_name = "calcz", version = get_version())]
#[command(about = "Interactive calculator with undoable, persistent history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding logs, history and config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Do not save history after every change
    #[arg(long, global = true)]
    pub no_auto_save: bool,

    /// Fractional digits results are rounded to
    #[arg(long, global = true, value_name = "DIGITS")]
    pub precision: Option<u32>,

    /// Maximum number of calculations kept in history
    #[arg(long, global = true, value_name = "N")]
    pub max_history: Option<usize>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the interactive calculator (default)
    Repl,

    /// Evaluate one operation and record it in history
    #[command(alias = "e")]
    Eval {
        /// Operation name (e.g. add, power, int_divide)
        operation: String,

        /// First operand
        #[arg(allow_hyphen_values = true)]
        a: String,

        /// Second operand
        #[arg(allow_hyphen_values = true)]
        b: String,
    },

    /// Show the saved calculation history
    #[command(alias = "h")]
    History,

    /// List available operations
    Ops,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_repl() {
        let cli = Cli::try_parse_from(["calcz"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_auto_save);
    }

    #[test]
    fn eval_accepts_negative_operands() {
        let cli = Cli::try_parse_from(["calcz", "eval", "subtract", "-3", "-4.5"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Eval {
                operation: "subtract".into(),
                a: "-3".into(),
                b: "-4.5".into(),
            })
        );
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "calcz",
            "history",
            "--base-dir",
            "/tmp/calc",
            "--precision",
            "4",
            "--max-history",
            "10",
            "--no-auto-save",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::History));
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/calc")));
        assert_eq!(cli.precision, Some(4));
        assert_eq!(cli.max_history, Some(10));
        assert!(cli.no_auto_save);
    }

    #[test]
    fn eval_requires_two_operands() {
        assert!(Cli::try_parse_from(["calcz", "eval", "add", "1"]).is_err());
    }
}
