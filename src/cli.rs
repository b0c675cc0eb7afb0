//! Command-line interface definition.

use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_SETTINGS_FILE};
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};

/// cssguard - Bidirectional CSS/HTML class validator
///
/// Learns the class vocabulary of your stylesheets, then reports classes used in
/// markup that no stylesheet defines (orphans) and, in direct mode, classes that
/// stylesheets define but nothing uses.
#[derive(Parser, Debug)]
#[command(name = "cssguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Tool settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: Utf8PathBuf,

    /// Also write daily-rotated log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<Utf8PathBuf>,

    /// Write log files as JSON lines
    #[arg(long, global = true, requires = "log_dir")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Learn patterns from CSS files and save a trained config
    Train(TrainArgs),

    /// Validate HTML classes against a trained config
    Validate(ValidateArgs),

    /// Compare HTML classes against CSS classes without training
    Direct(DirectArgs),

    /// Find classes defined by more than one stylesheet
    Redundancy(RedundancyArgs),

    /// Write the effective settings to the settings file
    Init(InitArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// CSS files or directories (comma-separated)
    #[arg(long, required = true, value_delimiter = ',')]
    pub css: Vec<Utf8PathBuf>,

    /// Where to write the trained config
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: Utf8PathBuf,

    /// Classes to always accept, e.g. JS hooks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

/// Source scanning options shared by `validate` and `direct`.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Source directory or file to scan for class tokens (repeatable)
    #[arg(long = "src", action = ArgAction::Append, value_delimiter = ',')]
    pub src: Vec<Utf8PathBuf>,

    /// Source file extensions (default: .js,.ts,.jsx,.tsx,.astro,.vue,.svelte,.md,.mdx)
    #[arg(long = "src-ext", value_delimiter = ',')]
    pub src_ext: Vec<String>,

    /// Directories to exclude (default: node_modules,dist,.next,build,.git,.svelte-kit,.nuxt)
    #[arg(long = "src-exclude", value_delimiter = ',')]
    pub src_exclude: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// HTML directory (or file) to scan
    #[arg(long)]
    pub html: Utf8PathBuf,

    /// Trained config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: Utf8PathBuf,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 if orphans are found
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub fail: bool,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DirectArgs {
    /// HTML directory (or file) to scan
    #[arg(long)]
    pub html: Utf8PathBuf,

    /// CSS files or directories (comma-separated)
    #[arg(long, required = true, value_delimiter = ',')]
    pub css: Vec<Utf8PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 if orphans are found
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub fail: bool,

    /// List unused CSS classes
    #[arg(long)]
    pub unused: bool,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RedundancyArgs {
    /// CSS files to compare (comma-separated, at least two)
    #[arg(long, required = true, value_delimiter = ',')]
    pub css: Vec<Utf8PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Coverage percentage at which a file is reported as removable
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_train() {
        let cli = Cli::try_parse_from([
            "cssguard", "train", "--css", "a.css,b.css", "--ignore", "js-a,js-b",
        ])
        .unwrap();

        let Commands::Train(args) = cli.command else {
            panic!("expected train");
        };
        assert_eq!(args.css, vec![Utf8PathBuf::from("a.css"), Utf8PathBuf::from("b.css")]);
        assert_eq!(args.output, Utf8PathBuf::from("cssguard.json"));
        assert_eq!(args.ignore, vec!["js-a", "js-b"]);
    }

    #[test]
    fn test_parse_validate_defaults_and_fail_flag() {
        let cli = Cli::try_parse_from(["cssguard", "validate", "--html", "site"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert!(args.fail);
        assert!(!args.json);
        assert_eq!(args.config, Utf8PathBuf::from("cssguard.json"));

        let cli = Cli::try_parse_from([
            "cssguard", "validate", "--html", "site", "--fail", "false", "--src", "src",
            "--src", "components", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert!(!args.fail);
        assert_eq!(args.sources.src.len(), 2);
    }

    #[test]
    fn test_parse_init_with_settings_path() {
        let cli =
            Cli::try_parse_from(["cssguard", "init", "--force", "--settings", "conf/cg.yaml"])
                .unwrap();

        assert_eq!(cli.settings, Utf8PathBuf::from("conf/cg.yaml"));
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert!(args.force);
    }

    #[test]
    fn test_missing_required_argument() {
        let err = Cli::try_parse_from(["cssguard", "direct", "--html", "site"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["cssguard", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
