//! @dose
//! purpose: This module defines the command-line interface for tokenpress using the clap derive
//!     macros. It specifies all commands (extract, convert, export, login, publish, watch, host)
//!     and their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - Token input and publish flags are shared through flattened option structs
//!
//! invariants:
//!     - PathBuf is used for all file/directory path arguments
//!     - Unset optional flags fall back to tokenpress.toml, never to hard-coded values here
//!
//! gotchas:
//!     - `-f` accepts repeated flags and comma lists: `-f css,swift -f dart`
//!     - The token falls back to GITHUB_TOKEN in the command layer, not in clap

use crate::types::Format;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tokenpress")]
#[command(author, version, about = "Design token extractor and multi-platform code generator")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract design tokens from a document snapshot
    Extract(ExtractArgs),

    /// Generate platform code from tokens
    Convert(ConvertArgs),

    /// Copy generated code for all formats to the clipboard
    Export(ExportArgs),

    /// Verify a GitHub token and optionally a repository
    Login(LoginArgs),

    /// Generate platform code and push it to GitHub
    Publish(PublishArgs),

    /// Watch a token file and regenerate on change
    Watch(WatchArgs),

    /// Serve host messages over stdin/stdout
    Host(HostArgs),
}

/// Where tokens come from and which formats to generate
#[derive(Args, Clone, Default)]
pub struct InputOptions {
    /// Token JSON file, or a document snapshot with --document
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Treat INPUT as a document snapshot and extract tokens from it first
    #[arg(long)]
    pub document: bool,

    /// Output format (css, swift, kotlin, dart); repeatable
    #[arg(short, long = "format", value_name = "FORMAT", value_delimiter = ',')]
    pub formats: Vec<Format>,

    /// Name of the generated struct/object/class
    #[arg(long)]
    pub type_name: Option<String>,

    /// Don't seed default colors/spacing when extracting from a document
    #[arg(long)]
    pub no_fallback: bool,
}

/// GitHub destination
#[derive(Args, Clone, Default)]
pub struct PublishOptions {
    /// Repository URL or owner/name
    #[arg(long)]
    pub repo: Option<String>,

    /// Target branch (defaults to the repository's default branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit message prefix
    #[arg(short, long)]
    pub message: Option<String>,

    /// Remote directory for generated files
    #[arg(long)]
    pub directory: Option<String>,

    /// GitHub personal access token (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Document snapshot (JSON)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Write the token JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't seed default colors/spacing
    #[arg(long)]
    pub no_fallback: bool,
}

#[derive(Args, Default)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Output directory (defaults to output_dir from tokenpress.toml)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Dry run - print what would be written without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Also push the generated files to GitHub
    #[arg(long)]
    pub push: bool,

    #[command(flatten)]
    pub publish: PublishOptions,
}

#[derive(Args, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Print the bundle instead of copying it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args, Default)]
pub struct LoginArgs {
    /// GitHub personal access token (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Repository URL or owner/name to check
    #[arg(long)]
    pub repo: Option<String>,
}

#[derive(Args, Default)]
pub struct PublishArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub publish: PublishOptions,
}

#[derive(Args, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Output directory (defaults to output_dir from tokenpress.toml)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Debounce delay in milliseconds
    #[arg(long, default_value_t = 100)]
    pub debounce: u64,

    /// Clear screen before each update
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args, Default)]
pub struct HostArgs {
    /// Document snapshot (JSON) to extract from
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Don't seed default colors/spacing
    #[arg(long)]
    pub no_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from(["tokenpress", "extract", "doc.json"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("Expected Extract")
        };
        assert_eq!(args.document, PathBuf::from("doc.json"));
        assert!(args.output.is_none());
        assert!(!args.no_fallback);

        let cli = Cli::try_parse_from([
            "tokenpress",
            "extract",
            "doc.json",
            "-o",
            "tokens.json",
            "--no-fallback",
        ])
        .unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("Expected Extract")
        };
        assert_eq!(args.output, Some(PathBuf::from("tokens.json")));
        assert!(args.no_fallback);
    }

    /// Comprehensive test for convert command and all its options
    #[test]
    fn test_parse_convert() {
        // Default values
        let cli = Cli::try_parse_from(["tokenpress", "convert", "tokens.json"]).unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("Expected Convert")
        };
        assert_eq!(args.input.input, PathBuf::from("tokens.json"));
        assert!(args.input.formats.is_empty());
        assert!(!args.input.document);
        assert!(args.out_dir.is_none());
        assert!(!args.dry_run);
        assert!(!args.push);

        // Formats: repeated, comma separated, aliases
        let cli = Cli::try_parse_from([
            "tokenpress",
            "convert",
            "tokens.json",
            "-f",
            "css,swiftui",
            "--format",
            "kt",
        ])
        .unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("Expected Convert")
        };
        assert_eq!(
            args.input.formats,
            vec![Format::Css, Format::Swift, Format::Kotlin]
        );

        // Document input, output dir, dry run, push with publish flags
        let cli = Cli::try_parse_from([
            "tokenpress",
            "convert",
            "doc.json",
            "--document",
            "-o",
            "out",
            "--dry-run",
            "--push",
            "--repo",
            "acme/app",
            "--branch",
            "design",
            "-m",
            "Sync",
        ])
        .unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("Expected Convert")
        };
        assert!(args.input.document);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert!(args.dry_run);
        assert!(args.push);
        assert_eq!(args.publish.repo.as_deref(), Some("acme/app"));
        assert_eq!(args.publish.branch.as_deref(), Some("design"));
        assert_eq!(args.publish.message.as_deref(), Some("Sync"));
    }

    #[test]
    fn test_parse_export() {
        let cli =
            Cli::try_parse_from(["tokenpress", "export", "tokens.json", "--stdout", "-f", "dart"])
                .unwrap();
        let Commands::Export(args) = cli.command else {
            panic!("Expected Export")
        };
        assert!(args.stdout);
        assert_eq!(args.input.formats, vec![Format::Dart]);
    }

    #[test]
    fn test_parse_login_and_publish() {
        let cli = Cli::try_parse_from(["tokenpress", "login", "--token", "ghp_x"]).unwrap();
        let Commands::Login(args) = cli.command else {
            panic!("Expected Login")
        };
        assert_eq!(args.token.as_deref(), Some("ghp_x"));
        assert!(args.repo.is_none());

        let cli = Cli::try_parse_from([
            "tokenpress",
            "publish",
            "tokens.json",
            "--repo",
            "https://github.com/acme/app",
            "--directory",
            "tokens",
        ])
        .unwrap();
        let Commands::Publish(args) = cli.command else {
            panic!("Expected Publish")
        };
        assert_eq!(
            args.publish.repo.as_deref(),
            Some("https://github.com/acme/app")
        );
        assert_eq!(args.publish.directory.as_deref(), Some("tokens"));
        assert!(args.publish.token.is_none());
    }

    /// Comprehensive test for watch command and all its options
    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from(["tokenpress", "watch", "tokens.json"]).unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("Expected Watch")
        };
        assert_eq!(args.debounce, 100);
        assert!(!args.clear);

        let cli = Cli::try_parse_from([
            "tokenpress",
            "watch",
            "tokens.json",
            "--debounce",
            "200",
            "--clear",
        ])
        .unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("Expected Watch")
        };
        assert_eq!(args.debounce, 200);
        assert!(args.clear);
    }

    /// Test global flags (-v, --verbose, -r, --root)
    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["tokenpress", "-v", "host", "doc.json"]).unwrap();
        assert!(cli.verbose);

        let cli =
            Cli::try_parse_from(["tokenpress", "-r", "/tmp/project", "convert", "t.json"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/project")));

        // Flags after command
        let cli = Cli::try_parse_from(["tokenpress", "extract", "doc.json", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_error_cases() {
        assert!(Cli::try_parse_from(["tokenpress"]).is_err()); // Missing command
        assert!(Cli::try_parse_from(["tokenpress", "invalid"]).is_err());
        assert!(Cli::try_parse_from(["tokenpress", "convert"]).is_err()); // Missing input
        assert!(Cli::try_parse_from(["tokenpress", "convert", "t.json", "-f", "yaml"]).is_err());
        assert!(Cli::try_parse_from(["tokenpress", "watch", "t.json", "--debounce", "soon"]).is_err());
    }

    #[test]
    fn test_help_output() {
        let mut cmd = Cli::command();
        let help = format!("{}", cmd.render_help());
        for command in ["extract", "convert", "export", "login", "publish", "watch", "host"] {
            assert!(help.contains(command), "missing {}", command);
        }
    }
}
