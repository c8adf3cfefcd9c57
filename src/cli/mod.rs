//! CLI argument parsing

mod engine;
mod get;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::defaults;

pub use engine::{ApplyArgs, ImportArgs, ManifestArgs};
pub use get::{GetResource, GroupArgs, GroupsArgs, OutputArgs, PageArgs, RenderersArgs};

/// Declarative management of Wiki.js instances
#[derive(Parser, Debug)]
#[command(name = "wikictl")]
#[command(version)]
#[command(about = "Plan, apply and inspect Wiki.js configuration", long_about = None)]
pub struct Cli {
    /// Wiki.js site URL (e.g. https://wiki.example.com)
    #[arg(short = 's', long, global = true)]
    pub site: Option<String>,

    /// API key (overrides env vars and credentials file)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Login email for the local strategy
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Login password for the local strategy
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no prompts, no spinners
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit the header row in table and CSV output
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the changes apply would make
    Plan(ManifestArgs),

    /// Create, update or delete resources to match the manifest
    Apply(ApplyArgs),

    /// Re-read every resource in the state file
    Refresh(ManifestArgs),

    /// Delete (or forget) every resource in the state file
    Destroy(ApplyArgs),

    /// Adopt an existing page or group into the state file
    Import(ImportArgs),

    /// Read resources from the site
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wikictl", "plan"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(cli.site.is_none());
        assert!(!cli.batch);
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.file, defaults::MANIFEST_FILE);
                assert_eq!(args.state, defaults::STATE_FILE);
            }
            other => panic!("Expected plan, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "wikictl",
            "apply",
            "--site",
            "https://wiki.example.com",
            "--batch",
            "-y",
        ]);
        assert_eq!(cli.site.as_deref(), Some("https://wiki.example.com"));
        assert!(cli.batch);
        match cli.command {
            Command::Apply(args) => assert!(args.auto_approve),
            other => panic!("Expected apply, got {:?}", other),
        }
    }

    #[test]
    fn test_import_args() {
        let cli = Cli::parse_from(["wikictl", "import", "page.home", "12"]);
        match cli.command {
            Command::Import(args) => {
                assert_eq!(args.address, "page.home");
                assert_eq!(args.id, 12);
            }
            other => panic!("Expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_get_page_by_path() {
        let cli = Cli::parse_from([
            "wikictl", "get", "page", "--path", "docs/intro", "--locale", "de", "-o", "json",
        ]);
        match cli.command {
            Command::Get {
                resource: GetResource::Page(args),
            } => {
                assert_eq!(args.path.as_deref(), Some("docs/intro"));
                assert_eq!(args.locale, "de");
                assert_eq!(args.output.output, OutputFormat::Json);
            }
            other => panic!("Expected get page, got {:?}", other),
        }
    }

    #[test]
    fn test_get_page_id_conflicts_with_path() {
        let result = Cli::try_parse_from(["wikictl", "get", "page", "3", "--path", "x"]);
        assert!(result.is_err());
    }
}
