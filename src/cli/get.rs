//! Get command resource definitions and arguments

use clap::{Args, Parser, Subcommand};

use super::OutputFormat;

/// Resource types for the 'get' command
#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// Get the site configuration
    #[command(visible_alias = "site")]
    SiteConfig(OutputArgs),

    /// Get a page by id, or by path and locale
    Page(PageArgs),

    /// Get a single group with permissions and page rules
    Group(GroupArgs),

    /// List groups
    Groups(GroupsArgs),

    /// Get whether API access is enabled
    Api(OutputArgs),

    /// List API keys
    #[command(visible_alias = "api-key")]
    ApiKeys(OutputArgs),

    /// List configured authentication strategies
    #[command(visible_alias = "auth")]
    AuthStrategies(OutputArgs),

    /// Get the theme configuration
    #[command(visible_alias = "theme")]
    ThemeConfig(OutputArgs),

    /// List installed themes
    Themes(OutputArgs),

    /// List renderers
    Renderers(RenderersArgs),

    /// List search engines
    SearchEngines(OutputArgs),

    /// Get the localization configuration and available locales
    #[command(visible_alias = "locales")]
    Localization(OutputArgs),
}

/// Output format argument shared by every 'get' subcommand
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get page'
#[derive(Parser, Debug)]
pub struct PageArgs {
    /// Page id
    #[arg(conflicts_with = "path", required_unless_present = "path")]
    pub id: Option<i64>,

    /// Page path (without locale prefix)
    #[arg(long)]
    pub path: Option<String>,

    /// Page locale (used with --path)
    #[arg(long, default_value = "en")]
    pub locale: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for 'get group'
#[derive(Parser, Debug)]
pub struct GroupArgs {
    /// Group id or exact name
    pub group: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for 'get groups'
#[derive(Parser, Debug)]
pub struct GroupsArgs {
    /// Server-side filter expression
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Server-side order expression
    #[arg(long)]
    pub order_by: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for 'get renderers'
#[derive(Parser, Debug)]
pub struct RenderersArgs {
    /// Server-side filter expression
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Server-side order expression
    #[arg(long)]
    pub order_by: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}
