//! Plan/apply command arguments

use clap::Parser;

use crate::config::defaults;

/// Manifest and state locations
#[derive(Parser, Debug, Clone)]
pub struct ManifestArgs {
    /// Manifest file (YAML or JSON)
    #[arg(short = 'f', long, default_value = defaults::MANIFEST_FILE)]
    pub file: String,

    /// State file
    #[arg(long, default_value = defaults::STATE_FILE)]
    pub state: String,
}

/// Arguments for 'apply' and 'destroy'
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "auto-approve", default_value_t = false)]
    pub auto_approve: bool,
}

/// Arguments for 'import'
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Address in the manifest, e.g. page.home or group.editors
    pub address: String,

    /// Wiki.js id of the existing page or group
    pub id: i64,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

