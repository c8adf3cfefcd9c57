/// Configuration constants for the Wiki.js GraphQL API
pub mod api {
    /// GraphQL endpoint path, relative to the site URL
    pub const GRAPHQL_PATH: &str = "/graphql";

    /// Message Wiki.js returns when a page id does not exist
    pub const PAGE_NOT_FOUND: &str = "This page does not exist.";

    /// Login strategy used for email/password authentication
    pub const LOCAL_STRATEGY: &str = "local";

    /// Most empty slots an ordered list may gain from one server position
    pub const MAX_POSITION_GAP: usize = 1024;
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file path (relative to HOME)
    pub const FILE_PATH: &str = ".wikictl/credentials.json";

    /// Environment variable holding an API key
    pub const TOKEN_ENV_VAR: &str = "WIKIJS_TOKEN";

    /// Environment variables for the login email (checked in order)
    pub const EMAIL_ENV_VARS: &[&str] = &["WIKIJS_EMAIL", "TF_PROVIDER_WIKIJS_EMAIL"];

    /// Environment variables for the login password (checked in order)
    pub const PASSWORD_ENV_VARS: &[&str] = &["WIKIJS_PASSWORD", "TF_PROVIDER_WIKIJS_PASSWORD"];
}

/// Configuration constants for site resolution
pub mod site {
    /// Environment variable for the site URL
    pub const ENV_VAR: &str = "WIKIJS_SITE_URL";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Default state file (relative to the working directory)
    pub const STATE_FILE: &str = ".wikictl/state.json";

    /// Default manifest file
    pub const MANIFEST_FILE: &str = "wiki.yaml";

    /// Current state file format version
    pub const STATE_VERSION: u32 = 1;
}

/// Wiki.js factory defaults for site settings
pub mod site_defaults {
    pub const TITLE: &str = "Wiki.js";
    pub const ROBOTS: &[&str] = &["index", "follow"];
    pub const LOGO_URL: &str = "https://static.requarks.io/logo/wikijs-butterfly.svg";
    pub const PAGE_EXTENSIONS: &str = "md, html, txt";
    pub const JWT_AUDIENCE: &str = "urn:wiki.js";
    pub const JWT_EXPIRATION: &str = "30m";
    pub const JWT_RENEWABLE_PERIOD: &str = "14d";
    pub const EDIT_MENU_EXTERNAL_NAME: &str = "GitHub";
    pub const EDIT_MENU_EXTERNAL_ICON: &str = "mdi-github";
    pub const EDIT_MENU_EXTERNAL_URL: &str = "https://github.com/org/repo/blob/main/{filename}";
    /// Seconds
    pub const HSTS_DURATION: i64 = 300;
    /// Bytes
    pub const UPLOAD_MAX_FILE_SIZE: i64 = 5_242_880;
    pub const UPLOAD_MAX_FILES: i64 = 10;
}

/// Wiki.js factory defaults for theming
pub mod theme_defaults {
    pub const THEME: &str = "default";
    pub const ICONSET: &str = "mdi";
    pub const TOC_POSITION: &str = "left";

    /// Accepted icon sets
    pub const ICONSETS: &[&str] = &["mdi", "fa", "fa4"];

    /// Accepted table of contents positions
    pub const TOC_POSITIONS: &[&str] = &["left", "right", "off"];
}
