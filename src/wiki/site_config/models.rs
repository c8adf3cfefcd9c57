//! Site configuration model

use serde::{Deserialize, Serialize};

use crate::config::site_defaults as defaults;

/// Site-wide settings (`site.config`)
///
/// Field names are snake_case everywhere in wikictl. The GraphQL documents
/// alias each wire field to its snake_case name, see [`FIELDS`].
/// Fields left out of a manifest take the Wiki.js factory defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub host: String,
    pub title: String,
    pub description: String,
    pub robots: Vec<String>,
    pub analytics_service: String,
    pub analytics_id: String,
    pub company: String,
    pub content_license: String,
    pub footer_override: String,
    pub logo_url: String,
    pub page_extensions: String,
    pub auth_auto_login: bool,
    pub auth_enforce_2fa: bool,
    pub auth_hide_local: bool,
    pub auth_login_bg_url: String,
    pub auth_jwt_audience: String,
    pub auth_jwt_expiration: String,
    pub auth_jwt_renewable_period: String,
    pub edit_fab: bool,
    pub edit_menu_bar: bool,
    pub edit_menu_btn: bool,
    pub edit_menu_external_btn: bool,
    pub edit_menu_external_name: String,
    pub edit_menu_external_icon: String,
    pub edit_menu_external_url: String,
    pub feature_page_ratings: bool,
    pub feature_page_comments: bool,
    pub feature_personal_wikis: bool,
    pub security_open_redirect: bool,
    pub security_iframe: bool,
    pub security_referrer_policy: bool,
    pub security_trust_proxy: bool,
    pub security_sri: bool,
    pub security_hsts: bool,
    pub security_hsts_duration: i64,
    pub security_csp: bool,
    pub security_csp_directives: String,
    pub upload_max_file_size: i64,
    pub upload_max_files: i64,
    pub upload_scan_svg: bool,
    pub upload_force_download: bool,
}

/// (snake_case name, GraphQL field, GraphQL argument type) for every field
pub const FIELDS: &[(&str, &str, &str)] = &[
    ("host", "host", "String"),
    ("title", "title", "String"),
    ("description", "description", "String"),
    ("robots", "robots", "[String]"),
    ("analytics_service", "analyticsService", "String"),
    ("analytics_id", "analyticsId", "String"),
    ("company", "company", "String"),
    ("content_license", "contentLicense", "String"),
    ("footer_override", "footerOverride", "String"),
    ("logo_url", "logoUrl", "String"),
    ("page_extensions", "pageExtensions", "String"),
    ("auth_auto_login", "authAutoLogin", "Boolean"),
    ("auth_enforce_2fa", "authEnforce2FA", "Boolean"),
    ("auth_hide_local", "authHideLocal", "Boolean"),
    ("auth_login_bg_url", "authLoginBgUrl", "String"),
    ("auth_jwt_audience", "authJwtAudience", "String"),
    ("auth_jwt_expiration", "authJwtExpiration", "String"),
    ("auth_jwt_renewable_period", "authJwtRenewablePeriod", "String"),
    ("edit_fab", "editFab", "Boolean"),
    ("edit_menu_bar", "editMenuBar", "Boolean"),
    ("edit_menu_btn", "editMenuBtn", "Boolean"),
    ("edit_menu_external_btn", "editMenuExternalBtn", "Boolean"),
    ("edit_menu_external_name", "editMenuExternalName", "String"),
    ("edit_menu_external_icon", "editMenuExternalIcon", "String"),
    ("edit_menu_external_url", "editMenuExternalUrl", "String"),
    ("feature_page_ratings", "featurePageRatings", "Boolean"),
    ("feature_page_comments", "featurePageComments", "Boolean"),
    ("feature_personal_wikis", "featurePersonalWikis", "Boolean"),
    ("security_open_redirect", "securityOpenRedirect", "Boolean"),
    ("security_iframe", "securityIframe", "Boolean"),
    ("security_referrer_policy", "securityReferrerPolicy", "Boolean"),
    ("security_trust_proxy", "securityTrustProxy", "Boolean"),
    ("security_sri", "securitySRI", "Boolean"),
    ("security_hsts", "securityHSTS", "Boolean"),
    ("security_hsts_duration", "securityHSTSDuration", "Int"),
    ("security_csp", "securityCSP", "Boolean"),
    ("security_csp_directives", "securityCSPDirectives", "String"),
    ("upload_max_file_size", "uploadMaxFileSize", "Int"),
    ("upload_max_files", "uploadMaxFiles", "Int"),
    ("upload_scan_svg", "uploadScanSVG", "Boolean"),
    ("upload_force_download", "uploadForceDownload", "Boolean"),
];

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            title: defaults::TITLE.to_string(),
            description: String::new(),
            robots: defaults::ROBOTS.iter().map(|r| r.to_string()).collect(),
            analytics_service: String::new(),
            analytics_id: String::new(),
            company: String::new(),
            content_license: String::new(),
            footer_override: String::new(),
            logo_url: defaults::LOGO_URL.to_string(),
            page_extensions: defaults::PAGE_EXTENSIONS.to_string(),
            auth_auto_login: false,
            auth_enforce_2fa: false,
            auth_hide_local: false,
            auth_login_bg_url: String::new(),
            auth_jwt_audience: defaults::JWT_AUDIENCE.to_string(),
            auth_jwt_expiration: defaults::JWT_EXPIRATION.to_string(),
            auth_jwt_renewable_period: defaults::JWT_RENEWABLE_PERIOD.to_string(),
            edit_fab: true,
            edit_menu_bar: false,
            edit_menu_btn: true,
            edit_menu_external_btn: true,
            edit_menu_external_name: defaults::EDIT_MENU_EXTERNAL_NAME.to_string(),
            edit_menu_external_icon: defaults::EDIT_MENU_EXTERNAL_ICON.to_string(),
            edit_menu_external_url: defaults::EDIT_MENU_EXTERNAL_URL.to_string(),
            feature_page_ratings: true,
            feature_page_comments: true,
            feature_personal_wikis: true,
            security_open_redirect: true,
            security_iframe: true,
            security_referrer_policy: true,
            security_trust_proxy: true,
            security_sri: true,
            security_hsts: false,
            security_hsts_duration: defaults::HSTS_DURATION,
            security_csp: false,
            security_csp_directives: String::new(),
            upload_max_file_size: defaults::UPLOAD_MAX_FILE_SIZE,
            upload_max_files: defaults::UPLOAD_MAX_FILES,
            upload_scan_svg: true,
            upload_force_download: true,
        }
    }
}
