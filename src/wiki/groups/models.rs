//! Group data models

use serde::{Deserialize, Serialize};

use crate::wiki::null_as_default;
use crate::wiki::traits::WikiResource;

/// How a page rule matches page paths
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageRuleMatch {
    #[default]
    Start,
    Exact,
    End,
    Regex,
    Tag,
}

/// Page-level permission rule (same shape for input and output)
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PageRule {
    pub id: String,
    pub deny: bool,
    #[serde(rename = "match")]
    pub match_type: PageRuleMatch,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locales: Vec<String>,
}

/// Group entry from the group list
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
    pub is_system: bool,
    #[serde(default)]
    pub user_count: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Full group with permissions and page rules
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub is_system: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redirect_on_login: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_rules: Vec<PageRule>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Fields written by the group update mutation
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    pub id: i64,
    pub name: String,
    pub redirect_on_login: String,
    pub permissions: Vec<String>,
    pub page_rules: Vec<PageRule>,
}

impl WikiResource for GroupSummary {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl WikiResource for Group {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
