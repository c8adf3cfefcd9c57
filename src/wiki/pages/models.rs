//! Page data models

use serde::{Deserialize, Serialize};

use crate::wiki::null_as_default;
use crate::wiki::traits::WikiResource;

/// Tag attached to a page
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageTag {
    pub id: i64,
    pub tag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// Page as returned by `pages.single` and `pages.singleByPath`
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: i64,
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(rename = "privateNS", default, deserialize_with = "null_as_default")]
    pub private_ns: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publish_start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publish_end_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<PageTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub render: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub editor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub script_css: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub script_js: String,
    #[serde(default)]
    pub author_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_email: String,
    #[serde(default)]
    pub creator_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator_email: String,
}

impl Page {
    /// Tag names in server order
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.tag.clone()).collect()
    }
}

/// Arguments of `pages.create` and `pages.update` (`id` only on update)
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    pub description: String,
    pub editor: String,
    pub is_published: bool,
    pub is_private: bool,
    pub locale: String,
    pub path: String,
    pub publish_end_date: String,
    pub publish_start_date: String,
    pub script_css: String,
    pub script_js: String,
    pub tags: Vec<String>,
    pub title: String,
}

impl WikiResource for Page {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_decodes_nulls() {
        let page: Page = serde_json::from_value(json!({
            "id": 12,
            "path": "docs/start",
            "title": "Start",
            "privateNS": null,
            "publishStartDate": null,
            "tags": null,
            "isPublished": true
        }))
        .unwrap();
        assert_eq!(page.private_ns, "");
        assert!(page.tags.is_empty());
        assert!(page.is_published);
        assert!(page.matches("docs/start"));
    }

    #[test]
    fn test_create_input_omits_id() {
        let input = PageInput {
            path: "home".to_string(),
            tags: vec!["a".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["isPublished"], false);
        assert_eq!(value["tags"], json!(["a"]));

        let update = PageInput {
            id: Some(4),
            ..input
        };
        assert_eq!(serde_json::to_value(&update).unwrap()["id"], 4);
    }
}
