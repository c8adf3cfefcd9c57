//! `page` - a wiki page with its content and metadata

use serde::{Deserialize, Serialize};

use super::{Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::{Result, WikiError};
use crate::wiki::pages::{self, PageInput};
use crate::wiki::WikiClient;

fn default_true() -> bool {
    true
}

fn default_editor() -> String {
    "markdown".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    #[serde(default)]
    pub id: Option<i64>,
    pub path: String,
    pub locale: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub publish_start_date: String,
    #[serde(default)]
    pub publish_end_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub script_css: String,
    #[serde(default)]
    pub script_js: String,
    #[serde(default)]
    pub private_ns: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_email: Option<String>,
}

impl PageSpec {
    fn to_input(&self, id: Option<i64>) -> PageInput {
        PageInput {
            id,
            content: self.content.clone(),
            description: self.description.clone(),
            editor: self.editor.clone(),
            is_published: self.is_published,
            is_private: self.is_private,
            locale: self.locale.clone(),
            path: self.path.clone(),
            publish_end_date: self.publish_end_date.clone(),
            publish_start_date: self.publish_start_date.clone(),
            script_css: self.script_css.clone(),
            script_js: self.script_js.clone(),
            tags: self.tags.clone(),
            title: self.title.clone(),
        }
    }

    /// Copy the fields Wiki.js assigns from a stored page
    fn fill_computed(&mut self, page: &pages::Page) {
        self.id = Some(page.id);
        self.hash = Some(page.hash.clone());
        self.private_ns = Some(page.private_ns.clone());
        self.created_at = Some(page.created_at.clone());
        self.creator_id = Some(page.creator_id);
        self.creator_name = Some(page.creator_name.clone());
        self.creator_email = Some(page.creator_email.clone());
    }
}

impl From<pages::Page> for PageSpec {
    fn from(page: pages::Page) -> Self {
        let mut spec = Self {
            id: None,
            path: page.path.clone(),
            locale: page.locale.clone(),
            title: page.title.clone(),
            content: page.content.clone(),
            description: page.description.clone(),
            editor: page.editor.clone(),
            is_private: page.is_private,
            is_published: page.is_published,
            publish_start_date: page.publish_start_date.clone(),
            publish_end_date: page.publish_end_date.clone(),
            tags: page.tag_names(),
            script_css: page.script_css.clone(),
            script_js: page.script_js.clone(),
            ..Default::default()
        };
        spec.fill_computed(&page);
        Page::normalize(&mut spec);
        spec
    }
}

fn missing_id() -> WikiError {
    WikiError::State("page in state has no id".to_string())
}

pub struct Page;

impl Resource for Page {
    const TYPE_NAME: &'static str = "page";
    type Model = PageSpec;

    fn validate(model: &Self::Model) -> Result<()> {
        if model.path.is_empty() || model.path.starts_with('/') {
            return Err(WikiError::Validation(format!(
                "page path '{}' must be non-empty and must not start with '/'",
                model.path
            )));
        }
        if model.locale.is_empty() {
            return Err(WikiError::Validation(format!(
                "page '{}' needs a locale",
                model.path
            )));
        }
        Ok(())
    }

    /// Tags are a set
    fn normalize(model: &mut Self::Model) {
        model.tags.sort();
        model.tags.dedup();
    }

    fn requires_replace(prior: &Self::Model, plan: &Self::Model) -> bool {
        prior.locale != plan.locale
    }

    fn import(id: i64) -> Option<Self::Model> {
        Some(PageSpec {
            id: Some(id),
            ..Default::default()
        })
    }

    async fn create(client: &WikiClient, mut plan: Self::Model) -> Result<Applied<Self::Model>> {
        let page = client.create_page(&plan.to_input(None)).await?;
        plan.fill_computed(&page);
        Ok(Applied::new(plan))
    }

    async fn read(client: &WikiClient, prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let Some(id) = prior.id else {
            return Ok(ReadOutcome::Gone);
        };
        Ok(match client.get_page(id).await? {
            Some(page) => ReadOutcome::Present(page.into()),
            None => ReadOutcome::Gone,
        })
    }

    async fn update(
        client: &WikiClient,
        prior: &Self::Model,
        mut plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        let id = prior.id.ok_or_else(missing_id)?;
        let page = client.update_page(&plan.to_input(Some(id))).await?;
        plan.fill_computed(&page);
        Ok(Applied::new(plan))
    }

    async fn delete(client: &WikiClient, state: &Self::Model) -> Result<DeleteOutcome> {
        let id = state.id.ok_or_else(missing_id)?;
        client.delete_page(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plan() -> PageSpec {
        serde_json::from_value(json!({
            "path": "docs/start",
            "locale": "en",
            "title": "Start",
            "content": "# Start",
            "tags": ["intro", "docs", "intro"]
        }))
        .unwrap()
    }

    fn stored_page(id: i64) -> serde_json::Value {
        json!({
            "id": id, "path": "docs/start", "hash": "h1", "title": "Start",
            "description": "", "isPrivate": false, "isPublished": true, "privateNS": null,
            "publishStartDate": "", "publishEndDate": "",
            "tags": [{ "id": 1, "tag": "intro" }, { "id": 2, "tag": "docs" }],
            "content": "# Start", "editor": "markdown", "locale": "en",
            "scriptCss": "", "scriptJs": "", "createdAt": "2026-01-01T00:00:00Z",
            "creatorId": 1, "creatorName": "Admin", "creatorEmail": "admin@example.com"
        })
    }

    #[test]
    fn test_defaults_and_normalize() {
        let mut page = plan();
        assert!(page.is_published);
        assert_eq!(page.editor, "markdown");
        Page::normalize(&mut page);
        assert_eq!(page.tags, vec!["docs", "intro"]);
    }

    #[test]
    fn test_validate_path() {
        let page = PageSpec {
            path: "/docs".to_string(),
            ..plan()
        };
        assert!(matches!(Page::validate(&page), Err(WikiError::Validation(_))));
    }

    #[test]
    fn test_locale_change_requires_replace() {
        let prior = plan();
        let moved = PageSpec {
            locale: "de".to_string(),
            ..plan()
        };
        assert!(Page::requires_replace(&prior, &moved));
        assert!(!Page::requires_replace(&prior, &plan()));
    }

    #[tokio::test]
    async fn test_create_fills_computed_fields() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "CreatePage",
                "variables": { "path": "docs/start", "scriptCss": "", "isPublished": true }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "pages": { "create": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" },
                    "page": stored_page(31)
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let applied = Page::create(&client, plan()).await.unwrap();
        assert_eq!(applied.model.id, Some(31));
        assert_eq!(applied.model.hash.as_deref(), Some("h1"));
        assert_eq!(applied.model.private_ns.as_deref(), Some(""));
        assert_eq!(applied.model.creator_name.as_deref(), Some("Admin"));
    }

    #[tokio::test]
    async fn test_read_not_found_is_gone() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "This page does not exist." }]
            })))
            .mount(&mock_server)
            .await;

        let prior = PageSpec {
            id: Some(31),
            ..plan()
        };
        assert_eq!(Page::read(&client, &prior).await.unwrap(), ReadOutcome::Gone);
    }

    #[tokio::test]
    async fn test_read_sorts_tags() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "pages": { "single": stored_page(31) } }
            })))
            .mount(&mock_server)
            .await;

        let prior = PageSpec {
            id: Some(31),
            ..plan()
        };
        let ReadOutcome::Present(page) = Page::read(&client, &prior).await.unwrap() else {
            panic!("Expected ReadOutcome::Present");
        };
        assert_eq!(page.tags, vec!["docs", "intro"]);
        assert_eq!(page.id, Some(31));
    }

    #[tokio::test]
    async fn test_read_wrong_page_is_consistency_error() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "pages": { "single": stored_page(32) } }
            })))
            .mount(&mock_server)
            .await;

        let prior = PageSpec {
            id: Some(31),
            ..plan()
        };
        let err = Page::read(&client, &prior).await.unwrap_err();
        assert!(matches!(err, WikiError::Consistency { .. }));
    }
}
