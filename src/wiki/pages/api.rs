//! Page API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::config::api::PAGE_NOT_FOUND;
use crate::error::{Result, WikiError};
use crate::wiki::{MutationStatus, ResponseResult, WikiClient};

use super::models::{Page, PageInput};

macro_rules! page_fields {
    () => {
        r#"
      id path hash title description isPrivate isPublished privateNS
      publishStartDate publishEndDate
      tags { id tag title createdAt updatedAt }
      content render contentType createdAt updatedAt editor locale
      scriptCss scriptJs
      authorId authorName authorEmail creatorId creatorName creatorEmail"#
    };
}

const GET_PAGE: &str = concat!(
    "query GetPage($id: Int!) {\n  pages {\n    single(id: $id) {",
    page_fields!(),
    "\n    }\n  }\n}"
);

const GET_PAGE_BY_PATH: &str = concat!(
    "query GetPageByPath($path: String!, $locale: String!) {\n  pages {\n    singleByPath(path: $path, locale: $locale) {",
    page_fields!(),
    "\n    }\n  }\n}"
);

const CREATE_PAGE: &str = concat!(
    r#"mutation CreatePage($content: String!, $description: String!, $editor: String!, $isPublished: Boolean!, $isPrivate: Boolean!, $locale: String!, $path: String!, $publishEndDate: Date, $publishStartDate: Date, $scriptCss: String, $scriptJs: String, $tags: [String]!, $title: String!) {
  pages {
    create(content: $content, description: $description, editor: $editor, isPublished: $isPublished, isPrivate: $isPrivate, locale: $locale, path: $path, publishEndDate: $publishEndDate, publishStartDate: $publishStartDate, scriptCss: $scriptCss, scriptJs: $scriptJs, tags: $tags, title: $title) {
      responseResult { succeeded errorCode slug message }
      page {"#,
    page_fields!(),
    "\n      }\n    }\n  }\n}"
);

const UPDATE_PAGE: &str = concat!(
    r#"mutation UpdatePage($id: Int!, $content: String, $description: String, $editor: String, $isPublished: Boolean, $isPrivate: Boolean, $locale: String, $path: String, $publishEndDate: Date, $publishStartDate: Date, $scriptCss: String, $scriptJs: String, $tags: [String], $title: String) {
  pages {
    update(id: $id, content: $content, description: $description, editor: $editor, isPublished: $isPublished, isPrivate: $isPrivate, locale: $locale, path: $path, publishEndDate: $publishEndDate, publishStartDate: $publishStartDate, scriptCss: $scriptCss, scriptJs: $scriptJs, tags: $tags, title: $title) {
      responseResult { succeeded errorCode slug message }
      page {"#,
    page_fields!(),
    "\n      }\n    }\n  }\n}"
);

const DELETE_PAGE: &str = r#"
mutation DeletePage($id: Int!) {
  pages {
    delete(id: $id) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    pages: T,
}

#[derive(Deserialize)]
struct GetPage {
    single: Option<Page>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPageByPath {
    single_by_path: Option<Page>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    response_result: ResponseResult,
    page: Option<Page>,
}

#[derive(Deserialize)]
struct CreatePage {
    create: PageResponse,
}

#[derive(Deserialize)]
struct UpdatePage {
    update: PageResponse,
}

#[derive(Deserialize)]
struct DeletePage {
    delete: MutationStatus,
}

impl PageResponse {
    fn into_page(self, operation: &str, path: &str) -> Result<Page> {
        self.response_result.ensure_succeeded(operation)?;
        self.page.ok_or_else(|| {
            WikiError::Json(format!("Wiki.js returned no page for '{}'", path))
        })
    }
}

/// Wiki.js reports a missing page as a GraphQL error rather than null
fn none_when_missing(result: Result<Option<Page>>) -> Result<Option<Page>> {
    match result {
        Err(e) if e.has_graphql_message(PAGE_NOT_FOUND) => Ok(None),
        other => other,
    }
}

impl WikiClient {
    /// Get a page by id; `None` when it does not exist
    ///
    /// Fails with a consistency error if Wiki.js answers with another page.
    pub async fn get_page(&self, id: i64) -> Result<Option<Page>> {
        let result = self
            .graphql::<Data<GetPage>>("GetPage", GET_PAGE, json!({ "id": id }))
            .await
            .map(|data| data.pages.single);

        match none_when_missing(result)? {
            None => Ok(None),
            Some(page) if page.id != id => Err(WikiError::Consistency {
                kind: "page".to_string(),
                expected: id.to_string(),
                actual: page.id.to_string(),
            }),
            Some(page) => Ok(Some(page)),
        }
    }

    /// Get a page by path within a locale; `None` when it does not exist
    pub async fn get_page_by_path(&self, path: &str, locale: &str) -> Result<Option<Page>> {
        let result = self
            .graphql::<Data<GetPageByPath>>(
                "GetPageByPath",
                GET_PAGE_BY_PATH,
                json!({ "path": path, "locale": locale }),
            )
            .await
            .map(|data| data.pages.single_by_path);
        none_when_missing(result)
    }

    /// Create a page and return it as stored
    pub async fn create_page(&self, input: &PageInput) -> Result<Page> {
        debug!("Creating page '{}' ({})", input.path, input.locale);
        let data: Data<CreatePage> = self
            .graphql("CreatePage", CREATE_PAGE, serde_json::to_value(input)?)
            .await?;
        data.pages.create.into_page("Create page", &input.path)
    }

    /// Update a page (`input.id` must be set) and return it as stored
    pub async fn update_page(&self, input: &PageInput) -> Result<Page> {
        let Some(id) = input.id else {
            return Err(WikiError::Validation(format!(
                "page '{}' has no id to update",
                input.path
            )));
        };
        debug!("Updating page {}", id);
        let data: Data<UpdatePage> = self
            .graphql("UpdatePage", UPDATE_PAGE, serde_json::to_value(input)?)
            .await?;
        data.pages.update.into_page("Update page", &input.path)
    }

    /// Delete a page
    pub async fn delete_page(&self, id: i64) -> Result<()> {
        debug!("Deleting page {}", id);
        let data: Data<DeletePage> = self
            .graphql("DeletePage", DELETE_PAGE, json!({ "id": id }))
            .await?;
        data.pages
            .delete
            .response_result
            .ensure_succeeded("Delete page")
    }
}
