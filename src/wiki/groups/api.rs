//! Group API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, WikiError};
use crate::wiki::{MutationStatus, ResponseResult, WikiClient};

use super::models::{Group, GroupSummary, GroupUpdate};

const LIST_GROUPS: &str = r#"
query ListGroups($filter: String, $orderBy: String) {
  groups {
    list(filter: $filter, orderBy: $orderBy) {
      id name isSystem userCount createdAt updatedAt
    }
  }
}"#;

const GET_GROUP: &str = r#"
query GetGroup($id: Int!) {
  groups {
    single(id: $id) {
      id
      name
      isSystem
      redirectOnLogin
      permissions
      pageRules { id deny match roles path locales }
      createdAt
      updatedAt
    }
  }
}"#;

const CREATE_GROUP: &str = r#"
mutation CreateGroup($name: String!) {
  groups {
    create(name: $name) {
      responseResult { succeeded errorCode slug message }
      group { id name isSystem createdAt updatedAt }
    }
  }
}"#;

const UPDATE_GROUP: &str = r#"
mutation UpdateGroup($id: Int!, $name: String!, $redirectOnLogin: String!, $permissions: [String]!, $pageRules: [PageRuleInput]!) {
  groups {
    update(id: $id, name: $name, redirectOnLogin: $redirectOnLogin, permissions: $permissions, pageRules: $pageRules) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

const DELETE_GROUP: &str = r#"
mutation DeleteGroup($id: Int!) {
  groups {
    delete(id: $id) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    groups: T,
}

#[derive(Deserialize)]
struct ListGroups {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    list: Vec<GroupSummary>,
}

#[derive(Deserialize)]
struct GetGroup {
    single: Option<Group>,
}

#[derive(Deserialize)]
struct CreateGroup {
    create: CreatedGroup,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedGroup {
    response_result: ResponseResult,
    group: Option<GroupSummary>,
}

#[derive(Deserialize)]
struct UpdateGroup {
    update: MutationStatus,
}

#[derive(Deserialize)]
struct DeleteGroup {
    delete: MutationStatus,
}

impl WikiClient {
    /// List groups
    pub async fn get_groups(
        &self,
        filter: Option<&str>,
        order_by: Option<&str>,
    ) -> Result<Vec<GroupSummary>> {
        let data: Data<ListGroups> = self
            .graphql(
                "ListGroups",
                LIST_GROUPS,
                json!({ "filter": filter, "orderBy": order_by }),
            )
            .await?;
        debug!("Fetched {} groups", data.groups.list.len());
        Ok(data.groups.list)
    }

    /// Get a group by id; `None` when it does not exist
    ///
    /// Fails with a consistency error if Wiki.js answers with another group.
    pub async fn get_group(&self, id: i64) -> Result<Option<Group>> {
        let data: Data<GetGroup> = self
            .graphql("GetGroup", GET_GROUP, json!({ "id": id }))
            .await?;

        match data.groups.single {
            None => Ok(None),
            Some(group) if group.id == 0 => Ok(None),
            Some(group) if group.id != id => Err(WikiError::Consistency {
                kind: "group".to_string(),
                expected: id.to_string(),
                actual: group.id.to_string(),
            }),
            Some(group) => Ok(Some(group)),
        }
    }

    /// Create an empty group and return its summary
    pub async fn create_group(&self, name: &str) -> Result<GroupSummary> {
        debug!("Creating group '{}'", name);
        let data: Data<CreateGroup> = self
            .graphql("CreateGroup", CREATE_GROUP, json!({ "name": name }))
            .await?;

        let created = data.groups.create;
        created.response_result.ensure_succeeded("Create group")?;
        created.group.ok_or_else(|| {
            WikiError::Json(format!("Wiki.js returned no group for '{}'", name))
        })
    }

    /// Replace name, redirect, permissions and page rules of a group
    pub async fn update_group(&self, update: &GroupUpdate) -> Result<()> {
        debug!("Updating group {}", update.id);
        let data: Data<UpdateGroup> = self
            .graphql("UpdateGroup", UPDATE_GROUP, serde_json::to_value(update)?)
            .await?;
        data.groups
            .update
            .response_result
            .ensure_succeeded("Update group")
    }

    /// Delete a group
    pub async fn delete_group(&self, id: i64) -> Result<()> {
        debug!("Deleting group {}", id);
        let data: Data<DeleteGroup> = self
            .graphql("DeleteGroup", DELETE_GROUP, json!({ "id": id }))
            .await?;
        data.groups
            .delete
            .response_result
            .ensure_succeeded("Delete group")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::groups::{PageRule, PageRuleMatch};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn group_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Editors",
            "isSystem": false,
            "redirectOnLogin": "/",
            "permissions": ["read:pages", "write:pages"],
            "pageRules": [{
                "id": "tf_5_0", "deny": false, "match": "START",
                "roles": ["read:pages"], "path": "", "locales": []
            }],
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_get_group() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "GetGroup",
                "variables": { "id": 5 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": group_json(5) } }
            })))
            .mount(&mock_server)
            .await;

        let group = client.get_group(5).await.unwrap().unwrap();
        assert_eq!(group.name, "Editors");
        assert_eq!(group.page_rules[0].match_type, PageRuleMatch::Start);
    }

    #[tokio::test]
    async fn test_get_group_missing_is_none() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": null } }
            })))
            .mount(&mock_server)
            .await;

        assert!(client.get_group(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_group_wrong_id_is_consistency_error() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": group_json(6) } }
            })))
            .mount(&mock_server)
            .await;

        match client.get_group(5).await.unwrap_err() {
            WikiError::Consistency {
                kind,
                expected,
                actual,
            } => {
                assert_eq!(kind, "group");
                assert_eq!(expected, "5");
                assert_eq!(actual, "6");
            }
            other => panic!("Expected WikiError::Consistency, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_and_update_group() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "CreateGroup",
                "variables": { "name": "Editors" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "create": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "Group created" },
                    "group": { "id": 5, "name": "Editors", "isSystem": false }
                }}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "UpdateGroup",
                "variables": {
                    "id": 5,
                    "redirectOnLogin": "/",
                    "pageRules": [{ "id": "tf_5_0", "match": "EXACT" }]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "update": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": null }
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let created = client.create_group("Editors").await.unwrap();
        assert_eq!(created.id, 5);

        let update = GroupUpdate {
            id: created.id,
            name: "Editors".to_string(),
            redirect_on_login: "/".to_string(),
            permissions: vec!["read:pages".to_string()],
            page_rules: vec![PageRule {
                id: "tf_5_0".to_string(),
                deny: false,
                match_type: PageRuleMatch::Exact,
                roles: vec!["read:pages".to_string()],
                path: "home".to_string(),
                locales: vec![],
            }],
        };
        client.update_group(&update).await.unwrap();
    }
}
