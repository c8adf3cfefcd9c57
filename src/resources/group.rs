//! `group` and `managed_system_group` - permission groups and their page rules

use log::warn;
use serde::{Deserialize, Serialize};

use super::{forget_warning, Applied, DeleteOutcome, ReadOutcome, Resource};
use crate::error::{Result, WikiError};
use crate::wiki::groups::{self, GroupUpdate, PageRule, PageRuleMatch};
use crate::wiki::WikiClient;

fn default_redirect() -> String {
    "/".to_string()
}

/// Page rule as declared; the id is assigned on submit
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PageRuleSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub deny: bool,
    #[serde(rename = "match", default)]
    pub match_type: PageRuleMatch,
    pub roles: Vec<String>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub locales: Vec<String>,
}

impl From<&PageRule> for PageRuleSpec {
    fn from(rule: &PageRule) -> Self {
        Self {
            id: Some(rule.id.clone()),
            deny: rule.deny,
            match_type: rule.match_type,
            roles: rule.roles.clone(),
            path: rule.path.clone(),
            locales: rule.locales.clone(),
        }
    }
}

/// Page rule ids are `tf_<group id>_<index>`
fn rule_id(group_id: i64, index: usize) -> String {
    format!("tf_{}_{}", group_id, index)
}

/// Assign ids to every rule and build the wire form
fn assign_rule_ids(group_id: i64, rules: &mut [PageRuleSpec]) -> Vec<PageRule> {
    rules
        .iter_mut()
        .enumerate()
        .map(|(i, rule)| {
            let id = rule_id(group_id, i);
            rule.id = Some(id.clone());
            PageRule {
                id,
                deny: rule.deny,
                match_type: rule.match_type,
                roles: rule.roles.clone(),
                path: rule.path.clone(),
                locales: rule.locales.clone(),
            }
        })
        .collect()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub is_system: Option<bool>,
    #[serde(default = "default_redirect")]
    pub redirect_on_login: String,
    pub permissions: Vec<String>,
    #[serde(default)]
    pub page_rules: Vec<PageRuleSpec>,
}

impl From<groups::Group> for GroupSpec {
    fn from(group: groups::Group) -> Self {
        Self {
            id: Some(group.id),
            name: group.name,
            is_system: Some(group.is_system),
            redirect_on_login: group.redirect_on_login,
            permissions: group.permissions,
            page_rules: group.page_rules.iter().map(PageRuleSpec::from).collect(),
        }
    }
}

fn missing_id(kind: &str) -> WikiError {
    WikiError::State(format!("{} in state has no id", kind))
}

pub struct Group;

impl Resource for Group {
    const TYPE_NAME: &'static str = "group";
    type Model = GroupSpec;

    fn validate(model: &Self::Model) -> Result<()> {
        if model.name.trim().is_empty() {
            return Err(WikiError::Validation("group name must not be empty".to_string()));
        }
        Ok(())
    }

    fn import(id: i64) -> Option<Self::Model> {
        Some(GroupSpec {
            id: Some(id),
            ..Default::default()
        })
    }

    /// Create the group, then finalize it with permissions and page rules
    ///
    /// A failed finalize leaves the group created and is reported as a warning.
    async fn create(client: &WikiClient, mut plan: Self::Model) -> Result<Applied<Self::Model>> {
        let created = client.create_group(&plan.name).await?;
        plan.id = Some(created.id);
        plan.is_system = Some(created.is_system);

        let update = GroupUpdate {
            id: created.id,
            name: plan.name.clone(),
            redirect_on_login: plan.redirect_on_login.clone(),
            permissions: plan.permissions.clone(),
            page_rules: assign_rule_ids(created.id, &mut plan.page_rules),
        };

        let mut applied = Applied::new(plan);
        if let Err(e) = client.update_group(&update).await {
            warn!("Group {} created but not finalized: {}", created.id, e);
            applied.warnings.push(format!(
                "group '{}' (id {}) was created but permissions and page rules were not applied: {}",
                update.name, created.id, e
            ));
        }
        Ok(applied)
    }

    async fn read(client: &WikiClient, prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        let Some(id) = prior.id else {
            return Ok(ReadOutcome::Gone);
        };
        Ok(match client.get_group(id).await? {
            Some(group) => ReadOutcome::Present(group.into()),
            None => ReadOutcome::Gone,
        })
    }

    async fn update(
        client: &WikiClient,
        prior: &Self::Model,
        mut plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        let id = prior.id.ok_or_else(|| missing_id("group"))?;
        plan.id = Some(id);
        plan.is_system = prior.is_system;

        let update = GroupUpdate {
            id,
            name: plan.name.clone(),
            redirect_on_login: plan.redirect_on_login.clone(),
            permissions: plan.permissions.clone(),
            page_rules: assign_rule_ids(id, &mut plan.page_rules),
        };
        client.update_group(&update).await?;
        Ok(Applied::new(plan))
    }

    async fn delete(client: &WikiClient, state: &Self::Model) -> Result<DeleteOutcome> {
        let id = state.id.ok_or_else(|| missing_id("group"))?;
        client.delete_group(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

/// Settings of a built-in group (Administrators, Guests)
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ManagedSystemGroupSpec {
    pub group_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_redirect")]
    pub redirect_on_login: String,
    pub permissions: Vec<String>,
    #[serde(default)]
    pub page_rules: Vec<PageRuleSpec>,
}

impl From<groups::Group> for ManagedSystemGroupSpec {
    fn from(group: groups::Group) -> Self {
        Self {
            group_id: group.id,
            name: Some(group.name),
            redirect_on_login: group.redirect_on_login,
            permissions: group.permissions,
            page_rules: group.page_rules.iter().map(PageRuleSpec::from).collect(),
        }
    }
}

async fn apply_system_group(
    client: &WikiClient,
    mut plan: ManagedSystemGroupSpec,
) -> Result<Applied<ManagedSystemGroupSpec>> {
    let name = match plan.name.take() {
        Some(name) => name,
        None => {
            let group = client.get_group(plan.group_id).await?.ok_or_else(|| {
                WikiError::Validation(format!("there is no group with id {}", plan.group_id))
            })?;
            group.name
        }
    };

    let update = GroupUpdate {
        id: plan.group_id,
        name: name.clone(),
        redirect_on_login: plan.redirect_on_login.clone(),
        permissions: plan.permissions.clone(),
        page_rules: assign_rule_ids(plan.group_id, &mut plan.page_rules),
    };
    client.update_group(&update).await?;
    plan.name = Some(name);
    Ok(Applied::new(plan))
}

pub struct ManagedSystemGroup;

impl Resource for ManagedSystemGroup {
    const TYPE_NAME: &'static str = "managed_system_group";
    type Model = ManagedSystemGroupSpec;

    fn requires_replace(prior: &Self::Model, plan: &Self::Model) -> bool {
        prior.group_id != plan.group_id
    }

    /// Take over an existing system group; the group must exist and be a system group
    async fn create(client: &WikiClient, mut plan: Self::Model) -> Result<Applied<Self::Model>> {
        let group = client.get_group(plan.group_id).await?.ok_or_else(|| {
            WikiError::Validation(format!(
                "there is no system group with id {} in Wiki.js",
                plan.group_id
            ))
        })?;
        if !group.is_system {
            return Err(WikiError::Validation(format!(
                "group '{}' (id {}) is not a system group",
                group.name, group.id
            )));
        }

        plan.name = Some(group.name);
        apply_system_group(client, plan).await
    }

    async fn read(client: &WikiClient, prior: &Self::Model) -> Result<ReadOutcome<Self::Model>> {
        Ok(match client.get_group(prior.group_id).await? {
            Some(group) => ReadOutcome::Present(group.into()),
            None => ReadOutcome::Gone,
        })
    }

    async fn update(
        client: &WikiClient,
        _prior: &Self::Model,
        plan: Self::Model,
    ) -> Result<Applied<Self::Model>> {
        apply_system_group(client, plan).await
    }

    async fn delete(_client: &WikiClient, _state: &Self::Model) -> Result<DeleteOutcome> {
        Ok(forget_warning("A system group"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_result() -> serde_json::Value {
        json!({ "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" })
    }

    fn editors_plan() -> GroupSpec {
        serde_json::from_value(json!({
            "name": "Editors",
            "permissions": ["read:pages", "write:pages"],
            "page_rules": [
                { "match": "START", "roles": ["read:pages"], "path": "docs" },
                { "deny": true, "match": "EXACT", "roles": ["write:pages"], "path": "home" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_plan_defaults() {
        let plan = editors_plan();
        assert_eq!(plan.redirect_on_login, "/");
        assert!(plan.id.is_none());
        assert!(plan.page_rules[0].id.is_none());
        assert!(plan.page_rules[0].locales.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_rule_ids_from_new_id() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "CreateGroup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "create": {
                    "responseResult": ok_result(),
                    "group": { "id": 9, "name": "Editors", "isSystem": false }
                }}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "UpdateGroup",
                "variables": { "id": 9, "pageRules": [{ "id": "tf_9_0" }, { "id": "tf_9_1" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "update": { "responseResult": ok_result() } } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let applied = Group::create(&client, editors_plan()).await.unwrap();
        assert!(applied.warnings.is_empty());
        assert_eq!(applied.model.id, Some(9));
        assert_eq!(applied.model.is_system, Some(false));
        assert_eq!(applied.model.page_rules[1].id.as_deref(), Some("tf_9_1"));
    }

    #[tokio::test]
    async fn test_failed_finalize_is_warning() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "CreateGroup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "create": {
                    "responseResult": ok_result(),
                    "group": { "id": 9, "name": "Editors", "isSystem": false }
                }}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "UpdateGroup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "update": { "responseResult": {
                    "succeeded": false, "errorCode": 1003, "slug": "InvalidPermission", "message": "bad permission"
                }}}}
            })))
            .mount(&mock_server)
            .await;

        let applied = Group::create(&client, editors_plan()).await.unwrap();
        assert_eq!(applied.model.id, Some(9));
        assert_eq!(applied.warnings.len(), 1);
        assert!(applied.warnings[0].contains("InvalidPermission"));
    }

    #[tokio::test]
    async fn test_read_missing_group_is_gone() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": null } }
            })))
            .mount(&mock_server)
            .await;

        let prior = GroupSpec {
            id: Some(9),
            ..editors_plan()
        };
        assert_eq!(Group::read(&client, &prior).await.unwrap(), ReadOutcome::Gone);
    }

    #[tokio::test]
    async fn test_system_group_must_be_system() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetGroup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": {
                    "id": 9, "name": "Editors", "isSystem": false,
                    "redirectOnLogin": "/", "permissions": [], "pageRules": []
                }}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "UpdateGroup" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let plan = ManagedSystemGroupSpec {
            group_id: 9,
            name: None,
            redirect_on_login: "/".to_string(),
            permissions: vec![],
            page_rules: vec![],
        };
        let err = ManagedSystemGroup::create(&client, plan).await.unwrap_err();
        match err {
            WikiError::Validation(msg) => assert!(msg.contains("not a system group")),
            other => panic!("Expected WikiError::Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_system_group_delete_is_forget() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        let outcome = ManagedSystemGroup::delete(&client, &ManagedSystemGroupSpec::default())
            .await
            .unwrap();
        assert!(matches!(outcome, DeleteOutcome::Forgotten { .. }));
    }
}
