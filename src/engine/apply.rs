//! Executing plans against the site

use log::{info, warn};
use serde_json::Value;

use super::plan::{at_address, state_kind, Action, PlannedChange};
use super::state::{parse_address, StateFile, StateStore};
use crate::error::{Result, WikiError};
use crate::resources::{Applied, DeleteOutcome, ResourceType};
use crate::wiki::WikiClient;

/// Outcome of a successful apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Steps that changed the site or the state
    pub changed: usize,
    pub warnings: Vec<String>,
}

impl ApplyReport {
    fn warn(&mut self, address: &str, warning: String) {
        warn!("{}: {}", address, warning);
        self.warnings.push(format!("{}: {}", address, warning));
    }

    fn record(&mut self, address: &str, applied: &Applied<Value>) {
        for warning in &applied.warnings {
            self.warn(address, warning.clone());
        }
    }
}

fn desired_of(change: &PlannedChange) -> Result<&Value> {
    change.desired.as_ref().ok_or_else(|| {
        WikiError::State(format!("{} ({}) has no desired spec", change.address, change.action))
    })
}

fn prior_of(change: &PlannedChange) -> Result<&Value> {
    change.prior.as_ref().ok_or_else(|| {
        WikiError::State(format!("{} ({}) has no prior spec", change.address, change.action))
    })
}

/// Execute planned changes in order
///
/// The state is saved after every successful step; the first error aborts
/// the run and leaves the state describing everything done so far.
pub async fn apply(
    client: &WikiClient,
    changes: &[PlannedChange],
    state: &mut StateFile,
    store: &StateStore,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for change in changes {
        let address = change.address.as_str();
        match change.action {
            Action::NoChange => continue,
            Action::Create => {
                let desired = desired_of(change)?;
                info!("Creating {}", address);
                let applied = change.kind.create(client, desired).await?;
                report.record(address, &applied);
                state.insert(address, change.kind.name(), applied.model);
            }
            Action::Update => {
                let desired = desired_of(change)?;
                let prior = prior_of(change)?;
                info!("Updating {}", address);
                let applied = change.kind.update(client, prior, desired).await?;
                report.record(address, &applied);
                state.insert(address, change.kind.name(), applied.model);
            }
            Action::Replace => {
                let desired = desired_of(change)?;
                let prior = prior_of(change)?;
                info!("Replacing {}", address);
                if let DeleteOutcome::Forgotten { warning } = change.kind.delete(client, prior).await? {
                    report.warn(address, warning);
                }
                state.remove(address);
                store.save(state)?;

                let applied = change.kind.create(client, desired).await?;
                report.record(address, &applied);
                state.insert(address, change.kind.name(), applied.model);
            }
            Action::Delete | Action::Forget => {
                let prior = prior_of(change)?;
                info!("Removing {}", address);
                if let DeleteOutcome::Forgotten { warning } = change.kind.delete(client, prior).await? {
                    report.warn(address, warning);
                }
                state.remove(address);
            }
        }
        store.save(state)?;
        report.changed += 1;
    }

    Ok(report)
}

/// Re-read every state entry from the site
///
/// Returns the addresses that no longer exist; they are dropped from the state.
pub async fn refresh(client: &WikiClient, state: &mut StateFile) -> Result<Vec<String>> {
    let mut gone = Vec::new();
    let addresses: Vec<String> = state.resources.keys().cloned().collect();

    for address in addresses {
        let Some(entry) = state.resources.get_mut(&address) else {
            continue;
        };
        let kind = state_kind(&address, &entry.kind)?;
        match kind.read(client, &entry.spec).await? {
            Some(spec) => entry.spec = spec,
            None => {
                warn!("{} no longer exists on the site", address);
                state.remove(&address);
                gone.push(address);
            }
        }
    }

    Ok(gone)
}

/// Check an import request against the state without contacting Wiki.js
pub(crate) fn import_target(state: &StateFile, address: &str, id: i64) -> Result<(ResourceType, Value)> {
    let (kind_name, _) = parse_address(address)?;
    let kind = ResourceType::from_name(kind_name).map_err(|e| at_address(address, e))?;

    if state.get(address).is_some() {
        return Err(WikiError::Validation(format!(
            "{} is already in the state",
            address
        )));
    }
    let spec = kind.import(id).ok_or_else(|| {
        WikiError::Validation(format!("{} resources cannot be imported", kind.name()))
    })?;
    Ok((kind, spec))
}

/// Adopt an existing page or group into the state under `address`
pub async fn import(client: &WikiClient, state: &mut StateFile, address: &str, id: i64) -> Result<()> {
    let (kind, spec) = import_target(state, address, id)?;

    match kind.read(client, &spec).await? {
        Some(spec) => {
            info!("Imported {} {} as {}", kind.name(), id, address);
            state.insert(address, kind.name(), spec);
            Ok(())
        }
        None => Err(WikiError::Validation(format!(
            "there is no {} with id {}",
            kind.name(),
            id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{destroy_plan, plan, Manifest};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SITE: &str = "https://wiki.example.com";

    fn succeeded() -> serde_json::Value {
        json!({ "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" } })
    }

    fn group_body(id: i64, name: &str) -> serde_json::Value {
        json!({
            "data": { "groups": { "single": {
                "id": id, "name": name, "isSystem": false, "redirectOnLogin": "/",
                "permissions": ["read:pages"], "pageRules": [],
                "createdAt": "2026-01-01T00:00:00Z", "updatedAt": "2026-01-01T00:00:00Z"
            }}}
        })
    }

    async fn mount_group_create(mock_server: &MockServer, id: i64) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "CreateGroup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "create": {
                    "responseResult": { "succeeded": true, "errorCode": 0, "slug": "ok", "message": "" },
                    "group": { "id": id, "name": "Editors", "isSystem": false,
                               "createdAt": "2026-01-01T00:00:00Z", "updatedAt": "2026-01-01T00:00:00Z" }
                }}}
            })))
            .expect(1)
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "UpdateGroup", "variables": { "id": id } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "update": succeeded() } }
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_apply_creates_and_persists() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());
        mount_group_create(&mock_server, 9).await;

        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let mut state = StateFile::new(SITE);

        let manifest = Manifest::parse(
            "resources:\n  - { name: editors, type: group, spec: { name: Editors, permissions: [\"read:pages\"] } }\n",
        )
        .unwrap();
        let changes = plan(&client, &manifest, &mut state).await.unwrap();
        let report = apply(&client, &changes, &mut state, &store).await.unwrap();

        assert_eq!(report.changed, 1);
        assert!(report.warnings.is_empty());
        let saved = store.load(SITE).unwrap();
        assert_eq!(saved.get("group.editors").unwrap().spec["id"], 9);
        assert_eq!(saved, state);
    }

    #[tokio::test]
    async fn test_apply_stops_at_first_error_keeping_earlier_steps() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());
        mount_group_create(&mock_server, 9).await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "SetApiState" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "authentication": { "setApiState": {
                    "responseResult": { "succeeded": false, "errorCode": 1, "slug": "ERR_FORBIDDEN", "message": "Forbidden" }
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let mut state = StateFile::new(SITE);

        let manifest = Manifest::parse(
            r#"
resources:
  - { name: editors, type: group, spec: { name: Editors, permissions: [] } }
  - { name: main, type: api, spec: { enabled: true } }
"#,
        )
        .unwrap();
        let changes = plan(&client, &manifest, &mut state).await.unwrap();
        let err = apply(&client, &changes, &mut state, &store).await.unwrap_err();

        assert!(matches!(err, WikiError::Rejected { .. }));
        let saved = store.load(SITE).unwrap();
        assert!(saved.get("group.editors").is_some());
        assert!(saved.get("api.main").is_none());
    }

    #[tokio::test]
    async fn test_destroy_forgets_settings_with_warning() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "DeleteGroup", "variables": { "id": 7 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "delete": succeeded() } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let mut state = StateFile::new(SITE);
        state.insert(
            "group.editors",
            "group",
            json!({ "id": 7, "name": "Editors", "permissions": [] }),
        );
        state.insert("theme_config.main", "theme_config", json!({}));

        let changes = destroy_plan(&state).unwrap();
        let report = apply(&client, &changes, &mut state, &store).await.unwrap();

        assert_eq!(report.changed, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("theme_config.main:"));
        assert!(store.load(SITE).unwrap().resources.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_drops_gone_entries() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetGroup", "variables": { "id": 7 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_body(7, "Renamed")))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetGroup", "variables": { "id": 8 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "groups": { "single": null } }
            })))
            .mount(&mock_server)
            .await;

        let mut state = StateFile::new(SITE);
        state.insert("group.a", "group", json!({ "id": 7, "name": "A", "permissions": [] }));
        state.insert("group.b", "group", json!({ "id": 8, "name": "B", "permissions": [] }));

        let gone = refresh(&client, &mut state).await.unwrap();
        assert_eq!(gone, vec!["group.b"]);
        assert_eq!(state.get("group.a").unwrap().spec["name"], "Renamed");
    }

    #[tokio::test]
    async fn test_import_page() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "GetPage", "variables": { "id": 12 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "pages": { "single": {
                    "id": 12, "path": "home", "hash": "h", "title": "Home", "description": "",
                    "isPrivate": false, "isPublished": true, "privateNS": null,
                    "publishStartDate": "", "publishEndDate": "", "tags": [],
                    "content": "Hi", "editor": "markdown", "locale": "en",
                    "createdAt": "2026-01-01T00:00:00Z", "creatorId": 1,
                    "creatorName": "Admin", "creatorEmail": "admin@example.com"
                }}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut state = StateFile::new(SITE);
        import(&client, &mut state, "page.home", 12).await.unwrap();

        let entry = state.get("page.home").unwrap();
        assert_eq!(entry.kind, "page");
        assert_eq!(entry.spec["path"], "home");
        assert_eq!(entry.spec["id"], 12);
    }

    #[tokio::test]
    async fn test_import_unsupported_type_makes_no_network_call() {
        let mock_server = MockServer::start().await;
        let client = WikiClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut state = StateFile::new(SITE);
        let err = import(&client, &mut state, "site_config.main", 1).await.unwrap_err();
        assert!(matches!(err, WikiError::Validation(_)));
        let err = import(&client, &mut state, "home", 1).await.unwrap_err();
        assert!(matches!(err, WikiError::Validation(_)));
    }
}
