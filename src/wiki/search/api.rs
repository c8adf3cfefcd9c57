//! Search engine API operations

use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::wiki::{MutationStatus, WikiClient};

use super::models::{SearchEngine, SearchEngineInput};

const GET_SEARCH_ENGINES: &str = r#"
query GetSearchEngines {
  search {
    searchEngines {
      key
      isEnabled
      title
      description
      isAvailable
      config { key value }
    }
  }
}"#;

const UPDATE_SEARCH_ENGINES: &str = r#"
mutation UpdateSearchEngines($engines: [SearchEngineInput]) {
  search {
    updateSearchEngines(engines: $engines) {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

const REBUILD_INDEX: &str = r#"
mutation RebuildSearchIndex {
  search {
    rebuildIndex {
      responseResult { succeeded errorCode slug message }
    }
  }
}"#;

#[derive(Deserialize)]
struct Data<T> {
    search: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEngines {
    #[serde(default, deserialize_with = "crate::wiki::null_as_default")]
    search_engines: Vec<SearchEngine>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSearchEngines {
    update_search_engines: MutationStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RebuildIndex {
    rebuild_index: MutationStatus,
}

impl WikiClient {
    /// Get all search engines in the order Wiki.js returns them
    pub async fn get_search_engines(&self) -> Result<Vec<SearchEngine>> {
        let data: Data<SearchEngines> = self
            .graphql("GetSearchEngines", GET_SEARCH_ENGINES, json!({}))
            .await?;
        debug!("Fetched {} search engines", data.search.search_engines.len());
        Ok(data.search.search_engines)
    }

    /// Replace search engine settings
    pub async fn update_search_engines(&self, engines: &[SearchEngineInput]) -> Result<()> {
        let data: Data<UpdateSearchEngines> = self
            .graphql(
                "UpdateSearchEngines",
                UPDATE_SEARCH_ENGINES,
                json!({ "engines": engines }),
            )
            .await?;
        data.search
            .update_search_engines
            .response_result
            .ensure_succeeded("Update search engines")
    }

    /// Rebuild the search index of the active engine
    pub async fn rebuild_search_index(&self) -> Result<()> {
        info!("Rebuilding search index");
        let data: Data<RebuildIndex> = self
            .graphql("RebuildSearchIndex", REBUILD_INDEX, json!({}))
            .await?;
        data.search
            .rebuild_index
            .response_result
            .ensure_succeeded("Rebuild search index")
    }
}
