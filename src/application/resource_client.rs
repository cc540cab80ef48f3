// Client trait for dashboard resource retrieval
use crate::domain::dashboard::DashboardRecord;
use async_trait::async_trait;
use serde::Serialize;

/// Resource kind under which dashboards are stored.
pub const SECURABLE_RESOURCE: &str = "securable";

/// Query filter sent to the resource API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceFilter {
    #[serde(rename = "where")]
    pub where_clause: WhereClause,
    pub options: FilterOptions,
    pub attributes: Vec<String>,
    pub search: TagSearch,
    pub include: Vec<Include>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereClause {
    #[serde(rename = "type")]
    pub resource_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSearch {
    pub match_types: Vec<String>,
    pub keyphrase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    pub model: String,
    pub attributes: Vec<String>,
}

impl ResourceFilter {
    /// Non-public dashboards tagged with `keyphrase`, with their id, name and tags.
    pub fn dashboards_tagged(keyphrase: &str) -> Self {
        Self {
            where_clause: WhereClause {
                resource_type: "dashboard".to_string(),
            },
            options: FilterOptions { public: false },
            attributes: vec!["id".to_string(), "name".to_string()],
            search: TagSearch {
                match_types: vec!["tag".to_string()],
                keyphrase: keyphrase.to_string(),
            },
            include: vec![Include {
                model: "Tag".to_string(),
                attributes: vec!["tag".to_string()],
            }],
        }
    }
}

#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetch all rows of `resource` matching `filter`. A failure aborts the caller's pass.
    async fn query(
        &self,
        resource: &str,
        filter: &ResourceFilter,
    ) -> anyhow::Result<Vec<DashboardRecord>>;
}
