// Dashboard domain models
use super::drill_through::DrillThroughConfig;
use serde::{Deserialize, Serialize};

/// A single free-text label attached to a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawTag {
    pub tag: String,
}

#[cfg(test)]
impl RawTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Dashboard row as returned by the resource API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

impl DashboardRecord {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: tags.iter().map(|t| RawTag::new(*t)).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.tag == tag)
    }
}

/// Dashboard reachable directly from primary navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabEntry {
    pub id: String,
    pub name: String,
}

impl TabEntry {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

/// Drill-through dashboard whose tags could not be turned into a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDashboard {
    pub id: String,
    pub name: String,
    pub error: String,
}

/// Outcome of one derivation pass. Immutable once built; a new pass produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub tabs: Vec<TabEntry>,
    pub drill_throughs: Vec<DrillThroughConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedDashboard>,
}
