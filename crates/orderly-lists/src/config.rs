use std::collections::BTreeMap;
use std::path::Path;

use orderly_query::SortExpression;
use serde::{Deserialize, Serialize};

use crate::error::ListError;

fn default_query_param() -> String {
    "sort".to_string()
}

/// What to do when the data layer rejects a resolved ordering.
///
/// `Ignore` falls back to the source's default order; `Propagate` surfaces
/// the failure to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnOrderingError {
    Propagate,
    #[default]
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SorterConfig {
    /// Base query-parameter name; qualified names derive from it.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Parameter name → glob allow-list for field references.
    pub criteria: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub on_ordering_error: OnOrderingError,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            query_param: default_query_param(),
            criteria: BTreeMap::new(),
            on_ordering_error: OnOrderingError::default(),
        }
    }
}

impl SorterConfig {
    pub fn validate(&self) -> Result<(), ListError> {
        if self.query_param.trim().is_empty() {
            return Err(ListError::Config(
                "query_param must not be empty".to_string(),
            ));
        }
        if self.criteria.is_empty() {
            return Err(ListError::Config(
                "the criteria table is empty; configure at least one sortable name".to_string(),
            ));
        }
        for name in self.criteria.keys() {
            if name.trim().is_empty() {
                return Err(ListError::Config(
                    "criteria entry with an empty name".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub id: String,
    pub title: String,
    /// Optional name qualifier the list's own records are ordered under.
    #[serde(default)]
    pub with: Option<String>,
    pub sorter: SorterConfig,
    #[serde(default)]
    pub toggles: Vec<ToggleConfig>,
}

/// One authored toggle control: a label, an optional name qualifier and the
/// ordered cycle of candidate orderings it advances through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    pub label: String,
    #[serde(default)]
    pub with: Option<String>,
    pub by: Vec<SortExpression>,
}

impl ListConfig {
    /// Load and validate a list configuration from a JSON file. Everything
    /// that can be wrong with authored configuration fails here, once,
    /// instead of per request.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ListError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ListError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: ListConfig = serde_json::from_str(&content)
            .map_err(|e| ListError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ListError> {
        self.sorter.validate()?;
        for toggle in &self.toggles {
            if toggle.label.trim().is_empty() {
                return Err(ListError::Config(format!(
                    "toggle in list {:?} has no label",
                    self.id
                )));
            }
            if toggle.by.is_empty() {
                return Err(ListError::Config(format!(
                    "toggle {:?} has no candidate orderings",
                    toggle.label
                )));
            }
            if toggle.by.iter().any(SortExpression::is_empty) {
                return Err(ListError::Config(format!(
                    "toggle {:?} has an empty candidate ordering",
                    toggle.label
                )));
            }
        }
        Ok(())
    }
}
