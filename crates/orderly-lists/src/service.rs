use orderly_query::{CriteriaTable, SortExpression};
use serde::Serialize;

use crate::config::{OnOrderingError, SorterConfig};
use crate::error::ListError;
use crate::request::{query_param_name, query_value};

/// Ordering error raised by a record source.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingError(pub String);

impl std::fmt::Display for OrderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ordering error: {}", self.0)
    }
}

impl std::error::Error for OrderingError {}

/// Trait for fetching records with an ordering applied.
///
/// Consumers implement this to connect the sort layer to their data store.
/// The resolved keys are handed over as ordering directives and never
/// interpreted here; field existence and tie-breaking belong to the source.
/// An empty expression asks for the source's default order.
pub trait RecordSource: Send + Sync {
    fn fetch(&self, ordering: &SortExpression) -> Result<Vec<serde_json::Value>, OrderingError>;
}

/// A source with no records. Use when wiring a handler that only serves
/// configuration and toggles.
pub struct EmptySource;

impl RecordSource for EmptySource {
    fn fetch(&self, _ordering: &SortExpression) -> Result<Vec<serde_json::Value>, OrderingError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderedRecords {
    pub records: Vec<serde_json::Value>,
    pub is_ordered: bool,
}

/// Resolves request-supplied sort state against a compiled criteria table
/// and applies it through a [`RecordSource`].
#[derive(Debug)]
pub struct SortService {
    config: SorterConfig,
    table: CriteriaTable,
}

impl SortService {
    /// Validates the configuration and compiles its glob patterns, so a bad
    /// table fails at startup rather than on the first request.
    pub fn new(config: SorterConfig) -> Result<Self, ListError> {
        config.validate()?;
        let table = CriteriaTable::build(&config.criteria)?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// Resolve the permitted ordering for a request: derive the parameter
    /// name from the qualifier, read its value from the query string and
    /// filter it through the criteria table.
    pub fn ordering(&self, query: &str, qualifier: Option<&str>) -> SortExpression {
        let name = query_param_name(&self.config.query_param, qualifier);
        match query_value(query, &name) {
            Some(raw) => self.table.resolve(&name, &raw),
            None => SortExpression::default(),
        }
    }

    /// Fetch records with the resolved ordering applied.
    ///
    /// A source failure under a non-empty ordering follows the configured
    /// policy: `Propagate` fails the call, `Ignore` refetches in the
    /// source's default order. A failure on a default-order fetch always
    /// propagates; there is no further state to fall back to.
    pub fn fetch_ordered<S: RecordSource>(
        &self,
        source: &S,
        query: &str,
        qualifier: Option<&str>,
    ) -> Result<OrderedRecords, ListError> {
        let ordering = self.ordering(query, qualifier);
        if ordering.is_empty() {
            let records = source.fetch(&ordering)?;
            return Ok(OrderedRecords {
                records,
                is_ordered: false,
            });
        }
        match source.fetch(&ordering) {
            Ok(records) => Ok(OrderedRecords {
                records,
                is_ordered: true,
            }),
            Err(e) => match self.config.on_ordering_error {
                OnOrderingError::Propagate => Err(ListError::Ordering(e)),
                OnOrderingError::Ignore => {
                    let records = source.fetch(&SortExpression::default())?;
                    Ok(OrderedRecords {
                        records,
                        is_ordered: false,
                    })
                }
            },
        }
    }
}
