use orderly_query::{SortDirection, SortExpression, next_state};
use serde::Serialize;

use crate::error::ListError;
use crate::request::{query_param_name, query_value, set_query_param};
use crate::service::SortService;

/// A resolved toggle target: the state a control advances to next, and the
/// URL that selects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub param: String,
    pub next: SortExpression,
    pub url: String,
    pub title: String,
}

/// Resolve the next ordering state for a toggle control.
///
/// `full_path` is the request's path and query string. The current state is
/// read from it under the derived parameter name and advanced through
/// `candidates`; the outbound URL keeps every other parameter as-is.
/// Candidate lists are authored, not request-supplied, so they bypass the
/// criteria table. An empty list is an authoring error.
pub fn resolve_toggle(
    service: &SortService,
    full_path: &str,
    qualifier: Option<&str>,
    candidates: &[SortExpression],
) -> Result<Toggle, ListError> {
    let param = query_param_name(&service.config().query_param, qualifier);
    let query = full_path
        .split_once('?')
        .map(|(_, query)| query)
        .unwrap_or("");
    let current = query_value(query, &param)
        .map(|raw| SortExpression::parse(&raw))
        .unwrap_or_default();
    let next = next_state(&current, candidates)?.clone();
    let url = set_query_param(full_path, &param, &next.to_string());
    let title = sort_title(&next);
    Ok(Toggle {
        param,
        next,
        url,
        title,
    })
}

/// Describe an ordering for link titles, e.g.
/// `Sort by: 'created' (asc) and 'title' (desc)`.
pub fn sort_title(expr: &SortExpression) -> String {
    let parts: Vec<String> = expr
        .iter()
        .map(|key| {
            let direction = match key.direction() {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            format!("'{}' ({direction})", key.field())
        })
        .collect();
    format!("Sort by: {}", text_list(&parts))
}

/// Join items as an English list: `a`, `a and b`, `a, b and c`.
fn text_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}
