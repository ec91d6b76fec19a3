mod config;
mod error;
mod http;
mod links;
mod render;
mod request;
mod service;

pub use config::{ListConfig, OnOrderingError, SorterConfig, ToggleConfig};
pub use error::ListError;
pub use http::{ListHttp, ListResponse};
pub use links::{Toggle, resolve_toggle, sort_title};
pub use render::{FormSpec, FormView, LinkSpec, LinkView, ToggleView, UrlView};
pub use request::{query_param_name, query_value, set_query_param};
pub use service::{EmptySource, OrderedRecords, OrderingError, RecordSource, SortService};
