use http::{Method, Request, Response, StatusCode};
use serde::Serialize;

use crate::config::ListConfig;
use crate::error::ListError;
use crate::links::resolve_toggle;
use crate::render::{LinkSpec, LinkView, ToggleView};
use crate::service::{RecordSource, SortService};

pub struct ListHttp<S: RecordSource> {
    config: ListConfig,
    service: SortService,
    source: S,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub records: Vec<serde_json::Value>,
    pub total: u64,
    pub is_ordered: bool,
    pub toggles: Vec<LinkSpec>,
}

impl<S: RecordSource> ListHttp<S> {
    pub fn new(config: ListConfig, source: S) -> Result<Self, ListError> {
        config.validate()?;
        let service = SortService::new(config.sorter.clone())?;
        Ok(Self {
            config,
            service,
            source,
        })
    }

    pub fn handle(&self, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let path = req.uri().path();
        let method = req.method();

        match (method, path.trim_end_matches('/')) {
            (&Method::GET, "/config") => self.get_config(),
            (&Method::GET, "/data") => self.get_data(&req),
            _ => json_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#),
        }
    }

    fn get_config(&self) -> Response<Vec<u8>> {
        match serde_json::to_vec(&self.config) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        }
    }

    fn get_data(&self, req: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let query = req.uri().query().unwrap_or("");
        let full_path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        match self.execute(query, full_path) {
            Ok(response) => match serde_json::to_vec(&response) {
                Ok(body) => json_response(StatusCode::OK, body),
                Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
            },
            Err(e) => error_response(e.status_code(), &e.to_string()),
        }
    }

    fn execute(&self, query: &str, full_path: &str) -> Result<ListResponse, ListError> {
        let ordered =
            self.service
                .fetch_ordered(&self.source, query, self.config.with.as_deref())?;

        // Every authored toggle is resolved against the request's own
        // path-and-query, so each link advances its own cycle while the
        // others keep their state.
        let mut toggles = Vec::with_capacity(self.config.toggles.len());
        for toggle_config in &self.config.toggles {
            let toggle = resolve_toggle(
                &self.service,
                full_path,
                toggle_config.with.as_deref(),
                &toggle_config.by,
            )?;
            toggles.push(LinkView::default().present(&toggle, &toggle_config.label)?);
        }

        let total = ordered.records.len() as u64;
        Ok(ListResponse {
            records: ordered.records,
            total,
            is_ordered: ordered.is_ordered,
            toggles,
        })
    }
}

fn json_response(status: StatusCode, body: impl Into<Vec<u8>>) -> Response<Vec<u8>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn error_response(status: StatusCode, message: &str) -> Response<Vec<u8>> {
    let body = serde_json::json!({ "error": message });
    json_response(status, body.to_string().into_bytes())
}
