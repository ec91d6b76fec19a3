use std::fmt;

use orderly_query::{CycleError, PatternError};

use crate::service::OrderingError;

#[derive(Debug)]
pub enum ListError {
    Config(String),
    Toggle(CycleError),
    EmptyLabel,
    Ordering(OrderingError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Config(msg) => write!(f, "config error: {msg}"),
            ListError::Toggle(e) => write!(f, "{e}"),
            ListError::EmptyLabel => write!(f, "no label was specified"),
            ListError::Ordering(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ListError {}

impl ListError {
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ListError::Ordering(_) => http::StatusCode::BAD_REQUEST,
            ListError::Config(_) | ListError::Toggle(_) | ListError::EmptyLabel => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CycleError> for ListError {
    fn from(e: CycleError) -> Self {
        ListError::Toggle(e)
    }
}

impl From<PatternError> for ListError {
    fn from(e: PatternError) -> Self {
        ListError::Config(e.to_string())
    }
}

impl From<OrderingError> for ListError {
    fn from(e: OrderingError) -> Self {
        ListError::Ordering(e)
    }
}
