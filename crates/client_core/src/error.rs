//! Failure types for calls to the routing service and for orchestration stages.

use thiserror::Error;

pub const ROUTE_FALLBACK_MESSAGE: &str = "An error occurred in findRoute";
pub const MAP_FALLBACK_MESSAGE: &str = "Failed to fetch map";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Routing service unavailable";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("routing service unreachable: {0}")]
    Transport(String),
    #[error("routing service request timed out")]
    Timeout,
    #[error("routing service returned status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("malformed routing service response: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Detail supplied by the service itself, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The service never answered, so the failure says nothing about the rooms asked for.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("failed to resolve room '{room}': {source}")]
    Resolution { room: String, source: ServiceError },
    #[error("failed to compute route: {0}")]
    RouteComputation(ServiceError),
    #[error("failed to fetch map: {0}")]
    MapFetch(ServiceError),
}

impl NavigationError {
    pub fn source_error(&self) -> &ServiceError {
        match self {
            Self::Resolution { source, .. } => source,
            Self::RouteComputation(source) | Self::MapFetch(source) => source,
        }
    }

    /// Message safe to show in place of a route.
    pub fn display_message(&self) -> String {
        if let Some(detail) = self.source_error().detail() {
            return detail.to_string();
        }
        if self.source_error().is_unavailable() {
            return SERVICE_UNAVAILABLE_MESSAGE.to_string();
        }
        match self {
            Self::Resolution { room, .. } => format!("Room '{room}' could not be resolved"),
            Self::RouteComputation(_) => ROUTE_FALLBACK_MESSAGE.to_string(),
            Self::MapFetch(_) => MAP_FALLBACK_MESSAGE.to_string(),
        }
    }
}
