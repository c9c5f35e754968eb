use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Coordinate, MapGrid, Route},
    error::ErrorBody,
    protocol::{
        FindRouteRequest, FindRouteResponse, ResolveRoomRequest, FIND_ROUTE_PATH,
        PRINT_MAP_PATH, RESOLVE_ROOM_PATH,
    },
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod state;
pub mod view;

pub use error::{NavigationError, ServiceError};
pub use state::UiState;
pub use view::{render, render_parts, View};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The three contracts offered by the external routing service.
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn resolve_room(&self, room_name: &str) -> Result<Coordinate, ServiceError>;
    async fn find_route(&self, start_room: &str, end_room: &str) -> Result<Route, ServiceError>;
    async fn fetch_map(&self) -> Result<MapGrid, ServiceError>;
}

/// Validates a service URL and strips the trailing slash so paths can be appended.
///
/// Queries and fragments are rejected since endpoint paths are appended to the end.
pub fn normalize_service_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("invalid service url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "service url '{raw}' must use http or https, not '{}'",
            parsed.scheme()
        ));
    }
    if parsed.host_str().is_none() {
        return Err(anyhow!("service url '{raw}' has no host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(anyhow!(
            "service url '{raw}' must not carry a query or fragment"
        ));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub struct HttpRoutingService {
    http: Client,
    service_url: String,
}

impl HttpRoutingService {
    pub fn new(service_url: &str, request_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            service_url: normalize_service_url(service_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.service_url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message());
        return Err(ServiceError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    serde_json::from_slice(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
}

#[async_trait]
impl RoutingService for HttpRoutingService {
    async fn resolve_room(&self, room_name: &str) -> Result<Coordinate, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(RESOLVE_ROOM_PATH))
            .json(&ResolveRoomRequest {
                room_name: room_name.to_string(),
            })
            .send()
            .await?;
        read_json(response).await
    }

    async fn find_route(&self, start_room: &str, end_room: &str) -> Result<Route, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(FIND_ROUTE_PATH))
            .json(&FindRouteRequest {
                start_room: start_room.to_string(),
                end_room: end_room.to_string(),
            })
            .send()
            .await?;
        let body: FindRouteResponse = read_json(response).await?;
        Ok(body.route)
    }

    async fn fetch_map(&self) -> Result<MapGrid, ServiceError> {
        let response = self.http.get(self.endpoint(PRINT_MAP_PATH)).send().await?;
        read_json(response).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    RouteUpdated { cycle: u64 },
    MapUpdated,
    MapFetchFailed(String),
}

/// Drives the route and map flows against a [`RoutingService`] and owns the [`UiState`].
pub struct NavigatorClient {
    service: Arc<dyn RoutingService>,
    state: Mutex<UiState>,
    events: broadcast::Sender<ClientEvent>,
}

impl NavigatorClient {
    pub fn new(service: Arc<dyn RoutingService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            state: Mutex::new(UiState::default()),
            events,
        })
    }

    pub fn connect(service_url: &str, request_timeout: Duration) -> Result<Arc<Self>> {
        let service = HttpRoutingService::new(service_url, request_timeout)?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> UiState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> View {
        render(&*self.state.lock().await)
    }

    /// Runs one orchestration cycle. The outcome lands in [`UiState`]; nothing is returned.
    pub async fn find_route(&self, start_room: &str, end_room: &str) {
        let cycle = self
            .state
            .lock()
            .await
            .begin_cycle(start_room, end_room);
        let _ = self.events.send(ClientEvent::RouteUpdated { cycle });
        info!(cycle, start_room, end_room, "route: cycle started");

        let (start, end) = future::join(
            self.service.resolve_room(start_room),
            self.service.resolve_room(end_room),
        )
        .await;

        let resolved = start
            .map_err(|source| NavigationError::Resolution {
                room: start_room.to_string(),
                source,
            })
            .and_then(|start| {
                end.map(|end| (start, end))
                    .map_err(|source| NavigationError::Resolution {
                        room: end_room.to_string(),
                        source,
                    })
            });

        match resolved {
            Ok((start, end)) => {
                debug!(cycle, ?start, ?end, "route: both rooms resolved");
            }
            Err(err) => {
                warn!(cycle, error = %err, "route: room resolution failed");
                self.commit_route(cycle, |state| state.apply_resolution_failure(&err))
                    .await;
                return;
            }
        }

        let result = self
            .service
            .find_route(start_room, end_room)
            .await
            .map_err(NavigationError::RouteComputation);
        match &result {
            Ok(route) if route.is_empty() => info!(cycle, "route: no route found"),
            Ok(route) => info!(cycle, steps = route.len(), "route: route computed"),
            Err(err) => warn!(cycle, error = %err, "route: route computation failed"),
        }
        self.commit_route(cycle, |state| state.apply_route_result(result))
            .await;
    }

    async fn commit_route(&self, cycle: u64, apply: impl FnOnce(&mut UiState)) {
        {
            let mut state = self.state.lock().await;
            if !state.is_current(cycle) {
                warn!(
                    cycle,
                    current = state.cycle(),
                    "route: discarding result of superseded cycle"
                );
                return;
            }
            apply(&mut *state);
        }
        let _ = self.events.send(ClientEvent::RouteUpdated { cycle });
    }

    /// Loads the whole map. A failure leaves the previously loaded map on display.
    pub async fn fetch_map(&self) {
        let result = self
            .service
            .fetch_map()
            .await
            .map_err(NavigationError::MapFetch);
        let event = match &result {
            Ok(map) => {
                info!(floors = map.floors().len(), "map: loaded");
                ClientEvent::MapUpdated
            }
            Err(err) => {
                warn!(error = %err, "map: fetch failed, keeping previous map");
                ClientEvent::MapFetchFailed(err.display_message())
            }
        };
        self.state.lock().await.apply_map_result(result);
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
