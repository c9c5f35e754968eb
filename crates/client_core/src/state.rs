//! Displayable navigator state and the transitions the orchestration flows apply to it.

use shared::domain::{MapGrid, Route};

use crate::error::NavigationError;

/// State shown by the renderer.
///
/// After a cycle completes, `route` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub start_room_name: String,
    pub end_room_name: String,
    pub route: Option<Route>,
    pub error: Option<String>,
    pub map: MapGrid,
    cycle: u64,
}

impl UiState {
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Starts a new orchestration cycle and returns its generation.
    pub fn begin_cycle(&mut self, start_room_name: &str, end_room_name: &str) -> u64 {
        self.start_room_name = start_room_name.to_string();
        self.end_room_name = end_room_name.to_string();
        self.route = None;
        self.error = None;
        self.cycle += 1;
        self.cycle
    }

    pub fn is_current(&self, cycle: u64) -> bool {
        self.cycle == cycle
    }

    pub fn apply_resolution_failure(&mut self, err: &NavigationError) {
        self.error = Some(err.display_message());
        self.route = None;
    }

    pub fn apply_route_result(&mut self, result: Result<Route, NavigationError>) {
        match result {
            Ok(route) => {
                self.route = Some(route);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message());
                self.route = None;
            }
        }
    }

    /// Replaces the map on success. A failed fetch keeps whatever was loaded before.
    pub fn apply_map_result(&mut self, result: Result<MapGrid, NavigationError>) {
        if let Ok(map) = result {
            self.map = map;
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
