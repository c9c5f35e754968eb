use super::*;
use crate::error::ServiceError;
use shared::domain::{Cell, Floor, Row, RouteStep};

fn not_found(detail: &str) -> ServiceError {
    ServiceError::Status {
        status: 404,
        detail: Some(detail.to_string()),
    }
}

fn one_cell_map(token: &str) -> MapGrid {
    MapGrid(vec![Floor(vec![Row(vec![Cell::from(token)])])])
}

#[test]
fn begin_cycle_clears_previous_outcome() {
    let mut state = UiState {
        error: Some("Room not found".into()),
        ..UiState::default()
    };

    let cycle = state.begin_cycle("RoomA", "RoomB");

    assert_eq!(cycle, 1);
    assert_eq!(state.error, None);
    assert_eq!(state.route, None);
    assert_eq!(state.start_room_name, "RoomA");
    assert_eq!(state.end_room_name, "RoomB");
    assert!(state.is_current(cycle));

    let next = state.begin_cycle("RoomA", "RoomC");
    assert_eq!(next, 2);
    assert!(!state.is_current(cycle));
}

#[test]
fn resolution_failure_prefers_service_detail() {
    let mut state = UiState::default();
    state.begin_cycle("Nonexistent", "RoomB");

    state.apply_resolution_failure(&NavigationError::Resolution {
        room: "Nonexistent".into(),
        source: not_found("Room not found"),
    });

    assert_eq!(state.error.as_deref(), Some("Room not found"));
    assert_eq!(state.route, None);
}

#[test]
fn resolution_failure_without_detail_names_the_room() {
    let mut state = UiState::default();
    state.apply_resolution_failure(&NavigationError::Resolution {
        room: "Lab9".into(),
        source: ServiceError::Malformed("expected struct Coordinate".into()),
    });
    assert_eq!(state.error.as_deref(), Some("Room 'Lab9' could not be resolved"));
}

#[test]
fn outage_during_resolution_blames_the_service_not_the_room() {
    for source in [
        ServiceError::Transport("connection refused".into()),
        ServiceError::Timeout,
    ] {
        let mut state = UiState::default();
        state.apply_resolution_failure(&NavigationError::Resolution {
            room: "Lab9".into(),
            source,
        });
        assert_eq!(state.error.as_deref(), Some("Routing service unavailable"));
    }

    let mut state = UiState::default();
    state.apply_route_result(Err(NavigationError::RouteComputation(ServiceError::Timeout)));
    assert_eq!(state.error.as_deref(), Some("Routing service unavailable"));
}

#[test]
fn route_success_clears_error_and_failure_clears_route() {
    let mut state = UiState::default();

    state.apply_route_result(Ok(vec![RouteStep::new(0, 1, 1)]));
    assert_eq!(state.route, Some(vec![RouteStep::new(0, 1, 1)]));
    assert_eq!(state.error, None);

    state.apply_route_result(Err(NavigationError::RouteComputation(
        ServiceError::Status {
            status: 500,
            detail: None,
        },
    )));
    assert_eq!(state.route, None);
    assert_eq!(state.error.as_deref(), Some("An error occurred in findRoute"));
}

#[test]
fn empty_route_is_not_an_error() {
    let mut state = UiState::default();
    state.apply_route_result(Ok(Vec::new()));
    assert_eq!(state.route, Some(Vec::new()));
    assert_eq!(state.error, None);
}

#[test]
fn map_failure_keeps_previous_map() {
    let mut state = UiState::default();
    state.apply_map_result(Ok(one_cell_map("W")));

    state.apply_map_result(Err(NavigationError::MapFetch(ServiceError::Timeout)));

    assert_eq!(state.map, one_cell_map("W"));
}
