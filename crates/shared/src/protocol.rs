use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Route};

pub const RESOLVE_ROOM_PATH: &str = "/get_room_coordinates";
pub const FIND_ROUTE_PATH: &str = "/find_route";
pub const PRINT_MAP_PATH: &str = "/print_map";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRoomRequest {
    pub room_name: String,
}

pub type ResolveRoomResponse = Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRouteRequest {
    pub start_room: String,
    pub end_room: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindRouteResponse {
    /// Absent and `null` both mean "no route found".
    #[serde(default, deserialize_with = "nullable_route")]
    pub route: Route,
}

fn nullable_route<'de, D>(deserializer: D) -> Result<Route, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Route>::deserialize(deserializer)?.unwrap_or_default())
}
