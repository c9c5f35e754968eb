use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Grid position of a resolved room. `floor` indexes into [`MapGrid::floors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub floor: i64,
    pub x: i64,
    pub y: i64,
}

/// One occupied cell on a route. Travels on the wire as `[floor, x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i64, i64, i64)", into = "(i64, i64, i64)")]
pub struct RouteStep {
    pub floor: i64,
    pub x: i64,
    pub y: i64,
}

impl RouteStep {
    pub fn new(floor: i64, x: i64, y: i64) -> Self {
        Self { floor, x, y }
    }
}

impl From<(i64, i64, i64)> for RouteStep {
    fn from((floor, x, y): (i64, i64, i64)) -> Self {
        Self { floor, x, y }
    }
}

impl From<RouteStep> for (i64, i64, i64) {
    fn from(step: RouteStep) -> Self {
        (step.floor, step.x, step.y)
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Floor {}: ({},{})", self.floor, self.x, self.y)
    }
}

/// Ordered steps from start to end room. Empty means no path exists.
pub type Route = Vec<RouteStep>;

/// Atomic display token of the map (wall, corridor, stairs or a room name).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Cell(pub String);

impl Cell {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(token) => Self(token),
            Value::Null => Self(String::new()),
            other => Self(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Cell>);

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(cells) => Self(cells.into_iter().map(Cell::from_value).collect()),
            scalar => Self(vec![Cell::from_value(scalar)]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Floor(pub Vec<Row>);

impl Floor {
    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(rows) => Self(rows.into_iter().map(Row::from_value).collect()),
            scalar => Self(vec![Row::from_value(scalar)]),
        }
    }
}

/// Whole building as floors of row-major cell grids.
///
/// Decoding only insists on the outer array. Anything shallower than three
/// levels below it is wrapped so the grid can still be displayed, and non-string
/// cells fall back to their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MapGrid(pub Vec<Floor>);

impl MapGrid {
    pub fn floors(&self) -> &[Floor] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cell(&self, floor: i64, x: i64, y: i64) -> Option<&Cell> {
        let floor = self.0.get(usize::try_from(floor).ok()?)?;
        let row = floor.0.get(usize::try_from(x).ok()?)?;
        row.0.get(usize::try_from(y).ok()?)
    }

    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Array(floors) => Ok(Self(floors.into_iter().map(Floor::from_value).collect())),
            other => Err(format!(
                "expected an array of floors, found {}",
                value_kind(&other)
            )),
        }
    }
}

impl<'de> Deserialize<'de> for MapGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
