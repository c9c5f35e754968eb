//! Pure rendering of navigator state into displayable panels.

use std::{collections::HashSet, fmt};

use shared::domain::{MapGrid, RouteStep};

use crate::state::UiState;

pub const IDLE_MESSAGE: &str = "Enter a start and end room to find a route.";
pub const NO_ROUTE_MESSAGE: &str = "No route found.";
pub const LOADING_MESSAGE: &str = "Loading map...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePanel {
    Idle,
    NoRouteFound,
    Steps(Vec<String>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub token: String,
    pub on_route: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorView {
    pub title: String,
    pub rows: Vec<Vec<CellView>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapPanel {
    Loading,
    Floors(Vec<FloorView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub route: RoutePanel,
    pub map: MapPanel,
}

pub fn render(state: &UiState) -> View {
    render_parts(&state.map, state.route.as_deref(), state.error.as_deref())
}

/// An error always wins over a route so a stale route is never shown beside it.
pub fn render_parts(map: &MapGrid, route: Option<&[RouteStep]>, error: Option<&str>) -> View {
    let route_panel = match (error, route) {
        (Some(message), _) => RoutePanel::Error(message.to_string()),
        (None, None) => RoutePanel::Idle,
        (None, Some([])) => RoutePanel::NoRouteFound,
        (None, Some(steps)) => RoutePanel::Steps(steps.iter().map(RouteStep::to_string).collect()),
    };

    let highlighted: HashSet<(i64, i64, i64)> = match (&route_panel, route) {
        (RoutePanel::Steps(_), Some(steps)) => {
            steps.iter().map(|step| (step.floor, step.x, step.y)).collect()
        }
        _ => HashSet::new(),
    };

    View {
        route: route_panel,
        map: render_map(map, &highlighted),
    }
}

fn render_map(map: &MapGrid, highlighted: &HashSet<(i64, i64, i64)>) -> MapPanel {
    if map.is_empty() {
        return MapPanel::Loading;
    }
    let floors = map
        .floors()
        .iter()
        .enumerate()
        .map(|(floor_index, floor)| FloorView {
            title: format!("Floor {floor_index}"),
            rows: floor
                .rows()
                .iter()
                .enumerate()
                .map(|(x, row)| {
                    row.cells()
                        .iter()
                        .enumerate()
                        .map(|(y, cell)| CellView {
                            token: cell.as_str().to_string(),
                            on_route: highlighted.contains(&(
                                floor_index as i64,
                                x as i64,
                                y as i64,
                            )),
                        })
                        .collect()
                })
                .collect(),
        })
        .collect();
    MapPanel::Floors(floors)
}

impl fmt::Display for RoutePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => writeln!(f, "{IDLE_MESSAGE}"),
            Self::NoRouteFound => writeln!(f, "{NO_ROUTE_MESSAGE}"),
            Self::Error(message) => writeln!(f, "Error: {message}"),
            Self::Steps(steps) => {
                writeln!(f, "Route:")?;
                for (index, step) in steps.iter().enumerate() {
                    writeln!(f, "  {}. {step}", index + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for FloorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let width = self
            .rows
            .iter()
            .flatten()
            .map(|cell| cell.token.chars().count())
            .max()
            .unwrap_or(0);
        for row in &self.rows {
            let mut line = String::from(" ");
            for cell in row {
                let marker = if cell.on_route { '*' } else { ' ' };
                line.push(' ');
                line.push_str(&format!("{:<width$}{marker}", cell.token));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Display for MapPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            Self::Floors(floors) => {
                for floor in floors {
                    write!(f, "{floor}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route)?;
        writeln!(f)?;
        writeln!(f, "Map:")?;
        write!(f, "{}", self.map)
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
