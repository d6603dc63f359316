//! Drawing commands for a resource allocation graph picture.
//!
//! [`draw`] is a pure function from `(graph, detection, layout)` to a list of
//! [`DrawCommand`]s. A front end (canvas, SVG writer, terminal plotter)
//! replays the commands in order; nothing here holds window or graphics
//! state.
//!
//! # Layout
//!
//! Processes sit on a circle around the centre starting at angle π,
//! resources on the same circle starting at angle 0, each kind evenly
//! spaced. Edges are drawn first, then nodes on top, then the verdict
//! banner and the legend.

#![allow(clippy::cast_precision_loss)]

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use rag_core::{Detection, EdgeKind, NodeKind, ResourceAllocationGraph};
use serde::{Deserialize, Serialize};

pub const DEADLOCK_BANNER: &str = "DEADLOCK DETECTED";
pub const NO_DEADLOCK_BANNER: &str = "NO DEADLOCK";
pub const ASSIGNMENT_LEGEND: &str = "Blue arrows: assignment edge (R → P)";
pub const REQUEST_LEGEND: &str = "Red arrows: request edge (P → R)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Radius of the circle nodes are placed on.
    pub radius: f64,
    /// Diameter of process circles and side of resource squares.
    pub node_size: f64,
    /// Length of the arrow head sides.
    pub arrow_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            radius: 150.0,
            node_size: 60.0,
            arrow_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Blue,
    Red,
    Green,
    LightGray,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Edge line with a filled triangular head at `to`.
    Arrow {
        from: Point,
        to: Point,
        head: [Point; 3],
        color: Color,
        /// `true` if this edge belongs to the reported cycle.
        on_cycle: bool,
    },
    /// Process node.
    Circle {
        id: String,
        center: Point,
        diameter: f64,
        fill: Color,
        stroke: Color,
    },
    /// Resource node.
    Square {
        id: String,
        center: Point,
        side: f64,
        fill: Color,
        stroke: Color,
    },
    Text {
        text: String,
        at: Point,
        size: u32,
        color: Color,
        centered: bool,
    },
}

/// Node positions keyed by id.
pub fn layout(graph: &ResourceAllocationGraph, config: &LayoutConfig) -> HashMap<String, Point> {
    let center = Point {
        x: config.width / 2.0,
        y: config.height / 2.0,
    };
    let mut positions = HashMap::with_capacity(graph.node_count());

    for (kind, start_angle) in [(NodeKind::Process, PI), (NodeKind::Resource, 0.0)] {
        let ids = graph.nodes_by_kind(kind);
        let step = 2.0 * PI / ids.len().max(1) as f64;
        for (i, id) in ids.into_iter().enumerate() {
            let angle = (i as f64).mul_add(step, start_angle);
            positions.insert(
                id.to_string(),
                Point {
                    x: config.radius.mul_add(angle.cos(), center.x),
                    y: config.radius.mul_add(angle.sin(), center.y),
                },
            );
        }
    }

    positions
}

/// Produce the full picture for a graph and its detection result.
pub fn draw(
    graph: &ResourceAllocationGraph,
    detection: &Detection,
    config: &LayoutConfig,
) -> Vec<DrawCommand> {
    let positions = layout(graph, config);
    let cycle_edges: HashSet<(&str, &str)> = detection
        .cycle_path
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();

    let mut commands = Vec::with_capacity(graph.edge_count() + graph.node_count() + 3);

    for edge in graph.edges() {
        let (Some(&from), Some(&to)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
            continue;
        };
        let color = match edge.kind {
            EdgeKind::Assignment => Color::Blue,
            EdgeKind::Request => Color::Red,
        };
        commands.push(DrawCommand::Arrow {
            from,
            to,
            head: arrow_head(from, to, config.arrow_size),
            color,
            on_cycle: cycle_edges.contains(&(edge.from.as_str(), edge.to.as_str())),
        });
    }

    for node in graph.nodes() {
        let Some(&center) = positions.get(&node.id) else {
            continue;
        };
        commands.push(match node.kind {
            NodeKind::Process => DrawCommand::Circle {
                id: node.id.clone(),
                center,
                diameter: config.node_size,
                fill: Color::LightGray,
                stroke: Color::Black,
            },
            NodeKind::Resource => DrawCommand::Square {
                id: node.id.clone(),
                center,
                side: config.node_size,
                fill: Color::Yellow,
                stroke: Color::Black,
            },
        });
    }

    let (banner, banner_color) = if detection.has_cycle {
        (DEADLOCK_BANNER, Color::Red)
    } else {
        (NO_DEADLOCK_BANNER, Color::Green)
    };
    commands.push(DrawCommand::Text {
        text: banner.to_string(),
        at: Point {
            x: config.width / 2.0,
            y: 80.0,
        },
        size: 20,
        color: banner_color,
        centered: true,
    });
    for (text, offset) in [(ASSIGNMENT_LEGEND, 80.0), (REQUEST_LEGEND, 60.0)] {
        commands.push(DrawCommand::Text {
            text: text.to_string(),
            at: Point {
                x: 50.0,
                y: config.height - offset,
            },
            size: 12,
            color: Color::Black,
            centered: false,
        });
    }

    commands
}

/// Triangle with its tip at `to`, sides at ±π/6 from the edge direction.
fn arrow_head(from: Point, to: Point, size: f64) -> [Point; 3] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let side = |offset: f64| Point {
        x: size.mul_add(-(angle + offset).cos(), to.x),
        y: size.mul_add(-(angle + offset).sin(), to.y),
    };
    [to, side(-PI / 6.0), side(PI / 6.0)]
}
