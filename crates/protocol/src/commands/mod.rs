//! Command types for driving the editor from a host application.

mod gizmo;

pub use gizmo::*;

use serde::{Deserialize, Serialize};

/// Camera control commands, forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraCommand {
    Orbit { delta_x: f32, delta_y: f32 },
    Pan { delta_x: f32, delta_y: f32 },
    Zoom { delta: f32 },
}
