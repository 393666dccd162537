//! Outbound notifications from the editor core to a UI layer.

use serde::{Deserialize, Serialize};

use crate::commands::GizmoHandle;
use crate::error::ProtocolError;
use crate::types::{InstanceKey, ModelId, SceneId, SceneModelKey, Transform3D};

/// Messages from the editor core to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorEvent {
    ModelImported { id: ModelId, name: String },
    ModelRemoved { id: ModelId },

    /// A collision primitive candidate was selected for baking
    PrimitiveSelected {
        model: ModelId,
        dimension: PrimitiveDimension,
        index: usize,
        name: String,
    },

    /// The parameters of a model's selected primitive changed
    PrimitiveEdited {
        model: ModelId,
        dimension: PrimitiveDimension,
    },

    SceneAdded { id: SceneId, name: String },
    SceneRemoved { id: SceneId },

    SceneModelAdded(SceneModelKey),
    SceneModelRemoved(SceneModelKey),

    InstanceAdded(InstanceKey),
    InstanceRemoved(InstanceKey),

    /// Instance transform changed through the property-editing surface.
    /// Gizmo drags do not emit this.
    InstanceTransformChanged {
        key: InstanceKey,
        transform: Transform3D,
    },

    InstanceVisibilityChanged { key: InstanceKey, visible: bool },

    SelectionChanged { selected: Option<InstanceKey> },

    GizmoHandleChanged { handle: GizmoHandle },
}

/// Which slot a collision primitive occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveDimension {
    TwoD,
    ThreeD,
}

impl EditorEvent {
    /// Encode as the JSON string sent to the UI
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Queue of events to send to the UI.
/// The host application should drain this after each input event.
#[derive(Debug, Default)]
pub struct OutboundEvents {
    events: Vec<EditorEvent>,
}

impl OutboundEvents {
    /// Queue an event to be sent to the UI
    pub fn send(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    /// Take all queued events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn peek(&self) -> &[EditorEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
