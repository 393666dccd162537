//! Contracts between the Scenewright editor core and its collaborators.
//!
//! The core never rasterizes, picks or parses files itself. It talks to:
//! - a [`Renderer`] that owns meshes, scenes and instances and answers
//!   cursor/camera queries,
//! - an [`AssetImporter`] that decodes mesh files and writes imported assets,
//! - per-model and per-scene-model [`AssetGenerator`]s that receive the data
//!   baked into the engine-facing asset.
//!
//! Outbound notifications for a UI layer are expressed as [`EditorEvent`]s.

pub mod commands;
pub mod error;
pub mod geometry;
pub mod importer;
pub mod messages;
pub mod renderer;
pub mod types;

pub use commands::*;
pub use error::*;
pub use geometry::*;
pub use importer::*;
pub use messages::*;
pub use renderer::*;
pub use types::*;
