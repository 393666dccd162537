//! Asset importer and asset generator contracts.

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::error::ImportError;
use crate::geometry::MeshGeometry;

/// A decoded mesh as returned by the importer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMesh {
    /// Model name, unique per importer
    pub name: String,
    pub geometry: MeshGeometry,
}

/// Receives the collision shape chosen for an asset.
///
/// Each dimensionality has a single slot: assigning replaces the previous
/// shape, clearing empties the slot.
pub trait CollisionSink {
    fn clear_collision_primitive_3d(&mut self);
    fn clear_collision_primitive_2d(&mut self);

    fn assign_collision_box(&mut self, center: Vec3, scale: Vec3);
    fn assign_collision_sphere(&mut self, center: Vec3, radius: f32);
    fn assign_collision_capsule(&mut self, center: Vec3, axis: Vec3, height: f32, radius: f32);

    fn assign_collision_rect(&mut self, center: Vec2, scale: Vec2);
    fn assign_collision_circle(&mut self, center: Vec2, radius: f32);
    fn assign_collision_stadium(&mut self, center: Vec2, axis: Vec2, height: f32, radius: f32);
}

/// Produces the engine-facing representation of a model or scene model.
pub trait AssetGenerator: CollisionSink {
    /// Upper bound of instances the engine should reserve
    fn set_instances_nr_max(&mut self, instances_nr_max: u32);

    fn set_is_static(&mut self, is_static: bool);

    /// Release generator resources; called exactly once
    fn dispose(&mut self);
}

/// Decodes external mesh files and writes imported assets.
pub trait AssetImporter {
    /// Decode the mesh at `path`. Importing a model whose name is already
    /// known returns the cached result without parsing again.
    fn import_model(&mut self, path: &Path) -> Result<ImportedMesh, ImportError>;

    /// Forget a previously imported model
    fn remove_model(&mut self, name: &str);

    /// Write every imported model below `destination`
    fn save_imported_models(&mut self, destination: &Path) -> Result<(), ImportError>;

    /// Generator for the asset of a single model
    fn model_asset_generator(&mut self, model_name: &str) -> Box<dyn AssetGenerator>;

    /// Generator for a model as used in a given scene
    fn scene_model_asset_generator(
        &mut self,
        scene_name: &str,
        model_name: &str,
    ) -> Box<dyn AssetGenerator>;
}
