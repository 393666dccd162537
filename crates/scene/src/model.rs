//! Imported models and their collision primitive candidates.

use glam::{Quat, Vec2};
use scenewright_protocol::{
    AssetGenerator, AssetImporter, Color, EditorEvent, ImportedMesh, MeshHandle, ModelId,
    ModelInfo, OutboundEvents, PrimitiveDimension, Renderer,
};
use tracing::{debug, info};

use crate::bounds::MeshBounds;
use crate::error::EditorError;
use crate::primitives::{
    AvatarCache, BoxShape, CapsuleShape, CircleShape, CollisionPrimitive, CollisionPrimitive2D,
    CollisionPrimitive3D, RectShape, Shape2D, Shape3D, SphereShape, StadiumShape,
};

/// An imported mesh plus the collision shapes it may be baked with.
///
/// Candidate lists always start with the `None` shape, and exactly one
/// candidate per dimension is selected.
pub struct Model {
    id: ModelId,
    name: String,
    mesh: MeshHandle,
    bounds: MeshBounds,
    preview_rotation: Quat,
    primitives_3d: Vec<CollisionPrimitive3D>,
    primitives_2d: Vec<CollisionPrimitive2D>,
    selected_3d: usize,
    selected_2d: usize,
    asset_generator: Box<dyn AssetGenerator>,
}

impl Model {
    /// Upload an imported mesh and seed its collision candidates from the
    /// mesh bounds. Both selections start at `None`.
    pub fn new(
        id: ModelId,
        imported: ImportedMesh,
        renderer: &mut dyn Renderer,
        importer: &mut dyn AssetImporter,
        avatars: &AvatarCache,
    ) -> Self {
        let ImportedMesh { name, geometry } = imported;
        let bounds = MeshBounds::from_geometry(&geometry);
        let mesh = renderer.add_model(&geometry, Color::WHITE, bounds.sphere, true);
        let mut asset_generator = importer.model_asset_generator(&name);

        let primitives_3d = seed_primitives_3d(&bounds, avatars);
        let primitives_2d = seed_primitives_2d(&bounds, avatars);
        primitives_3d[0].assign_to(asset_generator.as_mut());
        primitives_2d[0].assign_to(asset_generator.as_mut());

        info!(
            "Imported model {} ({}) with bounding radius {:.3}",
            name, id, bounds.sphere.radius
        );

        Self {
            id,
            name,
            mesh,
            bounds,
            preview_rotation: Quat::IDENTITY,
            primitives_3d,
            primitives_2d,
            selected_3d: 0,
            selected_2d: 0,
            asset_generator,
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn bounds(&self) -> &MeshBounds {
        &self.bounds
    }

    /// Rotation of the model in a preview viewport; never baked
    pub fn preview_rotation(&self) -> Quat {
        self.preview_rotation
    }

    pub fn set_preview_rotation(&mut self, rotation: Quat) {
        self.preview_rotation = rotation;
    }

    pub fn primitives_3d(&self) -> &[CollisionPrimitive3D] {
        &self.primitives_3d
    }

    pub fn primitives_2d(&self) -> &[CollisionPrimitive2D] {
        &self.primitives_2d
    }

    pub fn selected_3d_index(&self) -> usize {
        self.selected_3d
    }

    pub fn selected_2d_index(&self) -> usize {
        self.selected_2d
    }

    pub fn selected_primitive_3d(&self) -> &CollisionPrimitive3D {
        &self.primitives_3d[self.selected_3d]
    }

    pub fn selected_primitive_2d(&self) -> &CollisionPrimitive2D {
        &self.primitives_2d[self.selected_2d]
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            id: self.id,
            name: self.name.clone(),
            primitive_3d: self.selected_primitive_3d().name().to_string(),
            primitive_2d: self.selected_primitive_2d().name().to_string(),
        }
    }

    /// Choose the 3D shape baked into the model asset.
    ///
    /// Returns `Ok(false)` when `index` was already selected.
    pub fn select_primitive_3d(
        &mut self,
        index: usize,
        events: &mut OutboundEvents,
    ) -> Result<bool, EditorError> {
        let primitive = self.primitives_3d.get(index).ok_or(EditorError::UnknownPrimitive {
            model: self.id,
            dimension: PrimitiveDimension::ThreeD,
            index,
        })?;
        if index == self.selected_3d {
            return Ok(false);
        }
        primitive.assign_to(self.asset_generator.as_mut());
        let name = primitive.name().to_string();
        self.selected_3d = index;
        debug!("Model {} selected 3D primitive {}", self.name, name);
        events.send(EditorEvent::PrimitiveSelected {
            model: self.id,
            dimension: PrimitiveDimension::ThreeD,
            index,
            name,
        });
        Ok(true)
    }

    /// Choose the 2D shape baked into the model asset
    pub fn select_primitive_2d(
        &mut self,
        index: usize,
        events: &mut OutboundEvents,
    ) -> Result<bool, EditorError> {
        let primitive = self.primitives_2d.get(index).ok_or(EditorError::UnknownPrimitive {
            model: self.id,
            dimension: PrimitiveDimension::TwoD,
            index,
        })?;
        if index == self.selected_2d {
            return Ok(false);
        }
        primitive.assign_to(self.asset_generator.as_mut());
        let name = primitive.name().to_string();
        self.selected_2d = index;
        debug!("Model {} selected 2D primitive {}", self.name, name);
        events.send(EditorEvent::PrimitiveSelected {
            model: self.id,
            dimension: PrimitiveDimension::TwoD,
            index,
            name,
        });
        Ok(true)
    }

    /// Edit the parameters of a 3D candidate.
    ///
    /// Edits to the selected candidate are pushed to the asset generator
    /// and announced with [`EditorEvent::PrimitiveEdited`].
    pub fn edit_primitive_3d(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Shape3D) -> bool,
        events: &mut OutboundEvents,
    ) -> Result<bool, EditorError> {
        let primitive = self
            .primitives_3d
            .get_mut(index)
            .ok_or(EditorError::UnknownPrimitive {
                model: self.id,
                dimension: PrimitiveDimension::ThreeD,
                index,
            })?;
        let changed = primitive.edit(edit);
        if changed && index == self.selected_3d {
            primitive.assign_to(self.asset_generator.as_mut());
            events.send(EditorEvent::PrimitiveEdited {
                model: self.id,
                dimension: PrimitiveDimension::ThreeD,
            });
        }
        Ok(changed)
    }

    pub fn edit_primitive_2d(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Shape2D) -> bool,
        events: &mut OutboundEvents,
    ) -> Result<bool, EditorError> {
        let primitive = self
            .primitives_2d
            .get_mut(index)
            .ok_or(EditorError::UnknownPrimitive {
                model: self.id,
                dimension: PrimitiveDimension::TwoD,
                index,
            })?;
        let changed = primitive.edit(edit);
        if changed && index == self.selected_2d {
            primitive.assign_to(self.asset_generator.as_mut());
            events.send(EditorEvent::PrimitiveEdited {
                model: self.id,
                dimension: PrimitiveDimension::TwoD,
            });
        }
        Ok(changed)
    }

    /// Release the renderer mesh and the asset generator
    pub fn dispose(mut self, renderer: &mut dyn Renderer) {
        renderer.remove_model(self.mesh);
        self.asset_generator.dispose();
        info!("Disposed model {} ({})", self.name, self.id);
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mesh", &self.mesh)
            .field("selected_3d", &self.selected_3d)
            .field("selected_2d", &self.selected_2d)
            .finish()
    }
}

fn seed_primitives_3d(bounds: &MeshBounds, avatars: &AvatarCache) -> Vec<CollisionPrimitive3D> {
    let capsule = &bounds.capsule;
    [
        Shape3D::None,
        Shape3D::Box(BoxShape::new(bounds.aabb.center(), bounds.aabb.size())),
        Shape3D::Sphere(SphereShape::new(bounds.sphere.center, bounds.sphere.radius)),
        Shape3D::Capsule(CapsuleShape::new(
            capsule.center,
            capsule.axis,
            capsule.height,
            capsule.radius,
        )),
    ]
    .into_iter()
    .map(|shape| CollisionPrimitive::new(shape, avatars))
    .collect()
}

/// 2D candidates use the XY footprint of the bounding box.
fn seed_primitives_2d(bounds: &MeshBounds, avatars: &AvatarCache) -> Vec<CollisionPrimitive2D> {
    let center = bounds.aabb.center().truncate();
    let size = bounds.aabb.size().truncate();

    let (axis, long, short) = if size.x >= size.y {
        (Vec2::X, size.x, size.y)
    } else {
        (Vec2::Y, size.y, size.x)
    };
    let radius = short * 0.5;

    [
        Shape2D::None,
        Shape2D::Rect(RectShape::new(center, size)),
        Shape2D::Circle(CircleShape::new(center, size.length() * 0.5)),
        Shape2D::Stadium(StadiumShape::new(
            center,
            axis,
            (long - 2.0 * radius).max(0.0),
            radius,
        )),
    ]
    .into_iter()
    .map(|shape| CollisionPrimitive::new(shape, avatars))
    .collect()
}
