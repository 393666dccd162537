//! Collision primitive candidates attached to models.
//!
//! Shapes are closed enums ([`Shape3D`], [`Shape2D`]) carrying parameter
//! structs. A [`CollisionPrimitive`] pairs a shape with the avatars that draw
//! it; avatars are recomputed from the parameters after every edit.

mod avatar;
mod shapes;

pub use avatar::{Avatar, AvatarCache, AvatarTransform};
pub use shapes::{
    BoxShape, CapsuleShape, CircleShape, RectShape, Shape, Shape2D, Shape3D, SphereShape,
    StadiumShape,
};

use scenewright_protocol::CollisionSink;

/// Every collision primitive variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    None,
    Box,
    Sphere,
    Capsule,
    Rect,
    Circle,
    Stadium,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::None,
        PrimitiveKind::Box,
        PrimitiveKind::Sphere,
        PrimitiveKind::Capsule,
        PrimitiveKind::Rect,
        PrimitiveKind::Circle,
        PrimitiveKind::Stadium,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PrimitiveKind::None => "None",
            PrimitiveKind::Box => "Box",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Capsule => "Capsule",
            PrimitiveKind::Rect => "Rect",
            PrimitiveKind::Circle => "Circle",
            PrimitiveKind::Stadium => "Stadium",
        }
    }

    /// Icon resource id shown next to the name in a candidate list
    pub fn icon(self) -> &'static str {
        match self {
            PrimitiveKind::None => "icons/collision_none.png",
            PrimitiveKind::Box => "icons/collision_box.png",
            PrimitiveKind::Sphere => "icons/collision_sphere.png",
            PrimitiveKind::Capsule => "icons/collision_capsule.png",
            PrimitiveKind::Rect => "icons/collision_rect.png",
            PrimitiveKind::Circle => "icons/collision_circle.png",
            PrimitiveKind::Stadium => "icons/collision_stadium.png",
        }
    }
}

/// A shape together with its positioned avatars.
///
/// `Clone` is a deep value copy: the clone's parameters and avatar
/// transforms are independent of the original.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionPrimitive<S> {
    shape: S,
    avatars: Vec<Avatar>,
}

pub type CollisionPrimitive3D = CollisionPrimitive<Shape3D>;
pub type CollisionPrimitive2D = CollisionPrimitive<Shape2D>;

impl<S: Shape> CollisionPrimitive<S> {
    pub fn new(shape: S, cache: &AvatarCache) -> Self {
        let mut primitive = Self {
            avatars: cache.avatars(shape.kind()),
            shape,
        };
        primitive.refresh_avatars();
        primitive
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().display_name()
    }

    pub fn icon(&self) -> &'static str {
        self.kind().icon()
    }

    pub fn avatars(&self) -> &[Avatar] {
        &self.avatars
    }

    /// Mutate the shape through its setters.
    ///
    /// `edit` returns whether anything changed; avatars are only refreshed
    /// in that case and the result is passed through.
    pub fn edit(&mut self, edit: impl FnOnce(&mut S) -> bool) -> bool {
        let changed = edit(&mut self.shape);
        if changed {
            self.refresh_avatars();
        }
        changed
    }

    /// Push the current parameters into an asset sink
    pub fn assign_to<C: CollisionSink + ?Sized>(&self, sink: &mut C) {
        self.shape.assign_to(sink);
    }

    fn refresh_avatars(&mut self) {
        let transforms = self.shape.avatar_transforms();
        debug_assert_eq!(transforms.len(), self.avatars.len());
        for (avatar, transform) in self.avatars.iter_mut().zip(transforms) {
            avatar.transform = transform;
        }
    }
}
