//! Collision shape parameters.
//!
//! Setters return `true` only when the stored value actually changed, which
//! is what callers use to decide whether to refresh avatars and notify.

use glam::{Quat, Vec2, Vec3};
use scenewright_protocol::CollisionSink;

use super::PrimitiveKind;
use super::avatar::AvatarTransform;

/// Store `value` in `slot` and report whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Shortest-arc rotation taking `reference` onto `axis`.
///
/// Axes longer than unit length are treated as not yet normalized and leave
/// the rotation alone, as does a zero axis.
fn axis_rotation(reference: Vec3, axis: Vec3) -> Option<Quat> {
    if axis.length_squared() > 1.0 {
        return None;
    }
    axis.try_normalize().map(|direction| Quat::from_rotation_arc(reference, direction))
}

/// Rotation about Z taking +X onto a 2D `axis`, with the same guards as
/// [`axis_rotation`].
fn planar_rotation(axis: Vec2) -> Option<Quat> {
    if axis.length_squared() > 1.0 || axis == Vec2::ZERO {
        return None;
    }
    Some(Quat::from_rotation_z(axis.y.atan2(axis.x)))
}

// ============================================================================
// 3D shapes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    center: Vec3,
    scale: Vec3,
}

impl BoxShape {
    pub fn new(center: Vec3, scale: Vec3) -> Self {
        Self { center, scale }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_center(&mut self, center: Vec3) -> bool {
        replace(&mut self.center, center)
    }

    pub fn set_scale(&mut self, scale: Vec3) -> bool {
        replace(&mut self.scale, scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereShape {
    center: Vec3,
    radius: f32,
}

impl SphereShape {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_center(&mut self, center: Vec3) -> bool {
        replace(&mut self.center, center)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        replace(&mut self.radius, radius)
    }
}

/// Capsule whose cylinder runs along `axis`; the rotation maps +Y onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    center: Vec3,
    axis: Vec3,
    height: f32,
    radius: f32,
    rotation: Quat,
}

impl CapsuleShape {
    pub fn new(center: Vec3, axis: Vec3, height: f32, radius: f32) -> Self {
        Self {
            center,
            axis,
            height,
            radius,
            rotation: axis_rotation(Vec3::Y, axis).unwrap_or(Quat::IDENTITY),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_center(&mut self, center: Vec3) -> bool {
        replace(&mut self.center, center)
    }

    /// Set the axis; the derived rotation only follows when `|axis|² <= 1`.
    pub fn set_axis(&mut self, axis: Vec3) -> bool {
        if !replace(&mut self.axis, axis) {
            return false;
        }
        if let Some(rotation) = axis_rotation(Vec3::Y, axis) {
            self.rotation = rotation;
        }
        true
    }

    pub fn set_height(&mut self, height: f32) -> bool {
        replace(&mut self.height, height)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        replace(&mut self.radius, radius)
    }
}

/// A 3D collision shape candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shape3D {
    #[default]
    None,
    Box(BoxShape),
    Sphere(SphereShape),
    Capsule(CapsuleShape),
}

// ============================================================================
// 2D shapes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    center: Vec2,
    scale: Vec2,
}

impl RectShape {
    pub fn new(center: Vec2, scale: Vec2) -> Self {
        Self { center, scale }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_center(&mut self, center: Vec2) -> bool {
        replace(&mut self.center, center)
    }

    pub fn set_scale(&mut self, scale: Vec2) -> bool {
        replace(&mut self.scale, scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    center: Vec2,
    radius: f32,
}

impl CircleShape {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_center(&mut self, center: Vec2) -> bool {
        replace(&mut self.center, center)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        replace(&mut self.radius, radius)
    }
}

/// Stadium (2D capsule) whose straight sides run along `axis`; the rotation
/// about Z maps +X onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StadiumShape {
    center: Vec2,
    axis: Vec2,
    height: f32,
    radius: f32,
    rotation: Quat,
}

impl StadiumShape {
    pub fn new(center: Vec2, axis: Vec2, height: f32, radius: f32) -> Self {
        Self {
            center,
            axis,
            height,
            radius,
            rotation: planar_rotation(axis).unwrap_or(Quat::IDENTITY),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_center(&mut self, center: Vec2) -> bool {
        replace(&mut self.center, center)
    }

    /// Set the axis; the derived rotation only follows when `|axis|² <= 1`.
    pub fn set_axis(&mut self, axis: Vec2) -> bool {
        if !replace(&mut self.axis, axis) {
            return false;
        }
        if let Some(rotation) = planar_rotation(axis) {
            self.rotation = rotation;
        }
        true
    }

    pub fn set_height(&mut self, height: f32) -> bool {
        replace(&mut self.height, height)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        replace(&mut self.radius, radius)
    }
}

/// A 2D collision shape candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shape2D {
    #[default]
    None,
    Rect(RectShape),
    Circle(CircleShape),
    Stadium(StadiumShape),
}

// ============================================================================
// Dispatch
// ============================================================================

/// Behaviour shared by the 3D and 2D shape enums.
pub trait Shape: Clone + PartialEq {
    fn kind(&self) -> PrimitiveKind;

    /// Push the current parameters into an asset sink; `None` clears the slot
    fn assign_to<C: CollisionSink + ?Sized>(&self, sink: &mut C);

    /// One transform per avatar of this kind, in template order
    fn avatar_transforms(&self) -> Vec<AvatarTransform>;
}

impl Shape for Shape3D {
    fn kind(&self) -> PrimitiveKind {
        match self {
            Shape3D::None => PrimitiveKind::None,
            Shape3D::Box(_) => PrimitiveKind::Box,
            Shape3D::Sphere(_) => PrimitiveKind::Sphere,
            Shape3D::Capsule(_) => PrimitiveKind::Capsule,
        }
    }

    fn assign_to<C: CollisionSink + ?Sized>(&self, sink: &mut C) {
        match self {
            Shape3D::None => sink.clear_collision_primitive_3d(),
            Shape3D::Box(s) => sink.assign_collision_box(s.center, s.scale),
            Shape3D::Sphere(s) => sink.assign_collision_sphere(s.center, s.radius),
            Shape3D::Capsule(s) => {
                sink.assign_collision_capsule(s.center, s.axis, s.height, s.radius)
            }
        }
    }

    fn avatar_transforms(&self) -> Vec<AvatarTransform> {
        match self {
            Shape3D::None => Vec::new(),
            Shape3D::Box(s) => vec![AvatarTransform::new(s.center, Quat::IDENTITY, s.scale)],
            Shape3D::Sphere(s) => vec![AvatarTransform::new(
                s.center,
                Quat::IDENTITY,
                Vec3::splat(s.radius),
            )],
            Shape3D::Capsule(s) => {
                let half = s.rotation * Vec3::Y * (s.height * 0.5);
                let caps = Vec3::splat(s.radius);
                vec![
                    AvatarTransform::new(
                        s.center,
                        s.rotation,
                        Vec3::new(s.radius, s.height, s.radius),
                    ),
                    AvatarTransform::new(s.center + half, s.rotation, caps),
                    AvatarTransform::new(s.center - half, s.rotation, caps),
                ]
            }
        }
    }
}

impl Shape for Shape2D {
    fn kind(&self) -> PrimitiveKind {
        match self {
            Shape2D::None => PrimitiveKind::None,
            Shape2D::Rect(_) => PrimitiveKind::Rect,
            Shape2D::Circle(_) => PrimitiveKind::Circle,
            Shape2D::Stadium(_) => PrimitiveKind::Stadium,
        }
    }

    fn assign_to<C: CollisionSink + ?Sized>(&self, sink: &mut C) {
        match self {
            Shape2D::None => sink.clear_collision_primitive_2d(),
            Shape2D::Rect(s) => sink.assign_collision_rect(s.center, s.scale),
            Shape2D::Circle(s) => sink.assign_collision_circle(s.center, s.radius),
            Shape2D::Stadium(s) => {
                sink.assign_collision_stadium(s.center, s.axis, s.height, s.radius)
            }
        }
    }

    fn avatar_transforms(&self) -> Vec<AvatarTransform> {
        match self {
            Shape2D::None => Vec::new(),
            Shape2D::Rect(s) => vec![AvatarTransform::new(
                s.center.extend(0.0),
                Quat::IDENTITY,
                s.scale.extend(1.0),
            )],
            Shape2D::Circle(s) => vec![AvatarTransform::new(
                s.center.extend(0.0),
                Quat::IDENTITY,
                Vec3::new(s.radius, s.radius, 1.0),
            )],
            Shape2D::Stadium(s) => {
                let center = s.center.extend(0.0);
                let half = s.rotation * Vec3::X * (s.height * 0.5);
                let caps = Vec3::new(s.radius, s.radius, 1.0);
                vec![
                    AvatarTransform::new(
                        center,
                        s.rotation,
                        Vec3::new(s.height, s.radius, 1.0),
                    ),
                    AvatarTransform::new(center + half, s.rotation, caps),
                    AvatarTransform::new(center - half, s.rotation, caps),
                ]
            }
        }
    }
}
