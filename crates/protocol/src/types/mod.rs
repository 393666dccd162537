//! Type definitions shared by the core and its collaborators.

mod ids;
mod scene;

pub use ids::*;
pub use scene::*;
