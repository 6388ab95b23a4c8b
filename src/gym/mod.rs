pub mod object_transition;
pub mod render;

pub use object_transition::{ForceModel, ObjectTransition, ObjectTransitionConfig};
pub use render::{Metadata, RenderMode, Scene};
