//! Pointer gestures: drawing, moving and resizing

pub mod controller;
pub mod gesture;
pub mod hit;

pub use controller::{DeleteConfirmation, InteractionController, LayoutEvent};
pub use gesture::Gesture;
pub use hit::{find_resize_target, near_sides, resize_candidate, ResizeSides};
