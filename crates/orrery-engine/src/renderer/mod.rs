pub mod buffer;
pub mod camera;
pub mod draw_list;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{DrawItem, FrameData, Renderer};
