//! WebGPU rendering module
//!
//! A [`ShapeBatch`] collects one frame of draw calls as colored triangles;
//! [`RenderState`] uploads and draws them in a single pass.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::{ShapeBatch, TextLabel};
pub use pipeline::RenderState;
pub use vertex::Vertex;
