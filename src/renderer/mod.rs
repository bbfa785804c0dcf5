//! Rendering data
//!
//! Pure CPU tessellation into a world-space triangle list. The host owns the
//! device and pipeline; it uploads the vertices with [`Vertex::desc`] as the
//! buffer layout and [`crate::Camera::view_proj`] as the transform.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use vertex::{Vertex, colors};
