//! GPU-uploadable output buffers.
mod index;
mod vertex;

pub use index::IndexBuffer;
pub use vertex::{VertexBuffer, VertexLayout, OMIT_ATTRIBUTE};
