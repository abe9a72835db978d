//! Loader configuration.

use crate::mem::VertexLayout;

/// Output index width selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexFormat {
    /// 16-bit indices unless any index needs more bits.
    #[default]
    Auto,
    /// Always 32-bit indices.
    U32,
}

/// Options threaded through one load. The legacy C loader held these in
/// process-wide state; here they ride along explicitly so concurrent loads
/// with different settings cannot interfere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub index_format: IndexFormat,
    /// Custom output vertex layout; `None` hands out the internal
    /// interleaved layout.
    pub vertex_layout: Option<VertexLayout>,
}
