//! Vertex buffer output type and interleaved-layout control.

use std::mem::size_of;

use bytemuck::bytes_of;
use glam::{Vec2, Vec3};

use crate::model::Vertex;

/// Byte offset meaning "leave this attribute out of the vertex".
pub const OMIT_ATTRIBUTE: usize = usize::MAX;

/// Describes where each attribute lands inside one interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    position_offset: usize,
    texcoord_offset: usize,
    normal_offset: usize,
}

impl VertexLayout {
    /// A custom interleaved layout. An offset of [`OMIT_ATTRIBUTE`] skips
    /// that attribute.
    ///
    /// # Panics
    ///
    /// Panics when an attribute would extend past `stride`.
    pub fn new(
        stride: usize,
        position_offset: usize,
        texcoord_offset: usize,
        normal_offset: usize,
    ) -> Self {
        let check = |name, offset: usize, size: usize| {
            if offset != OMIT_ATTRIBUTE && offset + size > stride {
                panic!("{name} at offset {offset} overruns vertex stride {stride}");
            }
        };
        check("position", position_offset, size_of::<Vec3>());
        check("texcoord", texcoord_offset, size_of::<Vec2>());
        check("normal", normal_offset, size_of::<Vec3>());
        Self {
            stride,
            position_offset,
            texcoord_offset,
            normal_offset,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn position_offset(&self) -> usize {
        self.position_offset
    }

    pub fn texcoord_offset(&self) -> usize {
        self.texcoord_offset
    }

    pub fn normal_offset(&self) -> usize {
        self.normal_offset
    }
}

impl Default for VertexLayout {
    /// The internal layout: position, texcoord, normal, tightly packed.
    fn default() -> Self {
        Self {
            stride: size_of::<Vertex>(),
            position_offset: 0,
            texcoord_offset: size_of::<Vec3>(),
            normal_offset: size_of::<Vec3>() + size_of::<Vec2>(),
        }
    }
}

/// The consolidated vertex data: raw interleaved bytes plus the layout that
/// describes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBuffer {
    layout: VertexLayout,
    count: usize,
    buffer: Vec<u8>,
}

impl VertexBuffer {
    /// Packs unique vertices into `layout`; `None` hands the internal
    /// interleaved array out as-is.
    pub(crate) fn from_vertices(vertices: &[Vertex], layout: Option<VertexLayout>) -> Self {
        let Some(layout) = layout else {
            return Self {
                layout: VertexLayout::default(),
                count: vertices.len(),
                buffer: bytemuck::cast_slice(vertices).to_vec(),
            };
        };
        let mut buffer = vec![0u8; layout.stride * vertices.len()];
        for (chunk, vertex) in buffer.chunks_exact_mut(layout.stride.max(1)).zip(vertices) {
            if layout.position_offset != OMIT_ATTRIBUTE {
                let at = layout.position_offset;
                chunk[at..at + size_of::<Vec3>()].copy_from_slice(bytes_of(&vertex.position));
            }
            if layout.texcoord_offset != OMIT_ATTRIBUTE {
                let at = layout.texcoord_offset;
                chunk[at..at + size_of::<Vec2>()].copy_from_slice(bytes_of(&vertex.texcoord));
            }
            if layout.normal_offset != OMIT_ATTRIBUTE {
                let at = layout.normal_offset;
                chunk[at..at + size_of::<Vec3>()].copy_from_slice(bytes_of(&vertex.normal));
            }
        }
        Self {
            layout,
            count: vertices.len(),
            buffer,
        }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// The size in bytes of a single vertex.
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// The number of vertices in the buffer.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The raw interleaved bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Reads vertex `at` back into the default form, with omitted
    /// attributes zero. Mostly useful for inspection and tests.
    pub fn get(&self, at: usize) -> Vertex {
        let chunk = &self.buffer[at * self.layout.stride..(at + 1) * self.layout.stride];
        // The caller's offsets carry no alignment guarantee, so read
        // unaligned.
        let read3 = |offset: usize| {
            if offset == OMIT_ATTRIBUTE {
                Vec3::ZERO
            } else {
                bytemuck::pod_read_unaligned::<Vec3>(&chunk[offset..offset + size_of::<Vec3>()])
            }
        };
        let read2 = |offset: usize| {
            if offset == OMIT_ATTRIBUTE {
                Vec2::ZERO
            } else {
                bytemuck::pod_read_unaligned::<Vec2>(&chunk[offset..offset + size_of::<Vec2>()])
            }
        };
        Vertex {
            position: read3(self.layout.position_offset),
            texcoord: read2(self.layout.texcoord_offset),
            normal: read3(self.layout.normal_offset),
        }
    }
}
