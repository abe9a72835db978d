//! The consolidated model and its component records.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::mem::{IndexBuffer, VertexBuffer};
use crate::mtl::Material;

bitflags! {
    /// Summary bits describing a loaded model.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModelFlags: u32 {
        /// At least one `vt` line was read.
        const HAS_TEXCOORDS = 1 << 0;
        /// At least one `vn` line was read.
        const HAS_NORMALS = 1 << 1;
        /// The index buffer holds 32-bit indices.
        const INDEX32 = 1 << 2;
    }
}

/// One interleaved vertex in the default layout. Attributes a face corner
/// omitted are zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

/// A contiguous run of triangle indices sharing one object and one
/// material. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    /// Index into [`Model::materials`], or -1 for faces with no material.
    pub material_index: i32,
    pub first_index: u32,
    pub num_indices: u32,
}

/// A named `o` grouping. Its meshes are contiguous in [`Model::meshes`],
/// and the index/vertex slice fields allow per-object buffer uploads:
/// subtract `first_vertex` from each index in the object's index range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub first_mesh: u32,
    pub num_meshes: u32,
    pub first_index: u32,
    pub num_indices: u32,
    pub first_vertex: u32,
    pub num_vertices: u32,
}

/// A fully consolidated model: unique interleaved vertices, triangle
/// indices, and the meshes, objects, and materials that slice into them.
///
/// Objects appear in declaration order, each object's meshes in ascending
/// material order (no-material first), indices in triangle emission order,
/// and vertices in first-use order.
#[derive(Debug, PartialEq)]
pub struct Model {
    pub(crate) flags: ModelFlags,
    pub(crate) materials: Vec<Material>,
    pub(crate) meshes: Vec<Mesh>,
    pub(crate) objects: Vec<Object>,
    pub(crate) vertices: VertexBuffer,
    pub(crate) indices: IndexBuffer,
}

impl Model {
    pub fn flags(&self) -> ModelFlags {
        self.flags
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    /// The index count is always a multiple of 3.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}
