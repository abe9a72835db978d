//! Deduplication of face corners into unique interleaved vertices.

use glam::{Vec2, Vec3};

use crate::model::Vertex;
use crate::parse::triplet::IndexTriplet;

const EMPTY: u32 = u32::MAX;

/// Key for one unique vertex. Tying the owning object into the key keeps
/// vertices from ever being shared across objects, which is what makes each
/// object a contiguous slice of the vertex buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
struct VertexKey {
    object: u32,
    pos: u32,
    texcoord: u32,
    normal: u32,
}

impl VertexKey {
    /// SDBM over the 16 key bytes. Omitted attributes hash as zero but stay
    /// distinct in the equality comparison.
    fn hash(&self) -> u32 {
        let words = [
            self.object,
            self.pos,
            if self.texcoord == EMPTY { 0 } else { self.texcoord },
            if self.normal == EMPTY { 0 } else { self.normal },
        ];
        let mut hash = 0u32;
        for word in words {
            for byte in word.to_le_bytes() {
                hash = u32::from(byte)
                    .wrapping_add(hash << 6)
                    .wrapping_add(hash << 16)
                    .wrapping_sub(hash);
            }
        }
        hash
    }
}

struct Entry {
    key: VertexKey,
    /// Next entry in this slot's collision chain, or [`EMPTY`].
    next: u32,
}

/// Hash map from (object, position, texcoord, normal) tuples to unique
/// vertex indices, chained through [`Entry::next`]. Entry `i` corresponds to
/// vertex `i`, so the entries double as the insertion-ordered vertex list.
pub(crate) struct VertexDeduper<'a> {
    slots: Vec<u32>,
    entries: Vec<Entry>,
    vertices: Vec<Vertex>,
    positions: &'a [Vec3],
    texcoords: &'a [Vec2],
    normals: &'a [Vec3],
}

impl<'a> VertexDeduper<'a> {
    pub fn new(positions: &'a [Vec3], texcoords: &'a [Vec2], normals: &'a [Vec3]) -> Self {
        // Twice the position count keeps the load factor under 0.5 for
        // typical files.
        let num_slots = (positions.len() * 2).max(1);
        Self {
            slots: vec![EMPTY; num_slots],
            entries: Vec::with_capacity(positions.len()),
            vertices: Vec::with_capacity(positions.len()),
            positions,
            texcoords,
            normals,
        }
    }

    pub fn len(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Returns the unique vertex index for this corner, materializing the
    /// interleaved vertex the first time the key is seen.
    pub fn insert(&mut self, object: u32, corner: IndexTriplet) -> u32 {
        let key = VertexKey {
            object,
            pos: corner.v,
            texcoord: corner.vt,
            normal: corner.vn,
        };
        let slot = (key.hash() % self.slots.len() as u32) as usize;
        let mut at = self.slots[slot];
        while at != EMPTY {
            let entry = &self.entries[at as usize];
            if entry.key == key {
                return at;
            }
            at = entry.next;
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            key,
            next: self.slots[slot],
        });
        self.slots[slot] = index;
        self.vertices.push(self.materialize(corner));
        index
    }

    fn materialize(&self, corner: IndexTriplet) -> Vertex {
        Vertex {
            position: self.positions[corner.v as usize],
            texcoord: match corner.vt {
                IndexTriplet::OMITTED => Vec2::ZERO,
                vt => self.texcoords[vt as usize],
            },
            normal: match corner.vn {
                IndexTriplet::OMITTED => Vec3::ZERO,
                vn => self.normals[vn as usize],
            },
        }
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
