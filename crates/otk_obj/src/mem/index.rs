//! Index buffer output type.

use std::mem::size_of;

/// Triangle indices in their final width.
///
/// The width rides in the variant rather than in a flag the caller has to
/// remember to check, so a consumer cannot read u16 data as u32 or vice
/// versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// The number of indices in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The size in bytes of a single index.
    pub fn stride(&self) -> usize {
        match self {
            Self::U16(_) => size_of::<u16>(),
            Self::U32(_) => size_of::<u32>(),
        }
    }

    /// Reads the index at `at`, widened to u32.
    pub fn get(&self, at: usize) -> u32 {
        match self {
            Self::U16(indices) => u32::from(indices[at]),
            Self::U32(indices) => indices[at],
        }
    }

    /// Iterates all indices widened to u32.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).map(move |at| self.get(at))
    }

    /// The raw underlying bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }
}
