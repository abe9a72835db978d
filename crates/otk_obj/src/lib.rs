//! Loader for the Wavefront OBJ geometry format and its companion MTL
//! material libraries.
//!
//! [`load`] slurps an OBJ file, parses it along with any `mtllib` references,
//! deduplicates face corners into unique interleaved vertices, triangulates
//! polygons (ear clipping for concave n-gons), and batches the triangles into
//! per-(object, material) meshes, ready for upload to a rendering pipeline.
//!
//! ```no_run
//! let model = otk_obj::load("model.obj")?;
//! for object in model.objects() {
//!     println!("{}: {} meshes", object.name, object.num_meshes);
//! }
//! # Ok::<(), otk_obj::LoadError>(())
//! ```

mod consolidate;
mod dedup;
pub mod error;
mod lexer;
pub mod mem;
mod model;
mod mtl;
mod options;
mod parse;
mod triangulate;

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use error::LoadError;
pub use mem::{IndexBuffer, VertexBuffer, VertexLayout, OMIT_ATTRIBUTE};
pub use model::{Mesh, Model, ModelFlags, Object, Vertex};
pub use mtl::Material;
pub use options::{IndexFormat, LoadOptions};

pub type Result<T> = core::result::Result<T, LoadError>;

/// Loads an OBJ file with default options.
pub fn load(path: impl AsRef<Path>) -> Result<Model> {
    load_with(path, &LoadOptions::default())
}

/// Loads an OBJ file.
///
/// The whole file is read into memory up front; an empty file is an I/O
/// error. Referenced material libraries are resolved relative to the OBJ
/// file's directory.
pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Model> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::IoOpen {
        path: path.into(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| LoadError::IoRead {
        path: path.into(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(LoadError::IoRead {
            path: path.into(),
            source: std::io::ErrorKind::UnexpectedEof.into(),
        });
    }
    let text = String::from_utf8_lossy(&bytes);
    parse::parse_obj(&text, path, options)
}

/// Parses OBJ text already in memory.
///
/// `path` is used only to resolve `mtllib` references; it does not have to
/// exist on disk.
pub fn load_str(text: &str, path: impl AsRef<Path>, options: &LoadOptions) -> Result<Model> {
    parse::parse_obj(text, path.as_ref(), options)
}
