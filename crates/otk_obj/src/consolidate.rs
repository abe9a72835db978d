//! Batches parsed faces into per-(object, material) meshes and produces the
//! final vertex and index buffers.

use crate::dedup::VertexDeduper;
use crate::mem::{IndexBuffer, VertexBuffer};
use crate::model::{Mesh, Model, ModelFlags, Object};
use crate::options::{IndexFormat, LoadOptions};
use crate::parse::ParsedObj;

pub(crate) fn build_model(parsed: ParsedObj, options: &LoadOptions) -> Model {
    let ParsedObj {
        mut flags,
        materials,
        positions,
        texcoords,
        normals,
        objects: temp_objects,
        faces,
    } = parsed;

    let mut meshes: Vec<Mesh> = Vec::with_capacity(temp_objects.len() * 4);
    let mut objects: Vec<Object> = Vec::with_capacity(temp_objects.len());
    let mut indices: Vec<u32> = Vec::with_capacity(faces.len() * 3);
    let mut deduper = VertexDeduper::new(&positions, &texcoords, &normals);

    for (object_index, temp) in temp_objects.into_iter().enumerate() {
        let first_mesh = meshes.len() as u32;
        let first_index = indices.len() as u32;
        let first_vertex = deduper.len();
        let object_faces =
            &faces[temp.first_face as usize..(temp.first_face + temp.num_faces) as usize];

        // One mesh per material, in ascending material order with
        // no-material (-1) first. Empty meshes are not emitted.
        for material in -1..materials.len() as i32 {
            let mesh_first_index = indices.len() as u32;
            for face in object_faces.iter().filter(|f| f.material_index == material) {
                for corner in face.corners {
                    let index = deduper.insert(object_index as u32, corner);
                    if index > u32::from(u16::MAX) {
                        flags |= ModelFlags::INDEX32;
                    }
                    indices.push(index);
                }
            }
            let num_indices = indices.len() as u32 - mesh_first_index;
            if num_indices > 0 {
                meshes.push(Mesh {
                    material_index: material,
                    first_index: mesh_first_index,
                    num_indices,
                });
            }
        }

        objects.push(Object {
            name: temp.name,
            first_mesh,
            num_meshes: meshes.len() as u32 - first_mesh,
            first_index,
            num_indices: indices.len() as u32 - first_index,
            first_vertex,
            num_vertices: deduper.len() - first_vertex,
        });
    }

    if options.index_format == IndexFormat::U32 {
        flags |= ModelFlags::INDEX32;
    }
    let indices = if flags.contains(ModelFlags::INDEX32) {
        IndexBuffer::U32(indices)
    } else {
        IndexBuffer::U16(indices.into_iter().map(|index| index as u16).collect())
    };

    let vertices = deduper.into_vertices();
    let vertices = VertexBuffer::from_vertices(&vertices, options.vertex_layout);

    Model {
        flags,
        materials,
        meshes,
        objects,
        vertices,
        indices,
    }
}
