//! The OBJ parser: drives the lexer, accumulates attribute and face data,
//! and hands the result to the consolidator.

pub(crate) mod primitives;
pub(crate) mod triplet;

use std::path::Path;

use glam::{Vec2, Vec3};
use log::{trace, warn};

use crate::error::LoadError;
use crate::lexer::{Lexer, Token};
use crate::model::{Model, ModelFlags};
use crate::mtl::{self, Material};
use crate::options::LoadOptions;
use crate::{consolidate, triangulate};
use primitives::{bounded_name, parse_floats};
use triplet::{parse_triplet, IndexTriplet};

/// A face group opened by an `o` line, or implicitly by the first face.
pub(crate) struct TempObject {
    pub name: String,
    pub first_face: u32,
    pub num_faces: u32,
}

/// One triangle, tagged with the material that was active when it was
/// emitted.
pub(crate) struct TempFace {
    pub material_index: i32,
    pub corners: [IndexTriplet; 3],
}

/// Everything gathered from one pass over the OBJ text.
pub(crate) struct ParsedObj {
    pub flags: ModelFlags,
    pub materials: Vec<Material>,
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub objects: Vec<TempObject>,
    pub faces: Vec<TempFace>,
}

pub(crate) fn parse_obj(text: &str, path: &Path, options: &LoadOptions) -> crate::Result<Model> {
    let parsed = parse_text(text, path)?;
    Ok(consolidate::build_model(parsed, options))
}

/// Scales initial array capacities with file size so multi-hundred-megabyte
/// files do not spend their time reallocating.
fn guess_capacity(file_len: usize, min: usize, max: usize) -> usize {
    min + ((max - min) as f64 * (file_len as f64 / 280_000_000.0)) as usize
}

fn parse_text(text: &str, path: &Path) -> crate::Result<ParsedObj> {
    let mut parsed = ParsedObj {
        flags: ModelFlags::empty(),
        materials: Vec::with_capacity(16),
        positions: Vec::with_capacity(guess_capacity(text.len(), u16::MAX as usize, 1 << 21)),
        texcoords: Vec::with_capacity(guess_capacity(
            text.len(),
            u16::MAX as usize,
            u16::MAX as usize,
        )),
        normals: Vec::with_capacity(guess_capacity(text.len(), 1 << 14, 1 << 14)),
        objects: Vec::new(),
        faces: Vec::with_capacity(guess_capacity(text.len(), 1 << 17, 1 << 23)),
    };
    // Scratch corner list, reused across faces.
    let mut corners: Vec<IndexTriplet> = Vec::with_capacity(8);
    let mut current_material = -1i32;
    let mut lexer = Lexer::new(text);

    loop {
        let keyword = lexer.next_token(false);
        if keyword.is_empty() {
            if lexer.is_eof() {
                break;
            }
        } else if keyword.text.eq_ignore_ascii_case("f") {
            parse_face(&mut lexer, &keyword, &mut parsed, &mut corners, current_material)?;
        } else if keyword.text.eq_ignore_ascii_case("v") {
            let [x, y, z] = parse_floats(&mut lexer)?;
            parsed.positions.push(Vec3::new(x, y, z));
        } else if keyword.text.eq_ignore_ascii_case("vt") {
            let [u, v] = parse_floats(&mut lexer)?;
            parsed.texcoords.push(Vec2::new(u, v));
            parsed.flags |= ModelFlags::HAS_TEXCOORDS;
        } else if keyword.text.eq_ignore_ascii_case("vn") {
            let [x, y, z] = parse_floats(&mut lexer)?;
            parsed.normals.push(Vec3::new(x, y, z));
            parsed.flags |= ModelFlags::HAS_NORMALS;
        } else if keyword.text.eq_ignore_ascii_case("mtllib") {
            // Library filenames may contain spaces.
            let name = lexer.next_token(true);
            if name.is_empty() {
                return Err(LoadError::expected_name("mtllib", &name));
            }
            mtl::load_library(path, name.text, &mut parsed.materials)?;
        } else if keyword.text.eq_ignore_ascii_case("o") {
            let name = lexer.next_token(false);
            if name.is_empty() {
                return Err(LoadError::expected_name("o", &name));
            }
            parsed.objects.push(TempObject {
                name: bounded_name(name.text),
                first_face: parsed.faces.len() as u32,
                num_faces: 0,
            });
        } else if keyword.text.eq_ignore_ascii_case("usemtl") {
            let name = lexer.next_token(false);
            if name.is_empty() {
                return Err(LoadError::expected_name("usemtl", &name));
            }
            current_material = match parsed
                .materials
                .iter()
                .position(|m| m.name.eq_ignore_ascii_case(name.text))
            {
                Some(index) => index as i32,
                None => {
                    warn!("usemtl references unknown material '{}'", name.text);
                    -1
                }
            };
        } else {
            trace!("skipping obj keyword '{}'", keyword.text);
        }
        lexer.skip_to_next_line();
    }
    Ok(parsed)
}

fn parse_face(
    lexer: &mut Lexer<'_>,
    keyword: &Token<'_>,
    parsed: &mut ParsedObj,
    corners: &mut Vec<IndexTriplet>,
    material_index: i32,
) -> crate::Result<()> {
    // Faces before any `o` line belong to an implicit unnamed object.
    if parsed.objects.is_empty() {
        parsed.objects.push(TempObject {
            name: String::new(),
            first_face: 0,
            num_faces: 0,
        });
    }

    corners.clear();
    loop {
        let token = lexer.next_token(false);
        if token.is_empty() {
            break;
        }
        let counts = (
            parsed.positions.len(),
            parsed.texcoords.len(),
            parsed.normals.len(),
        );
        corners.push(parse_triplet(&token, counts)?);
    }
    if corners.len() < 3 {
        return Err(LoadError::face_too_short(keyword));
    }

    let faces = &mut parsed.faces;
    let before = faces.len();
    if corners.len() == 3 {
        faces.push(TempFace {
            material_index,
            corners: [corners[0], corners[1], corners[2]],
        });
    } else {
        triangulate::triangulate(corners, &parsed.positions, &mut |ear| {
            faces.push(TempFace {
                material_index,
                corners: ear,
            });
        });
    }
    let emitted = (faces.len() - before) as u32;
    if let Some(object) = parsed.objects.last_mut() {
        object.num_faces += emitted;
    }
    Ok(())
}
