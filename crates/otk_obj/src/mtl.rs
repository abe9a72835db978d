//! MTL material library parsing.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use log::{trace, warn};

use crate::error::LoadError;
use crate::lexer::{Lexer, Token};
use crate::parse::primitives::{bounded_name, parse_floats, parse_int};

/// A material from an MTL library. Field docs name the MTL keyword each one
/// comes from; fields the file leaves out stay zero/empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    /// `Ka`
    pub ambient: Vec3,
    /// `Kd`
    pub diffuse: Vec3,
    /// `Ke`
    pub emission: Vec3,
    /// `Ks`
    pub specular: Vec3,
    /// `Ns`
    pub specular_exponent: f32,
    /// `Ni`
    pub optical_density: f32,
    /// `d`
    pub opacity: f32,
    /// `illum`
    pub illum: i32,
    /// `map_Ka`
    pub ambient_texture: String,
    /// `map_Bump`
    pub bump_texture: String,
    /// `map_Kd`
    pub diffuse_texture: String,
    /// `map_Ks`
    pub specular_texture: String,
    /// `map_Ns`
    pub specular_exponent_texture: String,
    /// `map_d`
    pub opacity_texture: String,
}

/// Resolves a library name against the OBJ file's directory. The split is
/// done at the string level so Windows-authored paths (`\\`) resolve on any
/// platform.
fn resolve_library_path(obj_path: &Path, library: &str) -> PathBuf {
    let obj = obj_path.to_string_lossy();
    match obj.rfind(['/', '\\']) {
        Some(split) => PathBuf::from(format!("{}{}", &obj[..=split], library)),
        None => PathBuf::from(library),
    }
}

/// Loads one `mtllib` reference, appending its materials.
///
/// An unreadable library is tolerated; real-world OBJ files routinely ship
/// without their MTL. Parse errors inside a library are hard errors.
pub(crate) fn load_library(
    obj_path: &Path,
    library: &str,
    materials: &mut Vec<Material>,
) -> crate::Result<()> {
    let path = resolve_library_path(obj_path, library);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(
                "material library '{}' could not be read: {err}",
                path.display()
            );
            return Ok(());
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    parse_library(&text, materials)
}

/// Parses MTL text, appending each completed material. A material is
/// committed when the next `newmtl` starts or the file ends.
pub(crate) fn parse_library(text: &str, materials: &mut Vec<Material>) -> crate::Result<()> {
    let mut lexer = Lexer::new(text);
    let mut current = Material::default();
    loop {
        let keyword = lexer.next_token(false);
        if keyword.is_empty() {
            if lexer.is_eof() {
                break;
            }
        } else if keyword.text.eq_ignore_ascii_case("newmtl") {
            let name = lexer.next_token(false);
            if name.is_empty() {
                return Err(LoadError::expected_name("newmtl", &name));
            }
            if !current.name.is_empty() {
                materials.push(std::mem::take(&mut current));
            }
            current = Material {
                name: bounded_name(name.text),
                ..Material::default()
            };
        } else {
            parse_field(&mut lexer, &keyword, &mut current)?;
        }
        lexer.skip_to_next_line();
    }
    if !current.name.is_empty() {
        materials.push(current);
    }
    Ok(())
}

fn parse_field(
    lexer: &mut Lexer<'_>,
    keyword: &Token<'_>,
    material: &mut Material,
) -> crate::Result<()> {
    match keyword.text.to_ascii_lowercase().as_str() {
        "d" => material.opacity = parse_floats::<1>(lexer)?[0],
        "illum" => material.illum = parse_int(lexer)?,
        "ni" => material.optical_density = parse_floats::<1>(lexer)?[0],
        "ns" => material.specular_exponent = parse_floats::<1>(lexer)?[0],
        "ka" => material.ambient = parse_color(lexer)?,
        "kd" => material.diffuse = parse_color(lexer)?,
        "ke" => material.emission = parse_color(lexer)?,
        "ks" => material.specular = parse_color(lexer)?,
        "map_bump" => material.bump_texture = parse_texture(lexer, "map_Bump")?,
        "map_ka" => material.ambient_texture = parse_texture(lexer, "map_Ka")?,
        "map_kd" => material.diffuse_texture = parse_texture(lexer, "map_Kd")?,
        "map_ks" => material.specular_texture = parse_texture(lexer, "map_Ks")?,
        "map_ns" => material.specular_exponent_texture = parse_texture(lexer, "map_Ns")?,
        "map_d" => material.opacity_texture = parse_texture(lexer, "map_d")?,
        other => trace!("skipping mtl keyword '{other}'"),
    }
    Ok(())
}

fn parse_color(lexer: &mut Lexer<'_>) -> crate::Result<Vec3> {
    let [r, g, b] = parse_floats(lexer)?;
    Ok(Vec3::new(r, g, b))
}

fn parse_texture(lexer: &mut Lexer<'_>, keyword: &'static str) -> crate::Result<String> {
    let token = lexer.next_token(false);
    if token.is_empty() {
        return Err(LoadError::expected_name(keyword, &token));
    }
    Ok(bounded_name(token.text))
}
