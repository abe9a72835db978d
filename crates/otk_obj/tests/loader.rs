//! End-to-end tests over inline OBJ/MTL sources.

use std::fmt::Write as _;
use std::fs;

use otk_obj::{
    load, load_str, IndexBuffer, IndexFormat, LoadError, LoadOptions, Model, ModelFlags,
    VertexLayout, OMIT_ATTRIBUTE,
};
use pretty_assertions::assert_eq;

fn load_default(text: &str) -> Model {
    load_str(text, "test.obj", &LoadOptions::default()).expect("load failed")
}

/// Checks the structural invariants every model must satisfy.
fn validate(model: &Model) {
    let num_vertices = model.vertices().count() as u32;
    let num_indices = model.indices().len() as u32;
    assert_eq!(num_indices % 3, 0, "indices must form whole triangles");

    for mesh in model.meshes() {
        assert!(mesh.num_indices > 0, "empty meshes must not be emitted");
        assert!(mesh.first_index + mesh.num_indices <= num_indices);
        for at in mesh.first_index..mesh.first_index + mesh.num_indices {
            assert!(model.indices().get(at as usize) < num_vertices);
        }
    }

    for object in model.objects() {
        let meshes = &model.meshes()
            [object.first_mesh as usize..(object.first_mesh + object.num_meshes) as usize];
        let mesh_indices: u32 = meshes.iter().map(|m| m.num_indices).sum();
        assert_eq!(mesh_indices, object.num_indices);

        for at in object.first_index..object.first_index + object.num_indices {
            let index = model.indices().get(at as usize);
            assert!(index >= object.first_vertex);
            assert!(index < object.first_vertex + object.num_vertices);
        }
    }
}

const TINY: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
";

#[test]
fn tiny_obj_round_trip() {
    let model = load_default(TINY);
    validate(&model);

    assert_eq!(
        model.flags(),
        ModelFlags::HAS_TEXCOORDS | ModelFlags::HAS_NORMALS
    );
    assert_eq!(model.materials().len(), 0);
    assert_eq!(model.objects().len(), 1);
    assert_eq!(model.objects()[0].name, "");
    assert_eq!(model.meshes().len(), 1);
    assert_eq!(model.meshes()[0].material_index, -1);
    assert_eq!(model.meshes()[0].num_indices, 3);
    assert_eq!(model.vertices().count(), 3);
    assert_eq!(model.indices(), &IndexBuffer::U16(vec![0, 1, 2]));

    let vertex = model.vertices().get(1);
    assert_eq!(vertex.position.to_array(), [1.0, 0.0, 0.0]);
    assert_eq!(vertex.texcoord.to_array(), [0.0, 0.0]);
    assert_eq!(vertex.normal.to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn quad_becomes_two_triangles() {
    let model = load_default(
        "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
",
    );
    validate(&model);
    assert_eq!(model.num_triangles(), 2);
    assert_eq!(model.indices(), &IndexBuffer::U16(vec![0, 1, 2, 0, 2, 3]));
    assert_eq!(model.flags(), ModelFlags::empty());
}

#[test]
fn concave_polygon_is_ear_clipped() {
    let model = load_default(
        "\
v 0 0 0
v 2 0 0
v 2 1 0
v 1 1 0
v 1 2 0
v 0 2 0
f 1 2 3 4 5 6
",
    );
    validate(&model);
    assert_eq!(model.num_triangles(), 4);
}

#[test]
fn negative_indices_are_equivalent() {
    let negated = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f -3/-1/-1 -2/-1/-1 -1/-1/-1
";
    assert_eq!(load_default(TINY), load_default(negated));
}

#[test]
fn identical_corners_share_a_vertex() {
    let model = load_default(
        "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
f 1/1/1 3/1/1 2/1/1
",
    );
    validate(&model);
    assert_eq!(model.vertices().count(), 3);
    assert_eq!(
        model.indices(),
        &IndexBuffer::U16(vec![0, 1, 2, 0, 2, 1])
    );
}

#[test]
fn vertices_are_not_shared_across_objects() {
    let model = load_default(
        "\
v 0 0 0
v 1 0 0
v 0 1 0
o first
f 1 2 3
o second
f 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.objects().len(), 2);
    assert_eq!(model.objects()[0].name, "first");
    assert_eq!(model.objects()[1].name, "second");
    assert_eq!(model.vertices().count(), 6);
    assert_eq!(model.objects()[1].first_vertex, 3);
    assert_eq!(
        model.indices(),
        &IndexBuffer::U16(vec![0, 1, 2, 3, 4, 5])
    );
}

#[test]
fn keywords_are_case_insensitive() {
    let model = load_default(
        "\
V 0 0 0
V 1 0 0
V 0 1 0
F 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.num_triangles(), 1);
}

#[test]
fn unknown_keywords_are_skipped() {
    let model = load_default(
        "\
# comment line
v 0 0 0
v 1 0 0
v 0 1 0
s off
g some group
f 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.num_triangles(), 1);
}

#[test]
fn index_width_narrows_by_default() {
    let model = load_default(TINY);
    assert!(!model.flags().contains(ModelFlags::INDEX32));
    assert!(matches!(model.indices(), IndexBuffer::U16(_)));
}

#[test]
fn index_width_widens_past_u16() {
    // 22,000 disjoint triangles make 66,000 unique vertices.
    let mut text = String::new();
    for _ in 0..22_000 {
        text.push_str("v 0 0 0\nv 1 0 0\nv 0 1 0\n");
    }
    for face in 0..22_000u32 {
        let v = face * 3 + 1;
        writeln!(text, "f {} {} {}", v, v + 1, v + 2).unwrap();
    }

    let model = load_default(&text);
    validate(&model);
    assert_eq!(model.vertices().count(), 66_000);
    assert!(model.flags().contains(ModelFlags::INDEX32));
    assert!(matches!(model.indices(), IndexBuffer::U32(_)));
}

#[test]
fn forced_u32_sets_the_flag() {
    let options = LoadOptions {
        index_format: IndexFormat::U32,
        ..Default::default()
    };
    let model = load_str(TINY, "test.obj", &options).unwrap();
    assert!(model.flags().contains(ModelFlags::INDEX32));
    assert_eq!(model.indices(), &IndexBuffer::U32(vec![0, 1, 2]));
}

#[test]
fn custom_vertex_layout_is_honored() {
    let options = LoadOptions {
        vertex_layout: Some(VertexLayout::new(48, 16, OMIT_ATTRIBUTE, 32)),
        ..Default::default()
    };
    let model = load_str(TINY, "test.obj", &options).unwrap();
    let vertices = model.vertices();
    assert_eq!(vertices.stride(), 48);
    assert_eq!(vertices.as_bytes().len(), 48 * 3);

    let vertex = vertices.get(2);
    assert_eq!(vertex.position.to_array(), [0.0, 1.0, 0.0]);
    assert_eq!(vertex.texcoord.to_array(), [0.0, 0.0]);
    assert_eq!(vertex.normal.to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn error_reports_line_and_column() {
    let mut text = String::new();
    for _ in 0..41 {
        text.push_str("# filler\n");
    }
    text.push_str("f 1/x 2 3\n");

    let err = load_str(&text, "test.obj", &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::ParseFace {
            line: 42,
            column: 3
        }
    ));
    assert_eq!(err.to_string(), "(42:3) Failed to parse face");
}

#[test]
fn short_faces_are_rejected() {
    let err = load_str("v 0 0 0\nv 1 0 0\nf 1 2\n", "test.obj", &LoadOptions::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "(3:1) Face needs at least 3 vertices");
}

#[test]
fn out_of_range_indices_are_rejected() {
    let err = load_str("v 0 0 0\nf 1 2 3\n", "test.obj", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::ParseFace { .. }));
}

#[test]
fn missing_names_are_rejected() {
    for (text, keyword) in [
        ("o\n", "o"),
        ("usemtl\n", "usemtl"),
        ("mtllib\n", "mtllib"),
    ] {
        let err = load_str(text, "test.obj", &LoadOptions::default()).unwrap_err();
        match err {
            LoadError::ExpectedName { keyword: got, .. } => assert_eq!(got, keyword),
            other => panic!("expected ExpectedName for {keyword:?}, got {other:?}"),
        }
    }
}

#[test]
fn unknown_usemtl_collapses_to_no_material() {
    let model = load_default(
        "\
v 0 0 0
v 1 0 0
v 0 1 0
usemtl ghost
f 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.meshes()[0].material_index, -1);
}

#[test]
fn missing_material_library_is_tolerated() {
    let model = load_default(
        "\
mtllib does_not_exist.mtl
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.materials().len(), 0);
}

#[test]
fn material_libraries_load_relative_to_the_obj() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("scene.mtl"),
        "newmtl metal\nKd 0.8 0.8 0.9\n\nnewmtl cloth\nKd 0.4 0.1 0.1\n",
    )
    .unwrap();
    let obj_path = dir.path().join("scene.obj");
    fs::write(
        &obj_path,
        "\
mtllib scene.mtl
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
o plate
usemtl metal
f 1 2 3
usemtl cloth
f 2 4 3
f 1 3 4
o tag
f 1 2 4
usemtl METAL
f 2 3 4
",
    )
    .unwrap();

    let model = load(&obj_path).unwrap();
    validate(&model);

    assert_eq!(model.materials().len(), 2);
    assert_eq!(model.materials()[0].name, "metal");
    assert_eq!(model.materials()[1].name, "cloth");
    assert_eq!(model.objects().len(), 2);

    // plate: one mesh per used material, ascending material order.
    let plate = &model.objects()[0];
    assert_eq!(plate.num_meshes, 2);
    let plate_meshes =
        &model.meshes()[plate.first_mesh as usize..(plate.first_mesh + plate.num_meshes) as usize];
    assert_eq!(plate_meshes[0].material_index, 0);
    assert_eq!(plate_meshes[0].num_indices, 3);
    assert_eq!(plate_meshes[1].material_index, 1);
    assert_eq!(plate_meshes[1].num_indices, 6);

    // tag: the material state persists across `o`, so its first face still
    // carries cloth; the later METAL face (case-insensitive match) sorts
    // into the earlier mesh because meshes are ordered by material.
    let tag = &model.objects()[1];
    assert_eq!(tag.num_meshes, 2);
    let tag_meshes =
        &model.meshes()[tag.first_mesh as usize..(tag.first_mesh + tag.num_meshes) as usize];
    assert_eq!(tag_meshes[0].material_index, 0);
    assert_eq!(tag_meshes[0].num_indices, 3);
    assert_eq!(tag_meshes[1].material_index, 1);
    assert_eq!(tag_meshes[1].num_indices, 3);
}

#[test]
fn crlf_and_spaced_library_names_work() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("my materials.mtl"),
        "newmtl only\nKd 1 0 0\n",
    )
    .unwrap();
    let obj_path = dir.path().join("model.obj");
    fs::write(
        &obj_path,
        "mtllib my materials.mtl\r\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nusemtl only\r\nf 1 2 3\r\n",
    )
    .unwrap();

    let model = load(&obj_path).unwrap();
    validate(&model);
    assert_eq!(model.materials().len(), 1);
    assert_eq!(model.materials()[0].name, "only");
    assert_eq!(model.meshes()[0].material_index, 0);
}

#[test]
fn broken_material_library_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.mtl"), "newmtl x\nKd 1 oops 0\n").unwrap();
    let obj_path = dir.path().join("model.obj");
    fs::write(&obj_path, "mtllib bad.mtl\nv 0 0 0\n").unwrap();

    let err = load(&obj_path).unwrap_err();
    assert!(matches!(err, LoadError::ParseFloat { line: 2, .. }));
}

#[test]
fn empty_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.obj");
    fs::write(&path, "").unwrap();
    let err = load(&path).unwrap_err();
    assert!(matches!(err, LoadError::IoRead { .. }));
    assert_eq!(
        err.to_string(),
        format!("Failed to read file '{}'", path.display())
    );
}

#[test]
fn missing_files_are_io_errors() {
    let err = load("no/such/file.obj").unwrap_err();
    assert!(matches!(err, LoadError::IoOpen { .. }));
}

#[test]
fn forced_options_do_not_change_geometry() {
    let defaults = load_default(TINY);
    let options = LoadOptions {
        index_format: IndexFormat::U32,
        vertex_layout: Some(VertexLayout::default()),
    };
    let custom = load_str(TINY, "test.obj", &options).unwrap();

    assert_eq!(defaults.vertices().as_bytes(), custom.vertices().as_bytes());
    assert_eq!(
        defaults.indices().iter().collect::<Vec<_>>(),
        custom.indices().iter().collect::<Vec<_>>()
    );
}

#[test]
fn objects_without_faces_are_kept() {
    let model = load_default(
        "\
o empty
v 0 0 0
v 1 0 0
v 0 1 0
o full
f 1 2 3
",
    );
    validate(&model);
    assert_eq!(model.objects().len(), 2);
    assert_eq!(model.objects()[0].num_meshes, 0);
    assert_eq!(model.objects()[0].num_vertices, 0);
    assert_eq!(model.objects()[1].num_indices, 3);
}
