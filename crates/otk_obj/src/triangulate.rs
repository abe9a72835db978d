//! Polygon-to-triangle conversion by ear clipping, after tinyobjloader's
//! approach: project the polygon into 2-D, then repeatedly clip ears that no
//! other vertex intrudes into.

use glam::Vec3;

use crate::parse::triplet::IndexTriplet;

/// Picks the two axes to project onto: the pair orthogonal to the dominant
/// component of the first non-degenerate corner's cross product. Falls back
/// to (1, 2) for fully degenerate polygons.
fn pick_axes(corners: &[IndexTriplet], positions: &[Vec3]) -> [usize; 2] {
    let n = corners.len();
    for i in 0..n {
        let v0 = positions[corners[i].v as usize];
        let v1 = positions[corners[(i + 1) % n].v as usize];
        let v2 = positions[corners[(i + 2) % n].v as usize];
        let cross = (v1 - v0).cross(v2 - v1).abs();
        if cross.max_element() > f32::EPSILON {
            return if cross.x > cross.y && cross.x > cross.z {
                [1, 2]
            } else if cross.z > cross.x && cross.z > cross.y {
                [0, 1]
            } else {
                [0, 2]
            };
        }
    }
    [1, 2]
}

/// Signed polygon area in the projection plane (shoelace sum). The sign
/// encodes the winding, which the ear test needs to recognize reflex
/// corners.
fn signed_area(corners: &[IndexTriplet], positions: &[Vec3], axes: [usize; 2]) -> f32 {
    let n = corners.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = positions[corners[i].v as usize];
        let b = positions[corners[(i + 1) % n].v as usize];
        area += (a[axes[0]] * b[axes[1]] - a[axes[1]] * b[axes[0]]) * 0.5;
    }
    area
}

// Crossing-number point-in-polygon test, specialized to triangles.
// From https://wrf.ecse.rpi.edu//Research/Short_Notes/pnpoly.html
fn point_in_triangle(xs: &[f32; 3], ys: &[f32; 3], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = 2;
    for i in 0..3 {
        if (ys[i] > y) != (ys[j] > y)
            && x < (xs[j] - xs[i]) * (y - ys[i]) / (ys[j] - ys[i]) + xs[i]
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Clips a polygon of `corners` (n >= 3, possibly concave) into triangles,
/// passing each emitted triangle's corners to `emit`.
///
/// Degenerate or malformed polygons never fail the parse: when no ear can be
/// found in a full sweep, the remainder is dropped.
pub(crate) fn triangulate(
    corners: &[IndexTriplet],
    positions: &[Vec3],
    emit: &mut impl FnMut([IndexTriplet; 3]),
) {
    let axes = pick_axes(corners, positions);
    let area = signed_area(corners, positions, axes);

    let mut remaining = corners.to_vec();
    let mut previous_len = remaining.len();
    let mut iterations_left = remaining.len();
    let mut guess = 0usize;
    while remaining.len() > 3 && iterations_left > 0 {
        let n = remaining.len();
        if guess >= n {
            guess -= n;
        }
        if previous_len != n {
            // An ear was clipped; reset the progress counter.
            previous_len = n;
            iterations_left = n;
        } else {
            iterations_left -= 1;
        }

        let ear: [IndexTriplet; 3] = std::array::from_fn(|i| remaining[(guess + i) % n]);
        let mut xs = [0.0f32; 3];
        let mut ys = [0.0f32; 3];
        for (i, corner) in ear.iter().enumerate() {
            let pos = positions[corner.v as usize];
            xs[i] = pos[axes[0]];
            ys[i] = pos[axes[1]];
        }

        // A corner turning against the polygon winding is reflex, not an ear.
        let cross = (xs[1] - xs[0]) * (ys[2] - ys[1]) - (ys[1] - ys[0]) * (xs[2] - xs[1]);
        if cross * area < 0.0 {
            guess += 1;
            continue;
        }

        // Nor is a corner whose triangle contains another polygon vertex.
        let mut overlap = false;
        for other in 3..n {
            let v = remaining[(guess + other) % n].v;
            let pos = positions[v as usize];
            if point_in_triangle(&xs, &ys, pos[axes[0]], pos[axes[1]]) {
                overlap = true;
                break;
            }
        }
        if overlap {
            guess += 1;
            continue;
        }

        emit(ear);
        remaining.remove((guess + 1) % n);
    }
    if remaining.len() == 3 {
        emit([remaining[0], remaining[1], remaining[2]]);
    }
}
