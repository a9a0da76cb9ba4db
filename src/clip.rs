//! Mesh clipping against planes
//!
//! Cuts triangle meshes along a plane, keeping the interior side and
//! re-triangulating both the cut faces and the exposed cross-section.
//! Clipping happens in the mesh's local space; world-space frustum
//! planes are moved into the local frame with
//! [`Plane::to_local`](crate::frustum::Plane::to_local) first.

use crate::frustum::Plane;
use crate::geometry::{MaterialId, MeshData};
use glam::Vec3;
use std::collections::HashMap;

/// Tolerance below which a vertex counts as lying on the plane.
const PLANE_EPSILON: f32 = 1e-6;

/// Clip a mesh against a single plane, keeping the interior side
/// (`signed_distance >= 0`).
///
/// Triangles crossing the plane are cut and re-triangulated, and the
/// cut boundary is capped with triangles carrying `section_material`.
/// A mesh entirely on the interior side is returned with its topology
/// unchanged. Returns `None` when no geometry survives.
pub fn clip_by_plane(
    mesh: &MeshData,
    plane: Plane,
    section_material: MaterialId,
) -> Option<MeshData> {
    if mesh.is_empty() {
        return None;
    }

    let distances: Vec<f32> = mesh
        .positions
        .iter()
        .map(|p| plane.signed_distance(*p))
        .collect();
    let inside = |i: u32| distances[i as usize] >= -PLANE_EPSILON;

    // Untouched mesh: keep the original topology.
    if (0..mesh.positions.len() as u32).all(inside) {
        return Some(mesh.clone());
    }

    let mut out = MeshData::empty();
    // Original vertex index -> output index, filled on first use.
    let mut remap: Vec<Option<u32>> = vec![None; mesh.positions.len()];
    // Cut edge (sorted original index pair) -> output intersection index,
    // so shared edges produce a single shared intersection vertex.
    let mut edge_points: HashMap<(u32, u32), u32> = HashMap::new();
    // Cross-section boundary segments, one per cut triangle.
    let mut cut_segments: Vec<(u32, u32)> = Vec::new();

    for (tri, material) in mesh.triangles().zip(mesh.materials.iter().copied()) {
        let kept = inside(tri[0]) as u8 + inside(tri[1]) as u8 + inside(tri[2]) as u8;

        if kept == 0 {
            continue;
        }

        if kept == 3 {
            for &v in &tri {
                let mapped = map_original(&mut out, &mut remap, mesh, v);
                out.indices.push(mapped);
            }
            out.materials.push(material);
            continue;
        }

        // Mixed triangle: Sutherland-Hodgman walk around its edges.
        let mut polygon: Vec<u32> = Vec::with_capacity(4);
        let mut crossings: Vec<u32> = Vec::with_capacity(2);

        for e in 0..3 {
            let curr = tri[e];
            let next = tri[(e + 1) % 3];
            let d_curr = distances[curr as usize];
            let d_next = distances[next as usize];

            if inside(curr) {
                polygon.push(map_original(&mut out, &mut remap, mesh, curr));
            }
            if (d_curr >= -PLANE_EPSILON) != (d_next >= -PLANE_EPSILON) {
                let denom = d_curr - d_next;
                if denom.abs() > PLANE_EPSILON {
                    let t = d_curr / denom;
                    let point =
                        map_crossing(&mut out, &mut edge_points, mesh, curr, next, t);
                    polygon.push(point);
                    crossings.push(point);
                }
            }
        }

        for i in 1..polygon.len().saturating_sub(1) {
            out.indices
                .extend_from_slice(&[polygon[0], polygon[i], polygon[i + 1]]);
            out.materials.push(material);
        }

        if crossings.len() == 2 && crossings[0] != crossings[1] {
            cut_segments.push((crossings[0], crossings[1]));
        }
    }

    build_cap(&mut out, &cut_segments, plane.normal, section_material);

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Clip a mesh sequentially against all 6 frustum planes.
///
/// The planes must already be expressed in the mesh's local frame. The
/// fold carries a single working mesh and short-circuits to `None` the
/// moment a plane leaves nothing, so at most one intermediate copy is
/// alive regardless of plane count.
pub fn clip_to_frustum(
    mesh: &MeshData,
    planes: &[Plane; 6],
    section_material: MaterialId,
) -> Option<MeshData> {
    planes.iter().try_fold(mesh.clone(), |working, plane| {
        clip_by_plane(&working, *plane, section_material)
    })
}

fn map_original(out: &mut MeshData, remap: &mut [Option<u32>], mesh: &MeshData, v: u32) -> u32 {
    if let Some(mapped) = remap[v as usize] {
        return mapped;
    }
    let mapped = out.positions.len() as u32;
    out.positions.push(mesh.positions[v as usize]);
    remap[v as usize] = Some(mapped);
    mapped
}

fn map_crossing(
    out: &mut MeshData,
    edge_points: &mut HashMap<(u32, u32), u32>,
    mesh: &MeshData,
    a: u32,
    b: u32,
    t: f32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&mapped) = edge_points.get(&key) {
        return mapped;
    }
    let pa = mesh.positions[a as usize];
    let pb = mesh.positions[b as usize];
    let mapped = out.positions.len() as u32;
    out.positions.push(pa + (pb - pa) * t);
    edge_points.insert(key, mapped);
    mapped
}

/// Close the cut boundary with a triangle fan around its centroid.
///
/// The cap faces away from the kept geometry, opposite the clip plane
/// normal. Works for the convex cross-sections frustum slicing
/// produces; degenerate segments are skipped.
fn build_cap(
    out: &mut MeshData,
    cut_segments: &[(u32, u32)],
    plane_normal: Vec3,
    section_material: MaterialId,
) {
    if cut_segments.len() < 2 {
        return;
    }

    let centroid = cut_segments
        .iter()
        .flat_map(|&(a, b)| [out.positions[a as usize], out.positions[b as usize]])
        .sum::<Vec3>()
        / (cut_segments.len() as f32 * 2.0);
    let center = out.positions.len() as u32;
    out.positions.push(centroid);

    for &(a, b) in cut_segments {
        let pa = out.positions[a as usize];
        let pb = out.positions[b as usize];
        let normal = (pa - centroid).cross(pb - centroid);
        if normal.length_squared() < PLANE_EPSILON * PLANE_EPSILON {
            continue;
        }
        // Wind so the cap faces the exterior side of the plane.
        if normal.dot(plane_normal) > 0.0 {
            out.indices.extend_from_slice(&[center, b, a]);
        } else {
            out.indices.extend_from_slice(&[center, a, b]);
        }
        out.materials.push(section_material);
    }
}
