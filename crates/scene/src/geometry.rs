//! Procedural mesh generation.
//!
//! All generators lay vertices out on a `(columns + 1) x (rows + 1)` grid so
//! that the seam column duplicates the first one with a different UV.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Parametric description of one of the showroom meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshKind {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

impl MeshKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Torus { .. } => "torus",
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
            Self::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => plane(width, height, width_segments, height_segments),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centred at the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(hs as usize + 1);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // Shift pole UVs half a segment so each pole triangle samples its own column
        let u_offset = if iy == 0 {
            0.5 / ws as f32
        } else if iy == hs {
            -0.5 / ws as f32
        } else {
            0.0
        };

        let mut row = Vec::with_capacity(ws as usize + 1);
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_t, cos_t) = (v * PI).sin_cos();
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let p = Vec3::new(-radius * cos_p * sin_t, radius * cos_t, radius * sin_p * sin_t);
            let n = p.normalize_or_zero();
            row.push(mesh.vertices.len() as u32);
            mesh.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: [u + u_offset, 1.0 - v],
            });
        }
        grid.push(row);
    }

    for iy in 0..hs as usize {
        for ix in 0..ws as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            // Degenerate pole triangles are skipped
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Plane in the XY plane facing +Z.
pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let gx = width_segments.max(1);
    let gy = height_segments.max(1);
    let seg_w = width / gx as f32;
    let seg_h = height / gy as f32;
    let mut mesh = MeshData::default();

    for iy in 0..=gy {
        let y = iy as f32 * seg_h - height / 2.0;
        for ix in 0..=gx {
            let x = ix as f32 * seg_w - width / 2.0;
            mesh.vertices.push(MeshVertex {
                position: [x, -y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32],
            });
        }
    }

    let stride = gx + 1;
    for iy in 0..gy {
        for ix in 0..gx {
            let a = ix + stride * iy;
            let b = ix + stride * (iy + 1);
            let c = ix + 1 + stride * (iy + 1);
            let d = ix + 1 + stride * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Torus around the Z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=rs {
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let v = j as f32 / rs as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: (p - center).normalize_or_zero().to_array(),
                uv: [i as f32 / ts as f32, j as f32 / rs as f32],
            });
        }
    }

    let stride = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn sphere_counts() {
        let mesh = sphere(0.5, 64, 64);
        assert_eq!(mesh.vertices.len(), 65 * 65);
        // Pole rows contribute one triangle per segment instead of two
        assert_eq!(mesh.triangle_count(), 64 * 64 * 2 - 2 * 64);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let mesh = sphere(0.5, 16, 8);
        for v in &mesh.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 0.5).abs() < 1e-5);
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn plane_counts_and_bounds() {
        let mesh = plane(1.0, 1.0, 100, 100);
        assert_eq!(mesh.vertices.len(), 101 * 101);
        assert_eq!(mesh.triangle_count(), 100 * 100 * 2);
        assert_indices_in_range(&mesh);
        for v in &mesh.vertices {
            assert!(v.position[0].abs() <= 0.5 + 1e-6);
            assert!(v.position[1].abs() <= 0.5 + 1e-6);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn plane_winding_faces_plus_z() {
        let mesh = plane(1.0, 1.0, 1, 1);
        let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
        let tri = &mesh.indices[0..3];
        let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
        assert!(n.z > 0.0);
    }

    #[test]
    fn torus_counts() {
        let mesh = torus(0.3, 0.2, 64, 128);
        assert_eq!(mesh.vertices.len(), 65 * 129);
        assert_eq!(mesh.triangle_count(), 64 * 128 * 2);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn torus_extent() {
        let mesh = torus(0.3, 0.2, 16, 32);
        let max_r = mesh
            .vertices
            .iter()
            .map(|v| Vec3::new(v.position[0], v.position[1], 0.0).length())
            .fold(0.0_f32, f32::max);
        assert!((max_r - 0.5).abs() < 1e-5);
    }

    #[test]
    fn degenerate_segments_are_raised() {
        let mesh = sphere(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert!(!mesh.indices.is_empty());
    }

    #[test]
    fn kind_builds_matching_mesh() {
        let kind = MeshKind::Plane {
            width: 2.0,
            height: 2.0,
            width_segments: 2,
            height_segments: 3,
        };
        assert_eq!(kind.name(), "plane");
        assert_eq!(kind.build().vertices.len(), 3 * 4);
    }
}
