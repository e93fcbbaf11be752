//! CPU-side vertex generation for mesh primitives.
//!
//! Backends upload `MeshData` once per distinct `Geometry` and reuse it.

use std::f32::consts::{PI, TAU};

use crate::components::mesh::Geometry;

/// Interleaved-ready vertex streams plus triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Floats per interleaved vertex: position(3) + normal(3) + uv(2).
    pub const VERTEX_FLOATS: usize = 8;

    pub fn from_geometry(geometry: &Geometry) -> Self {
        match *geometry {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                sphere(radius, width_segments, height_segments)
            }
            Geometry::Ring { inner_radius, outer_radius, theta_segments } => {
                ring(inner_radius, outer_radius, theta_segments)
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into `[px, py, pz, nx, ny, nz, u, v]` per vertex.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * Self::VERTEX_FLOATS);
        for i in 0..self.positions.len() {
            out.extend_from_slice(&self.positions[i]);
            out.extend_from_slice(&self.normals[i]);
            out.extend_from_slice(&self.uvs[i]);
        }
        out
    }
}

/// UV sphere centered at the origin, poles on ±Y.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = (width_segments + 1) as usize;
    let count = row * (height_segments as usize + 1);

    let mut mesh = MeshData {
        positions: Vec::with_capacity(count),
        normals: Vec::with_capacity(count),
        uvs: Vec::with_capacity(count),
        indices: Vec::with_capacity(width_segments as usize * height_segments as usize * 6),
    };

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let x = -radius * phi.cos() * theta.sin();
            let y = radius * theta.cos();
            let z = radius * phi.sin() * theta.sin();
            mesh.positions.push([x, y, z]);
            let len = (x * x + y * y + z * z).sqrt();
            if len > 1e-10 {
                mesh.normals.push([x / len, y / len, z / len]);
            } else {
                mesh.normals.push([0.0, 1.0, 0.0]);
            }
            mesh.uvs.push([u, 1.0 - v]);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * (width_segments + 1) + ix + 1;
            let b = iy * (width_segments + 1) + ix;
            let c = (iy + 1) * (width_segments + 1) + ix;
            let d = (iy + 1) * (width_segments + 1) + ix + 1;
            // Degenerate triangles at the poles are skipped.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Flat annulus in the XY plane facing +Z.
pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> MeshData {
    let theta_segments = theta_segments.max(3);
    let row = theta_segments + 1;

    let mut mesh = MeshData::default();

    for j in 0..=1u32 {
        let radius = inner_radius + j as f32 * (outer_radius - inner_radius);
        for i in 0..=theta_segments {
            let angle = i as f32 / theta_segments as f32 * TAU;
            let x = radius * angle.cos();
            let y = radius * angle.sin();
            mesh.positions.push([x, y, 0.0]);
            mesh.normals.push([0.0, 0.0, 1.0]);
            mesh.uvs.push([(x / outer_radius + 1.0) / 2.0, (y / outer_radius + 1.0) / 2.0]);
        }
    }

    for i in 0..theta_segments {
        let a = i;
        let b = i + row;
        let c = i + row + 1;
        let d = i + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    mesh
}
