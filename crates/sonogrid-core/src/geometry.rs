use std::f32::consts::{PI, TAU};

/// Indexed UV-sphere mesh shared by every instance.
#[derive(Clone, Debug, Default)]
pub struct SphereMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl SphereMesh {
    /// Full sphere of `radius` with `width_segments` around the equator and
    /// `height_segments` from pole to pole. Pole rows emit a single triangle
    /// per segment. Winding is counter-clockwise seen from outside.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        let mut grid: Vec<Vec<u16>> = Vec::with_capacity(hs as usize + 1);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            let mut row = Vec::with_capacity(ws as usize + 1);
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let (sin_t, cos_t) = (v * PI).sin_cos();
                let (sin_p, cos_p) = (u * TAU).sin_cos();
                row.push(positions.len() as u16);
                positions.push([-radius * cos_p * sin_t, radius * cos_t, radius * sin_p * sin_t]);
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..hs as usize {
            for ix in 0..ws as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { positions, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_by_four_sphere_counts() {
        let m = SphereMesh::uv_sphere(1.0, 8, 4);
        assert_eq!(m.positions.len(), 9 * 5);
        // 8 pole triangles at each end, 2 per quad in the two middle rows
        assert_eq!(m.indices.len(), (8 + 8 + 2 * 8 * 2) * 3);
        assert!(m.indices.iter().all(|&i| (i as usize) < m.positions.len()));
    }

    #[test]
    fn vertices_lie_on_radius() {
        let m = SphereMesh::uv_sphere(2.0, 8, 4);
        for p in &m.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 2.0).abs() < 1e-5);
        }
    }
}
