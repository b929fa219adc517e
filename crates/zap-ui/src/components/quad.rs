use bytemuck::{Pod, Zeroable};
use crate::core::coords::PivotRect;

/// Vertex of a UI quad, laid out for direct upload by the host renderer.
/// 5 floats = 20 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position in node-local space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Texture coordinates, (0, 0) at the top-left corner.
    pub u: f32,
    pub v: f32,
}

impl QuadVertex {
    pub const FLOATS: usize = 5;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Four-corner visual of a UI element, regenerated whenever its size or pivot changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadMesh {
    /// Top-left, top-right, bottom-right, bottom-left.
    pub vertices: [QuadVertex; 4],
    /// Bumped on every regeneration so hosts can skip unchanged uploads.
    pub revision: u32,
}

impl QuadMesh {
    /// Two triangles over the four vertices.
    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    pub fn from_rect(rect: &PivotRect) -> Self {
        let mut mesh = Self {
            vertices: [QuadVertex::default(); 4],
            revision: 0,
        };
        mesh.write_rect(rect);
        mesh
    }

    /// Overwrite the corner positions from `rect`.
    pub fn write_rect(&mut self, rect: &PivotRect) {
        const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        for ((vertex, corner), uv) in self.vertices.iter_mut().zip(rect.corners()).zip(UVS) {
            *vertex = QuadVertex { x: corner.x, y: corner.y, z: 0.0, u: uv[0], v: uv[1] };
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Current bounds, read back from the vertices.
    pub fn rect(&self) -> PivotRect {
        PivotRect {
            left: self.vertices[0].x,
            right: self.vertices[1].x,
            top: self.vertices[0].y,
            bottom: self.vertices[2].y,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coords::pivot_rect;
    use glam::Vec2;

    #[test]
    fn quad_follows_rect() {
        let rect = pivot_rect(Vec2::new(0.0, 1.0), 2.0, 1.0);
        let mesh = QuadMesh::from_rect(&rect);
        assert_eq!(mesh.rect(), rect);
        assert_eq!(mesh.vertices[2].u, 1.0);
        assert_eq!(mesh.vertices[2].v, 1.0);
    }

    #[test]
    fn rewrite_bumps_revision() {
        let mut mesh = QuadMesh::from_rect(&pivot_rect(Vec2::splat(0.5), 1.0, 1.0));
        let before = mesh.revision;
        mesh.write_rect(&pivot_rect(Vec2::splat(0.5), 2.0, 2.0));
        assert_eq!(mesh.revision, before + 1);
        assert_eq!(mesh.rect().width(), 2.0);
    }

    #[test]
    fn byte_view_has_vertex_stride() {
        let mesh = QuadMesh::from_rect(&pivot_rect(Vec2::ZERO, 1.0, 1.0));
        assert_eq!(mesh.as_bytes().len(), 4 * QuadVertex::STRIDE_BYTES);
    }
}
