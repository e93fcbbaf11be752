use crate::api::types::{Color, TextureId};

/// Default tessellation for spheres (matches the 30×30 body spheres).
pub const DEFAULT_SPHERE_SEGMENTS: u32 = 30;
/// Default angular tessellation for rings.
pub const DEFAULT_RING_SEGMENTS: u32 = 32;

/// Geometry primitive attached to a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat annulus in the local XY plane.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
}

impl Geometry {
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: DEFAULT_SPHERE_SEGMENTS,
            height_segments: DEFAULT_SPHERE_SEGMENTS,
        }
    }

    pub fn ring(inner_radius: f32, outer_radius: f32) -> Self {
        Geometry::Ring {
            inner_radius,
            outer_radius,
            theta_segments: DEFAULT_RING_SEGMENTS,
        }
    }

    pub fn is_ring(&self) -> bool {
        matches!(self, Geometry::Ring { .. })
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self, Geometry::Sphere { .. })
    }
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Unlit: texture × color, ignores lights.
    Basic,
    /// Lit: reacts to ambient and point lights.
    Standard,
}

/// Which faces are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub texture: Option<TextureId>,
    pub color: Color,
    pub side: Side,
}

impl Material {
    pub fn basic(texture: Option<TextureId>) -> Self {
        Self {
            kind: MaterialKind::Basic,
            texture,
            color: Color::WHITE,
            side: Side::Front,
        }
    }

    pub fn standard(texture: Option<TextureId>) -> Self {
        Self {
            kind: MaterialKind::Standard,
            ..Self::basic(texture)
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_lit(&self) -> bool {
        self.kind == MaterialKind::Standard
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(None)
    }
}

/// Component for rendered meshes: geometry plus material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    /// Textured sphere that reacts to lighting.
    pub fn lit_sphere(radius: f32, texture: TextureId) -> Self {
        Self::new(Geometry::sphere(radius), Material::standard(Some(texture)))
    }

    /// Textured sphere that ignores lighting (self-illuminated bodies).
    pub fn unlit_sphere(radius: f32, texture: TextureId) -> Self {
        Self::new(Geometry::sphere(radius), Material::basic(Some(texture)))
    }

    /// Double-sided, unlit textured annulus.
    pub fn ring(inner_radius: f32, outer_radius: f32, texture: TextureId) -> Self {
        Self::new(
            Geometry::ring(inner_radius, outer_radius),
            Material::basic(Some(texture)).with_side(Side::Double),
        )
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_double_sided_and_unlit() {
        let ring = MeshComponent::ring(10.0, 20.0, TextureId(3));
        assert!(ring.geometry.is_ring());
        assert_eq!(ring.material.side, Side::Double);
        assert!(!ring.material.is_lit());
        assert_eq!(ring.material.texture, Some(TextureId(3)));
    }

    #[test]
    fn lit_sphere_uses_default_segments() {
        let mesh = MeshComponent::lit_sphere(6.0, TextureId(1));
        match mesh.geometry {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                assert_eq!(radius, 6.0);
                assert_eq!(width_segments, DEFAULT_SPHERE_SEGMENTS);
                assert_eq!(height_segments, DEFAULT_SPHERE_SEGMENTS);
            }
            _ => panic!("Expected sphere"),
        }
        assert!(mesh.material.is_lit());
        assert_eq!(mesh.material.side, Side::Front);
    }
}
