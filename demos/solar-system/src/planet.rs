use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use orrery_engine::{
    Geometry, LocalTransform, Material, MeshComponent, NodeId, SceneGraph, Side, TextureId,
};

/// Ring geometry and its resolved texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: Option<TextureId>,
}

/// Handles to a planet's nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    /// Orbit anchor at the origin; rotating it moves the planet around the sun.
    pub pivot: NodeId,
    /// The planet sphere; rotating it spins the planet (and its ring).
    pub mesh: NodeId,
    pub ring: Option<NodeId>,
}

/// Add a planet to `scene`: a pivot under the root, a lit sphere of radius
/// `size` at (`distance`, 0, 0) under the pivot, and optionally a
/// double-sided ring under the sphere, laid flat in its equatorial plane.
///
/// A missing texture draws the body untextured.
pub fn create_planet(
    scene: &mut SceneGraph,
    name: &str,
    distance: f32,
    size: f32,
    texture: Option<TextureId>,
    ring: Option<RingConfig>,
) -> Planet {
    let pivot = scene.add_pivot(scene.root(), format!("{name}-pivot"));
    let mesh = scene.add_mesh(
        pivot,
        name,
        MeshComponent::new(Geometry::sphere(size), Material::standard(texture)),
        LocalTransform::new().with_position(Vec3::new(distance, 0.0, 0.0)),
    );

    let ring = ring.map(|r| {
        scene.add_mesh(
            mesh,
            format!("{name}-ring"),
            MeshComponent::new(
                Geometry::ring(r.inner_radius, r.outer_radius),
                Material::basic(r.texture).with_side(Side::Double),
            ),
            LocalTransform::new().with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        )
    });

    Planet { pivot, mesh, ring }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_sits_at_distance_under_its_pivot() {
        let mut scene = SceneGraph::new();
        let earth = create_planet(&mut scene, "earth", 62.0, 6.0, Some(TextureId(2)), None);
        scene.propagate();

        assert_eq!(scene.parent(earth.pivot), Some(scene.root()));
        assert_eq!(scene.parent(earth.mesh), Some(earth.pivot));
        assert_eq!(scene.children(earth.pivot), &[earth.mesh]);
        assert!(scene.children(earth.mesh).is_empty());
        assert!(earth.ring.is_none());
        assert!((scene.world_position(earth.mesh) - Vec3::new(62.0, 0.0, 0.0)).length() < 1e-5);

        let mesh = scene.get(earth.mesh).and_then(|n| n.mesh).unwrap();
        assert!(mesh.material.is_lit());
        assert_eq!(mesh.material.texture, Some(TextureId(2)));
    }

    #[test]
    fn ring_is_a_flat_child_of_the_mesh() {
        let mut scene = SceneGraph::new();
        let ring = RingConfig { inner_radius: 10.0, outer_radius: 20.0, texture: Some(TextureId(7)) };
        let saturn = create_planet(&mut scene, "saturn", 138.0, 10.0, Some(TextureId(6)), Some(ring));
        scene.propagate();

        let ring_id = saturn.ring.unwrap();
        assert_eq!(scene.parent(ring_id), Some(saturn.mesh));
        assert_eq!(scene.children(saturn.mesh), &[ring_id]);

        let node = scene.get(ring_id).unwrap();
        let mesh = node.mesh.unwrap();
        assert!(mesh.geometry.is_ring());
        assert_eq!(mesh.material.side, Side::Double);
        assert!(!mesh.material.is_lit());

        // The ring's normal (+Z in its own frame) ends up along the polar axis.
        let normal = scene.world_matrix(ring_id).transform_vector3(Vec3::Z);
        assert!((normal - Vec3::NEG_Y).length() < 1e-5 || (normal - Vec3::Y).length() < 1e-5);
        assert!((scene.world_position(ring_id) - Vec3::new(138.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn orbit_and_spin_are_independent() {
        let mut scene = SceneGraph::new();
        let mars = create_planet(&mut scene, "mars", 78.0, 4.0, None, None);
        scene.rotate_y(mars.pivot, FRAC_PI_2);
        scene.rotate_y(mars.mesh, 1.0);
        scene.propagate();

        // A quarter orbit about +Y carries +X to -Z.
        assert!((scene.world_position(mars.mesh) - Vec3::new(0.0, 0.0, -78.0)).length() < 1e-3);
        assert!((scene.get(mars.mesh).unwrap().local.rotation.y - 1.0).abs() < 1e-6);
    }
}
