//! Solar system scene: a sun, nine planets on constant-rate orbits,
//! two ringed planets, ambient plus sun light, and a starfield skybox.

use orrery_engine::{
    AmbientLight, App, Background, Color, ControlState, EngineContext, Geometry, LocalTransform,
    Material, MeshComponent, NodeId, PointLight, TextureId,
};

use crate::bodies::{self, PlanetSpec, PLANETS, PLANET_COUNT};
use crate::planet::{create_planet, Planet, RingConfig};

/// One planet's nodes plus its rotation rates.
struct Body {
    planet: Planet,
    spin: f32,
    orbit: f32,
}

pub struct SolarSystem {
    sun: NodeId,
    bodies: Vec<Body>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            sun: NodeId::ROOT,
            bodies: Vec::with_capacity(PLANET_COUNT),
        }
    }

    pub fn sun(&self) -> NodeId {
        self.sun
    }

    /// Planets in table order.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.bodies.iter().map(|b| &b.planet)
    }

    fn add_planet(&mut self, ctx: &mut EngineContext, spec: &PlanetSpec) {
        let texture = texture_of(ctx, spec.texture);
        let ring = spec.ring.map(|r| RingConfig {
            inner_radius: r.inner_radius,
            outer_radius: r.outer_radius,
            texture: texture_of(ctx, r.texture),
        });
        let planet = create_planet(&mut ctx.scene, spec.name, spec.distance, spec.size, texture, ring);
        self.bodies.push(Body {
            planet,
            spin: spec.spin,
            orbit: spec.orbit,
        });
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a texture by name. Unknown names draw untextured.
fn texture_of(ctx: &EngineContext, name: &str) -> Option<TextureId> {
    match ctx.textures.require(name) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("{err}; drawing untextured");
            None
        }
    }
}

impl App for SolarSystem {
    fn init(&mut self, ctx: &mut EngineContext) {
        if let Some(skybox) = ctx.textures.skybox() {
            ctx.scene.set_background(Background::CubeMap(skybox));
        }

        ctx.lights.set_ambient(AmbientLight::new(Color::from_hex(bodies::AMBIENT_COLOR), 1.0));
        ctx.lights.add(PointLight::new(
            Color::from_hex(bodies::SUN_LIGHT_COLOR),
            bodies::SUN_LIGHT_INTENSITY,
            bodies::SUN_LIGHT_DISTANCE,
        ));

        // The sun is its own light source, so it ignores lighting.
        let sun_texture = texture_of(ctx, bodies::SUN_TEXTURE);
        self.sun = ctx.scene.add_mesh(
            ctx.scene.root(),
            "sun",
            MeshComponent::new(Geometry::sphere(bodies::SUN_RADIUS), Material::basic(sun_texture)),
            LocalTransform::new(),
        );

        for spec in &PLANETS {
            self.add_planet(ctx, spec);
        }
        log::info!("solar system built: sun + {} planets", self.bodies.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, control: &ControlState) {
        let speed = control.speed;
        ctx.scene.rotate_y(self.sun, bodies::SUN_SPIN * speed);
        for body in &self.bodies {
            ctx.scene.rotate_y(body.planet.mesh, body.spin * speed);
            ctx.scene.rotate_y(body.planet.pivot, body.orbit * speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, PLUTO, SATURN, URANUS};
    use orrery_engine::{
        AssetManifest, BufferRenderer, NodeKind, Renderer, TextureRegistry, LIGHT_FLOATS,
    };
    use orrery_web::AppRunner;
    use std::f32::consts::TAU;

    const MANIFEST: &str = include_str!("../assets/manifest.json");

    fn runner() -> AppRunner<SolarSystem, BufferRenderer> {
        let manifest = AssetManifest::from_json(MANIFEST).unwrap();
        let textures = TextureRegistry::from_manifest(&manifest);
        let mut runner = AppRunner::new(SolarSystem::new(), BufferRenderer::new(1024, 768), textures);
        runner.init();
        runner
    }

    fn rotation_y(runner: &AppRunner<SolarSystem, BufferRenderer>, id: NodeId) -> f32 {
        runner.context().scene.get(id).unwrap().local.rotation.y
    }

    /// Angular distance on the circle.
    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    fn count_scene(runner: &AppRunner<SolarSystem, BufferRenderer>) -> (usize, usize, usize) {
        let scene = &runner.context().scene;
        let rings = scene.iter().filter(|n| n.mesh.is_some_and(|m| m.geometry.is_ring())).count();
        let spheres = scene.iter().filter(|n| n.mesh.is_some_and(|m| m.geometry.is_sphere())).count();
        (scene.count(NodeKind::Pivot), spheres, rings)
    }

    #[test]
    fn manifest_lists_all_images() {
        let manifest = AssetManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.skybox.len(), 6);
        assert_eq!(manifest.textures.len(), 12);
        for spec in &PLANETS {
            assert!(manifest.textures.contains_key(spec.texture), "missing {}", spec.texture);
            if let Some(ring) = spec.ring {
                assert!(manifest.textures.contains_key(ring.texture));
            }
        }
        assert!(manifest.textures.contains_key(bodies::SUN_TEXTURE));
    }

    #[test]
    fn scene_has_expected_bodies() {
        let r = runner();
        // 9 pivots; sun + 9 planets as spheres; 2 rings.
        assert_eq!(count_scene(&r), (9, 10, 2));
        assert_eq!(r.context().lights.count(), 1);
        assert!(matches!(r.context().scene.background(), Background::CubeMap(_)));
    }

    #[test]
    fn counts_survive_frames_and_resizes() {
        let mut r = runner();
        for i in 0..50 {
            r.frame();
            if i % 10 == 0 {
                r.resize(640 + i, 480);
            }
        }
        r.init();
        assert_eq!(count_scene(&r), (9, 10, 2));
        assert_eq!(r.renderer().instance_count(), 12);
    }

    #[test]
    fn only_saturn_and_uranus_have_a_ring_child() {
        let r = runner();
        let scene = &r.context().scene;
        for (i, planet) in r.app().planets().enumerate() {
            let rings = scene
                .children(planet.mesh)
                .iter()
                .filter(|&&c| scene.get(c).and_then(|n| n.mesh).is_some_and(|m| m.geometry.is_ring()))
                .count();
            let expected = if i == SATURN || i == URANUS { 1 } else { 0 };
            assert_eq!(rings, expected, "planet {}", PLANETS[i].name);
            assert_eq!(scene.children(planet.pivot), &[planet.mesh]);
        }
    }

    #[test]
    fn rotation_accumulates_per_cycle() {
        let mut r = runner();
        let cycles = 300;
        for _ in 0..cycles {
            r.frame();
        }
        let n = cycles as f32;
        assert!(angle_diff(rotation_y(&r, r.app().sun()), n * bodies::SUN_SPIN) < 1e-3);
        for (planet, spec) in r.app().planets().zip(PLANETS.iter()) {
            assert!(angle_diff(rotation_y(&r, planet.mesh), n * spec.spin) < 1e-3, "{} spin", spec.name);
            assert!(angle_diff(rotation_y(&r, planet.pivot), n * spec.orbit) < 1e-3, "{} orbit", spec.name);
        }
    }

    #[test]
    fn rates_match_reference_table() {
        // Radians per cycle, Mercury through Pluto.
        const SPIN: [f32; 9] = [0.004, 0.002, 0.02, 0.018, 0.04, 0.038, 0.03, 0.032, 0.008];
        const ORBIT: [f32; 9] = [0.04, 0.015, 0.01, 0.008, 0.002, 0.0009, 0.0004, 0.0001, 0.00007];

        let mut r = runner();
        r.frame();
        assert!((rotation_y(&r, r.app().sun()) - 0.004).abs() < 1e-7);
        assert_eq!(r.app().planets().count(), 9);
        for (i, planet) in r.app().planets().enumerate() {
            assert!((rotation_y(&r, planet.mesh) - SPIN[i]).abs() < 1e-7, "{} spin", PLANETS[i].name);
            assert!((rotation_y(&r, planet.pivot) - ORBIT[i]).abs() < 1e-7, "{} orbit", PLANETS[i].name);
        }
    }

    #[test]
    fn sun_light_reaches_the_backend() {
        let mut r = runner();
        r.frame();
        let lights = r.renderer().lights();
        assert_eq!(lights.len(), LIGHT_FLOATS);
        // [x, y, z, distance, r·i, g·i, b·i, decay]
        assert_eq!(lights, &[0.0, 0.0, 0.0, 300.0, 2.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn missing_textures_draw_untextured() {
        let mut r = AppRunner::new(SolarSystem::new(), BufferRenderer::new(1024, 768), TextureRegistry::new());
        r.init();
        let scene = &r.context().scene;
        let meshes: Vec<_> = scene.iter().filter_map(|n| n.mesh).collect();
        assert_eq!(meshes.len(), 12);
        assert!(meshes.iter().all(|m| m.material.texture.is_none()));
        assert!(r.frame());
    }

    #[test]
    fn speed_scales_every_increment() {
        let mut r = runner();
        assert_eq!(r.set_speed(2.5), 2.5);
        for _ in 0..100 {
            r.frame();
        }
        let earth = r.app().planets().nth(EARTH).copied().unwrap();
        let pluto = r.app().planets().nth(PLUTO).copied().unwrap();
        assert!(angle_diff(rotation_y(&r, earth.mesh), 100.0 * 0.02 * 2.5) < 1e-3);
        assert!(angle_diff(rotation_y(&r, earth.pivot), 100.0 * 0.01 * 2.5) < 1e-3);
        assert!(angle_diff(rotation_y(&r, pluto.pivot), 100.0 * 0.00007 * 2.5) < 1e-4);
    }

    #[test]
    fn speed_is_clamped() {
        let mut r = runner();
        assert_eq!(r.speed(), 1.0);
        assert_eq!(r.set_speed(0.0), 0.1);
        assert_eq!(r.set_speed(1000.0), 10.0);
        assert_eq!(r.set_speed(-3.0), 0.1);
    }

    #[test]
    fn resize_sets_aspect_and_surface() {
        let mut r = runner();
        r.resize(1600, 900);
        assert!((r.camera().aspect - 1600.0 / 900.0).abs() < 1e-6);
        assert_eq!(r.renderer().surface_size(), (1600, 900));
    }

    #[test]
    fn ring_follows_planet_spin() {
        let mut r = runner();
        for _ in 0..10 {
            r.frame();
        }
        let saturn = r.app().planets().nth(SATURN).copied().unwrap();
        let scene = &r.context().scene;
        let ring = saturn.ring.unwrap();
        assert!((scene.world_position(ring) - scene.world_position(saturn.mesh)).length() < 1e-3);
    }
}
