//! Body table: sizes, distances, textures and per-frame rotation rates.
//!
//! Units are scene units. Rates are radians per refresh cycle at speed 1.

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLUTO: usize = 8;
pub const PLANET_COUNT: usize = 9;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 16.0;
pub const SUN_TEXTURE: &str = "sun";
pub const SUN_SPIN: f32 = 0.004;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0x333333;
pub const SUN_LIGHT_COLOR: u32 = 0xFFFFFF;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_DISTANCE: f32 = 300.0;

// ── Planets ──────────────────────────────────────────────────────────

/// Flat annulus around a planet, lying in its equatorial plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub size: f32,
    /// Distance from the sun along +X.
    pub distance: f32,
    pub texture: &'static str,
    pub ring: Option<RingSpec>,
    /// Rotation about the planet's own axis.
    pub spin: f32,
    /// Rotation of the orbit pivot about the sun.
    pub orbit: f32,
}

const fn planet(name: &'static str, size: f32, distance: f32, spin: f32, orbit: f32) -> PlanetSpec {
    PlanetSpec { name, size, distance, texture: name, ring: None, spin, orbit }
}

/// All planets, innermost first.
pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    planet("mercury", 3.2, 28.0, 0.004, 0.04),
    planet("venus", 5.8, 44.0, 0.002, 0.015),
    planet("earth", 6.0, 62.0, 0.02, 0.01),
    planet("mars", 4.0, 78.0, 0.018, 0.008),
    planet("jupiter", 12.0, 100.0, 0.04, 0.002),
    PlanetSpec {
        ring: Some(RingSpec { inner_radius: 10.0, outer_radius: 20.0, texture: "saturn_ring" }),
        ..planet("saturn", 10.0, 138.0, 0.038, 0.0009)
    },
    PlanetSpec {
        ring: Some(RingSpec { inner_radius: 7.0, outer_radius: 12.0, texture: "uranus_ring" }),
        ..planet("uranus", 7.0, 176.0, 0.03, 0.0004)
    },
    planet("neptune", 7.0, 200.0, 0.032, 0.0001),
    planet("pluto", 2.8, 216.0, 0.008, 0.00007),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_are_ordered_by_distance() {
        assert!(PLANETS.windows(2).all(|w| w[0].distance < w[1].distance));
        assert!(PLANETS[MERCURY].distance > SUN_RADIUS);
    }

    #[test]
    fn only_saturn_and_uranus_have_rings() {
        let ringed: Vec<&str> = PLANETS.iter().filter(|p| p.ring.is_some()).map(|p| p.name).collect();
        assert_eq!(ringed, ["saturn", "uranus"]);
        assert_eq!(PLANETS[SATURN].ring.map(|r| (r.inner_radius, r.outer_radius)), Some((10.0, 20.0)));
        assert_eq!(PLANETS[URANUS].ring.map(|r| (r.inner_radius, r.outer_radius)), Some((7.0, 12.0)));
    }

    #[test]
    fn inner_planets_orbit_faster() {
        assert!(PLANETS[EARTH].orbit > PLANETS[MARS].orbit);
        assert!(PLANETS[NEPTUNE].orbit > PLANETS[PLUTO].orbit);
    }

    #[test]
    fn rotation_rates() {
        let table = [
            ("mercury", 0.004, 0.04),
            ("venus", 0.002, 0.015),
            ("earth", 0.02, 0.01),
            ("mars", 0.018, 0.008),
            ("jupiter", 0.04, 0.002),
            ("saturn", 0.038, 0.0009),
            ("uranus", 0.03, 0.0004),
            ("neptune", 0.032, 0.0001),
            ("pluto", 0.008, 0.00007),
        ];
        assert_eq!(SUN_SPIN, 0.004);
        for (spec, (name, spin, orbit)) in PLANETS.iter().zip(table) {
            assert_eq!((spec.name, spec.spin, spec.orbit), (name, spin, orbit));
        }
    }
}
