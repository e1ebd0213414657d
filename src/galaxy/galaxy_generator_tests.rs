use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants_config::SimulationConfig;
use crate::errors::SimulationError;
use crate::galaxy::{generate_galaxy, GalaxyGenerator, ObjectKind};
use crate::utils::light_years_to_metres;

fn generator() -> GalaxyGenerator {
    GalaxyGenerator::new(&SimulationConfig::default())
}

#[test]
fn test_generate_count_and_ids() {
    let mut rng = StdRng::seed_from_u64(42);
    let galaxy = generator().generate(50, 1000.0, 800.0, &mut rng).unwrap();
    assert_eq!(galaxy.len(), 50);
    let ids: Vec<u64> = galaxy.iter().map(|o| o.id).collect();
    assert_eq!(ids, (0..50).collect::<Vec<u64>>());
}

#[test]
fn test_singularity_is_first_and_centred() {
    let config = SimulationConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let galaxy = generator().generate(10, 100.0, 60.0, &mut rng).unwrap();

    let singularity = galaxy.as_slice()[0];
    assert_eq!(singularity.kind, ObjectKind::Singularity);
    assert_eq!(singularity.mass, config.singularity_mass);
    assert_eq!(singularity.x, light_years_to_metres(100.0) / 2.0);
    assert_eq!(singularity.y, light_years_to_metres(60.0) / 2.0);
    assert_eq!(singularity.velocity(), (0.0, 0.0));

    let singularities = galaxy.iter().filter(|o| o.kind == ObjectKind::Singularity).count();
    assert_eq!(singularities, 1);
}

#[test]
fn test_single_object_is_only_the_singularity() {
    let mut rng = StdRng::seed_from_u64(0);
    let galaxy = generator().generate(1, 100.0, 100.0, &mut rng).unwrap();
    assert_eq!(galaxy.len(), 1);
    assert_eq!(galaxy.as_slice()[0].kind, ObjectKind::Singularity);
}

#[test]
fn test_non_positive_count_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    for count in [0, -1, -100] {
        let result = generator().generate(count, 100.0, 100.0, &mut rng);
        assert!(
            matches!(result, Err(SimulationError::Configuration(_))),
            "count {} should be rejected",
            count
        );
    }
}

#[test]
fn test_inverted_mass_range_is_rejected() {
    let config = SimulationConfig { star_mass_range: (10.0, 1.0), ..Default::default() };
    let mut rng = StdRng::seed_from_u64(0);
    let result = GalaxyGenerator::new(&config).generate(3, 100.0, 100.0, &mut rng);
    assert!(matches!(result, Err(SimulationError::Configuration(_))));
}

#[test]
fn test_stars_stay_within_region_and_mass_range() {
    let config = SimulationConfig::default();
    let (min_mass, max_mass) = config.star_mass_range;
    let width = 400.0;
    let height = 200.0;
    let mut rng = StdRng::seed_from_u64(11);
    let galaxy = GalaxyGenerator::new(&config).generate(200, width, height, &mut rng).unwrap();

    let (cx, cy) = (light_years_to_metres(width) / 2.0, light_years_to_metres(height) / 2.0);
    for star in galaxy.iter().skip(1) {
        assert_eq!(star.kind, ObjectKind::Star);
        assert!(star.mass >= min_mass && star.mass <= max_mass, "mass {} out of range", star.mass);
        assert!((star.x - cx).abs() <= cx, "star {} x outside region", star.id);
        assert!((star.y - cy).abs() <= cy, "star {} y outside region", star.id);
    }
}

#[test]
fn test_initial_velocity_follows_quadrant_pattern() {
    let config = SimulationConfig::default();
    let width = 1000.0;
    let height = 1000.0;
    let mut rng = StdRng::seed_from_u64(5);
    let galaxy = GalaxyGenerator::new(&config).generate(300, width, height, &mut rng).unwrap();

    let width_m = light_years_to_metres(width);
    let height_m = light_years_to_metres(height);
    let (cx, cy) = (width_m / 2.0, height_m / 2.0);
    let v0 = config.initial_speed_magnitude;
    let dt = config.step_interval;

    for star in galaxy.iter().skip(1) {
        let expected_xs = (if star.y < cy { -v0 } else { v0 }) * (1.0 - star.x / width_m) * dt;
        let expected_ys = (if star.x < cx { v0 } else { -v0 }) * (1.0 - star.y / height_m) * dt;
        approx::assert_relative_eq!(star.vx, expected_xs, max_relative = 1e-12);
        approx::assert_relative_eq!(star.vy, expected_ys, max_relative = 1e-12);
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let config = SimulationConfig::new(Some(25), None, None, Some(99));
    let first = generate_galaxy(&config).unwrap();
    let second = generate_galaxy(&config).unwrap();
    assert_eq!(first, second);
}
