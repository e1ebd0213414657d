use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use galactic_orbits::cluster::integrate_subset;
use galactic_orbits::galaxy::{partition, GalaxyGenerator};
use galactic_orbits::SimulationConfig;

pub fn bench_integrate_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate_subset");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);
    let config = SimulationConfig::default();
    let generator = GalaxyGenerator::new(&config);

    for &count in &[100_i64, 500, 2_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let galaxy = generator
            .generate(count, config.region_width, config.region_height, &mut rng)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("whole_galaxy", count), &galaxy, |b, galaxy| {
            b.iter(|| integrate_subset(black_box(galaxy.as_slice().to_vec()), galaxy.as_slice(), &config))
        });

        // one worker's share out of four
        let share = partition(&galaxy, 4).unwrap().swap_remove(0);
        group.bench_with_input(BenchmarkId::new("quarter_share", count), &share, |b, share| {
            b.iter(|| integrate_subset(black_box(share.clone()), galaxy.as_slice(), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_integrate_subset);
criterion_main!(benches);
