use criterion::{Criterion, criterion_group, criterion_main};
use sikembang::{prelude::*, shared::normalize};
use std::{hint::black_box, time::Duration};

/// Facilities scattered over East Java, about the size of a province export.
fn repository(count: usize) -> Repository {
    let facilities = (0..count).map(|i| {
        // Deterministic scatter, no rng needed.
        let latitude = -8.6 + ((i * 7919) % 1000) as f64 * 0.0015;
        let longitude = 111.0 + ((i * 104_729) % 1000) as f64 * 0.0030;
        let name = format!("Posyandu {i}");
        Facility {
            id: i.to_string().into(),
            normalized_name: normalize(&name).into(),
            name: name.into(),
            coordinate: Some(Coordinate::new(latitude, longitude)),
            ..Default::default()
        }
    });
    Repository::new().with_facilities(facilities)
}

fn criterion_benchmark(c: &mut Criterion) {
    let repository = repository(20_000);
    let observer = Coordinate::new(-7.9826, 112.6308);

    let mut group = c.benchmark_group("Proximity");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Nearest 10", |b| {
        b.iter(|| black_box(repository.nearest(Some(observer), 10)))
    });

    group.bench_function("Within 2 km", |b| {
        b.iter(|| {
            black_box(repository.facilities_by_coordinate(&observer, Distance::from_kilometers(2.0)))
        })
    });

    group.bench_function("Within 25 km", |b| {
        b.iter(|| {
            black_box(repository.facilities_by_coordinate(&observer, Distance::from_kilometers(25.0)))
        })
    });

    group.bench_function("Search", |b| {
        b.iter(|| black_box(repository.search_by_name("posyandu 1234")))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
