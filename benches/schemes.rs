use advect1d::{Config, Scheme, Simulation};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_schemes(c: &mut Criterion) {
    let sim = Simulation::new(&Config::default().with_resolution(400)).unwrap();

    for scheme in Scheme::ALL {
        c.bench_function(scheme.name(), |b| {
            b.iter(|| black_box(&sim).run(black_box(scheme)).unwrap())
        });
    }
}

criterion_group!(benches, benchmark_schemes);
criterion_main!(benches);
