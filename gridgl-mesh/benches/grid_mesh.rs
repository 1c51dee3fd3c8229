use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridgl_mesh::{Alignment, GridMeshBuilder, SurfaceSize};

fn bench_grid_mesh(c: &mut Criterion) {
    let surface = SurfaceSize::new(1920, 1080);
    let mut group = c.benchmark_group("grid_mesh");

    for segments in [1_u32, 16, 64, 255] {
        let builder = GridMeshBuilder::new(1920.0, 1080.0)
            .segments(segments, segments)
            .texture_coords(true)
            .alignment(Alignment::TOP | Alignment::LEFT);

        group.bench_with_input(BenchmarkId::from_parameter(segments), &builder, |b, builder| {
            b.iter(|| builder.build(black_box(surface)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_mesh);
criterion_main!(benches);
