//! Benchmarks for the per-frame heuristic scoring hot path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use head_scroll::filters::ExponentialSmoother;
use head_scroll::frame::PixelBuffer;
use head_scroll::region_scorer;

fn synthetic_frame(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::blank(width, height);
    // Speckled background plus a face-sized skin patch near the anchor.
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 31 + y * 17) % 200) as u8;
            buf.set_rgb(x, y, v / 2, v / 2, v / 2);
        }
    }
    let cx = width / 2;
    let cy = (f64::from(height) * 0.4) as u32;
    for y in cy.saturating_sub(20)..(cy + 20).min(height) {
        for x in cx.saturating_sub(20)..(cx + 20).min(width) {
            buf.set_rgb(x, y, 180, 120, 90);
        }
    }
    buf
}

fn benchmark_scorer(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_scorer");

    // Full-resolution frame versus the down-scaled analysis buffer.
    for (name, width, height) in [("vga", 640u32, 480u32), ("analysis_30pct", 192, 144)] {
        let frame = synthetic_frame(width, height);
        group.bench_with_input(BenchmarkId::new("score", name), &frame, |b, frame| {
            b.iter(|| black_box(region_scorer::score(black_box(frame))));
        });
    }

    group.finish();
}

fn benchmark_downscale(c: &mut Criterion) {
    let frame = synthetic_frame(640, 480);
    c.bench_function("downscale_vga_to_30pct", |b| {
        b.iter(|| black_box(frame.downscale(black_box(0.3))));
    });
}

fn benchmark_smoother(c: &mut Criterion) {
    c.bench_function("exponential_smoother", |b| {
        let mut filter = ExponentialSmoother::default();
        let mut y = 100.0;
        b.iter(|| {
            y = (y + 1.0) % 200.0;
            black_box(filter.apply(black_box(y)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_scorer,
    benchmark_downscale,
    benchmark_smoother
);
criterion_main!(benches);
