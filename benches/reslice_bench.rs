use criterion::{criterion_group, criterion_main, Criterion};
use neuroslice::render::{self, DisplayMapping, RenderRequest};
use neuroslice::slice::{extract_slice, SlicePlane, SliceRequest};
use neuroslice::stats;
use neuroslice::types::{BrightnessContrast, RescaleParams};
use neuroslice::volume::{decode_volume, Volume, VolumeHeader};
use std::hint::black_box;

/// 256x256x128 float32 volume with a smooth synthetic gradient
fn synthetic_volume() -> Volume {
    let (nx, ny, nz) = (256i64, 256i64, 128i64);
    let header = VolumeHeader::new(vec![3, nx, ny, nz], 16, RescaleParams::identity());
    let bytes: Vec<u8> = (0..nx * ny * nz)
        .map(|i| (i % 4096) as f32 / 16.0)
        .flat_map(f32::to_le_bytes)
        .collect();
    decode_volume(&header, &bytes).unwrap()
}

// ============================================================================
// TIER 1: FULL PIPELINE BENCHMARKS (Primary Baseline)
// ============================================================================

/// Decode plus render (cold start per iteration)
fn bench_full_pipeline_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline_cold");
    group.sample_size(20);

    let header = VolumeHeader::new(vec![3, 256, 256, 128], 16, RescaleParams::identity());
    let bytes: Vec<u8> = (0..256i64 * 256 * 128)
        .map(|i| (i % 4096) as f32 / 16.0)
        .flat_map(f32::to_le_bytes)
        .collect();

    group.bench_function("decode_and_render_axial", |b| {
        b.iter(|| {
            let volume = decode_volume(black_box(&header), black_box(&bytes)).unwrap();
            let request = RenderRequest::new(
                &volume,
                SliceRequest::new(SlicePlane::Axial, 64),
                DisplayMapping::BrightnessContrast(BrightnessContrast::default()),
            );
            render::render(black_box(&request)).unwrap()
        });
    });

    group.finish();
}

/// Render from an already-decoded volume (warm start)
fn bench_full_pipeline_warm(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline_warm");

    let volume = synthetic_volume();
    // Prime the memoized global range outside the measured loop
    let _ = volume.intensity_range();

    for (name, plane) in [
        ("axial", SlicePlane::Axial),
        ("coronal", SlicePlane::Coronal),
        ("sagittal", SlicePlane::Sagittal),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let request = RenderRequest::new(
                    &volume,
                    SliceRequest::new(plane, 64),
                    DisplayMapping::BrightnessContrast(BrightnessContrast::default()),
                );
                render::render(black_box(&request)).unwrap()
            });
        });
    }

    group.finish();
}

// ============================================================================
// TIER 2: COMPONENT-LEVEL BENCHMARKS (Diagnostic)
// ============================================================================

/// Reslicing alone, with and without slab averaging
fn bench_reslice(c: &mut Criterion) {
    let mut group = c.benchmark_group("reslice");

    let volume = synthetic_volume();

    group.bench_function("axial_thin", |b| {
        b.iter(|| {
            let request = SliceRequest::new(SlicePlane::Axial, 64);
            extract_slice(black_box(&volume), black_box(&request)).unwrap()
        });
    });

    group.bench_function("sagittal_slab_9", |b| {
        b.iter(|| {
            let request = SliceRequest::new(SlicePlane::Sagittal, 128).with_thickness(9);
            extract_slice(black_box(&volume), black_box(&request)).unwrap()
        });
    });

    group.finish();
}

/// Statistics passes over the whole volume
fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    group.sample_size(20);

    let volume = synthetic_volume();

    group.bench_function("auto_window", |b| {
        b.iter(|| stats::auto_window(black_box(&volume)));
    });

    group.bench_function("histogram_100_bins", |b| {
        b.iter(|| {
            stats::histogram(
                black_box(&volume),
                0.0,
                256.0,
                stats::DEFAULT_HISTOGRAM_BINS,
            )
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK REGISTRATION
// ============================================================================

criterion_group!(
    benches,
    // Primary baseline (these run by default with `cargo bench`)
    bench_full_pipeline_cold,
    bench_full_pipeline_warm,
    // Diagnostic benchmarks (help identify bottlenecks)
    bench_reslice,
    bench_statistics,
);

criterion_main!(benches);
