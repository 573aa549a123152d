//! Criterion microbenches for the letterbox pipeline.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Remapping label files (box-only and keypoint-heavy lines)
//! - Letterboxing a VGA frame into a 640x640 canvas

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use boxfit::annotation::remap_line;
use boxfit::letterbox::{letterbox, DEFAULT_PADDING_COLOR};
use boxfit::{Size, TransformParams};
use image::{Rgb, RgbImage};

const BOX_LINE: &str = "0 0.512345 0.487654 0.201234 0.198765";
const POSE_LINE: &str = "0 0.5 0.5 0.2 0.4 0.51 0.31 0.52 0.30 0.50 0.30 0.53 0.31 0.49 0.31 \
0.55 0.38 0.45 0.38 0.57 0.46 0.43 0.46 0.58 0.53 0.42 0.53 0.54 0.55 0.46 0.55 0.54 0.66 \
0.46 0.66 0.54 0.76 0.46 0.76";

fn vga_params() -> TransformParams {
    TransformParams::compute(Size::new(640, 480), Size::new(640, 640)).unwrap()
}

/// Benchmark remapping a label file worth of lines.
fn bench_remap_lines(c: &mut Criterion) {
    let params = vga_params();
    let mut group = c.benchmark_group("remap_line");

    for (name, line) in [("box", BOX_LINE), ("pose_17kp", POSE_LINE)] {
        let file: Vec<&str> = std::iter::repeat(line).take(100).collect();
        group.throughput(Throughput::Elements(file.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let out: Vec<String> = file
                    .iter()
                    .filter_map(|l| remap_line(black_box(l), &params).ok())
                    .collect();
                black_box(out)
            })
        });
    }

    group.finish();
}

/// Benchmark letterboxing the pixels of one frame.
fn bench_letterbox_image(c: &mut Criterion) {
    let frame = RgbImage::from_fn(640, 480, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut group = c.benchmark_group("letterbox");
    group.throughput(Throughput::Elements(1));

    group.bench_function("vga_to_640", |b| {
        b.iter(|| {
            let out = letterbox(black_box(&frame), Size::new(640, 640), DEFAULT_PADDING_COLOR)
                .unwrap();
            black_box(out)
        })
    });

    group.bench_function("downscale_1280_to_640", |b| {
        let big = image::imageops::resize(&frame, 1280, 960, image::imageops::FilterType::Nearest);
        b.iter(|| {
            let out =
                letterbox(black_box(&big), Size::new(640, 640), DEFAULT_PADDING_COLOR).unwrap();
            black_box(out)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_remap_lines, bench_letterbox_image);
criterion_main!(benches);
