#![allow(dead_code)]

use boxfit::Size;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Tolerance for pixel positions recovered through forward + inverse maps.
pub const EPS_PIXEL: f64 = 1e-6;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_size(max: u32) -> impl Strategy<Value = Size> {
    (1..=max, 1..=max).prop_map(|(w, h)| Size::new(w, h))
}

pub fn arb_unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

pub fn arb_keypoints(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((arb_unit(), arb_unit()), 0..=max)
}

/// Builds a label line from raw parts, keypoints appended in order.
pub fn label_line(class: &str, bbox: (f64, f64, f64, f64), keypoints: &[(f64, f64)]) -> String {
    let mut line = format!("{class} {} {} {} {}", bbox.0, bbox.1, bbox.2, bbox.3);
    for (kx, ky) in keypoints {
        line.push_str(&format!(" {kx} {ky}"));
    }
    line
}
