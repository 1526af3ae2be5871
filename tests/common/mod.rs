//! Common test utilities
#![allow(dead_code)]

use addn::runtime::Runtime;
use addn::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use addn::tensor::Tensor;

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a CPU client whose device refuses to hold more than `limit` bytes
pub fn create_limited_cpu_client(limit: usize) -> (CpuClient, CpuDevice) {
    let device = CpuDevice::with_memory_limit(limit);
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Borrow every tensor of a slice, the shape `add_n` takes its inputs in
pub fn refs(tensors: &[Tensor<CpuRuntime>]) -> Vec<&Tensor<CpuRuntime>> {
    tensors.iter().collect()
}

/// Deterministic, non-trivial f32 data (no two inputs alike, mixed magnitudes)
pub fn wavy_f32(len: usize, seed: usize) -> Vec<f32> {
    (0..len)
        .map(|i| ((i * 31 + seed * 7) as f32 * 0.013).sin() * 10f32.powi((i % 5) as i32 - 2))
        .collect()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
