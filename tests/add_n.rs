//! Integration tests for N-ary accumulation
//!
//! Every behavioral test runs against both strategies.

mod common;

use addn::prelude::*;
use addn::runtime::Allocator;
use common::{
    assert_allclose_f32, create_cpu_client, create_limited_cpu_client, refs, wavy_f32,
};

fn pairwise() -> KernelConfig {
    KernelConfig::default().with_scatter_memory(true)
}

fn fused() -> KernelConfig {
    KernelConfig::default()
}

fn both() -> [(&'static str, KernelConfig); 2] {
    [("pairwise", pairwise()), ("fused", fused())]
}

fn placeholder(device: &CpuDevice) -> Tensor<CpuRuntime> {
    Tensor::<CpuRuntime>::empty(&[0], DType::F32, device)
}

#[test]
fn test_three_inputs() {
    let (client, device) = create_cpu_client();
    let xs = [
        Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device),
        Tensor::<CpuRuntime>::from_slice(&[3.0f32, 4.0], &[2], &device),
        Tensor::<CpuRuntime>::from_slice(&[5.0f32, 6.0], &[2], &device),
    ];

    for (name, config) in both() {
        let mut out = placeholder(&device);
        client.add_n(&refs(&xs), &mut out, &config).unwrap();
        assert_eq!(out.to_vec::<f32>(), [9.0, 12.0], "{name}");
    }
}

#[test]
fn test_single_input_is_copied() {
    let (client, device) = create_cpu_client();
    let x = Tensor::<CpuRuntime>::from_slice(&[7.0f32, 8.0], &[2], &device);

    for (name, config) in both() {
        let mut out = placeholder(&device);
        client.add_n(&[&x], &mut out, &config).unwrap();

        assert_eq!(out.to_vec::<f32>(), [7.0, 8.0], "{name}");
        assert!(!out.shares_storage_with(&x), "{name}: output must own its buffer");
    }
}

#[test]
fn test_single_input_preserves_bits() {
    let (client, device) = create_cpu_client();
    // -0.0 and a NaN payload survive a copy but not an addition with 0.0
    let data = [-0.0f32, f32::from_bits(0x7fc0_1234), f32::MIN_POSITIVE];
    let x = Tensor::<CpuRuntime>::from_slice(&data, &[3], &device);

    for (name, config) in both() {
        let mut out = placeholder(&device);
        client.add_n(&[&x], &mut out, &config).unwrap();

        let bits: Vec<u32> = out.to_vec::<f32>().iter().map(|v| v.to_bits()).collect();
        let expected: Vec<u32> = data.iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits, expected, "{name}");
    }
}

#[test]
fn test_two_inputs() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32], &[1], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[2.0f32], &[1], &device);

    for (name, config) in both() {
        let mut out = placeholder(&device);
        client.add_n(&[&a, &b], &mut out, &config).unwrap();
        assert_eq!(out.to_vec::<f32>(), [3.0], "{name}");
    }
}

#[test]
fn test_shape_and_dtype_propagate() {
    let (client, device) = create_cpu_client();
    let xs: Vec<_> = (0..4)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&[k as i16; 24], &[2, 3, 4], &device))
        .collect();

    for (name, config) in both() {
        // Previous contents, shape and dtype of the output are discarded
        let mut out = Tensor::<CpuRuntime>::empty(&[5], DType::F64, &device);
        client.add_n(&refs(&xs), &mut out, &config).unwrap();

        assert_eq!(out.shape(), &[2, 3, 4], "{name}");
        assert_eq!(out.dtype(), DType::I16, "{name}");
        assert_eq!(out.to_vec::<i16>(), vec![6i16; 24], "{name}");
    }
}

#[test]
fn test_scalar_and_empty_shapes() {
    let (client, device) = create_cpu_client();
    let s = [
        Tensor::<CpuRuntime>::from_slice(&[1.5f64], &[], &device),
        Tensor::<CpuRuntime>::from_slice(&[2.5f64], &[], &device),
        Tensor::<CpuRuntime>::from_slice(&[3.0f64], &[], &device),
    ];
    let e: Vec<_> = (0..3)
        .map(|_| Tensor::<CpuRuntime>::empty(&[0, 3], DType::F64, &device))
        .collect();

    for (name, config) in both() {
        let mut out = placeholder(&device);
        client.add_n(&refs(&s), &mut out, &config).unwrap();
        assert_eq!(out.shape(), &[] as &[usize], "{name}");
        assert_eq!(out.to_vec::<f64>(), [7.0], "{name}");

        client.add_n(&refs(&e), &mut out, &config).unwrap();
        assert_eq!(out.shape(), &[0, 3], "{name}");
        assert!(out.to_vec::<f64>().is_empty(), "{name}");
    }
}

#[test]
fn test_integer_strategies_agree() {
    let (client, device) = create_cpu_client();
    let data: Vec<Vec<i32>> = (0..9)
        .map(|k| {
            (0..5000)
                .map(|i: i32| i.wrapping_mul(2_654_435_761u32 as i32).wrapping_add(k))
                .collect()
        })
        .collect();
    let xs: Vec<_> = data
        .iter()
        .map(|d| Tensor::<CpuRuntime>::from_slice(d, &[50, 100], &device))
        .collect();

    // Wrapping addition is associative, so any order gives the same answer
    let expected: Vec<i32> = (0..5000)
        .map(|i| data.iter().rev().fold(0i32, |acc, d| acc.wrapping_add(d[i])))
        .collect();

    let a = client.sum_n(&refs(&xs), &pairwise()).unwrap();
    let b = client.sum_n(&refs(&xs), &fused()).unwrap();
    assert_eq!(a.to_vec::<i32>(), expected);
    assert_eq!(b.to_vec::<i32>(), expected);
}

#[test]
fn test_unsigned_overflow_wraps() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[u64::MAX, 1], &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[2u64, 2], &[2], &device);

    for (name, config) in both() {
        let out = client.sum_n(&[&a, &b, &b], &config).unwrap();
        assert_eq!(out.to_vec::<u64>(), [3, 5], "{name}");
    }
}

#[test]
fn test_float_results_are_deterministic() {
    let (client, device) = create_cpu_client();
    // Long enough to be split into parallel chunks when rayon is enabled
    let xs: Vec<_> = (0..7)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&wavy_f32(10_000, k), &[10_000], &device))
        .collect();

    let bits = |t: &Tensor<CpuRuntime>| -> Vec<u32> {
        t.to_vec::<f32>().iter().map(|v| v.to_bits()).collect()
    };

    let first = client.sum_n(&refs(&xs), &pairwise()).unwrap();
    let again = client.sum_n(&refs(&xs), &pairwise()).unwrap();
    let fused_once = client.sum_n(&refs(&xs), &fused()).unwrap();
    let fused_again = client.sum_n(&refs(&xs), &fused()).unwrap();

    assert_eq!(bits(&first), bits(&again));
    assert_eq!(bits(&fused_once), bits(&fused_again));
    // Both strategies fold left to right, so they agree bit for bit here
    assert_eq!(bits(&first), bits(&fused_once));
}

#[test]
fn test_float_result_matches_reference() {
    let (client, device) = create_cpu_client();
    let data: Vec<Vec<f32>> = (0..5).map(|k| wavy_f32(257, k)).collect();
    let xs: Vec<_> = data
        .iter()
        .map(|d| Tensor::<CpuRuntime>::from_slice(d, &[257], &device))
        .collect();

    let reference: Vec<f32> = (0..257)
        .map(|i| data.iter().map(|d| d[i] as f64).sum::<f64>() as f32)
        .collect();

    for (name, config) in both() {
        let out = client.sum_n(&refs(&xs), &config).unwrap();
        assert_allclose_f32(&out.to_vec::<f32>(), &reference, 1e-5, 1e-3, name);
    }
}

#[test]
fn test_output_handle_cloned_from_input() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 1.0], &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[2.0f32, 2.0], &[2], &device);

    for (name, config) in both() {
        // The output handle is rebound, so the input behind the old handle is untouched
        let mut out = a.clone();
        client.add_n(&[&a, &b, &b], &mut out, &config).unwrap();

        assert_eq!(out.to_vec::<f32>(), [5.0, 5.0], "{name}");
        assert_eq!(a.to_vec::<f32>(), [1.0, 1.0], "{name}");
        assert!(!out.shares_storage_with(&a), "{name}");
    }
}

#[test]
fn test_pairwise_releases_intermediates() {
    let (client, device) = create_cpu_client();
    let xs: Vec<_> = (0..6)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&vec![k as f32; 1024], &[1024], &device))
        .collect();
    let buffer = 1024 * 4;
    let inputs_bytes = xs.len() * buffer;
    assert_eq!(device.memory().live_bytes(), inputs_bytes);

    let mut out = placeholder(&device);
    client.add_n(&refs(&xs), &mut out, &pairwise()).unwrap();

    // Only the final output survives the call
    assert_eq!(device.memory().live_bytes(), inputs_bytes + buffer);
    // At most one intermediate is alive next to the output at any time
    assert_eq!(device.memory().peak_bytes(), inputs_bytes + 2 * buffer);
    assert_eq!(out.to_vec::<f32>(), vec![15.0; 1024]);
}

#[test]
fn test_fused_allocates_only_the_output() {
    let (client, device) = create_cpu_client();
    let xs: Vec<_> = (0..6)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&vec![k as f32; 1024], &[1024], &device))
        .collect();
    let buffer = 1024 * 4;
    let inputs_bytes = xs.len() * buffer;

    let mut out = placeholder(&device);
    client.add_n(&refs(&xs), &mut out, &fused()).unwrap();

    assert_eq!(device.memory().live_bytes(), inputs_bytes + buffer);
    assert_eq!(device.memory().peak_bytes(), inputs_bytes + buffer);
    // The output came from the client's allocator
    assert_eq!(client.allocator().allocated_bytes(), inputs_bytes + buffer);
}

#[test]
fn test_out_of_memory_propagates() {
    let buffer = 256 * 8;
    // Room for the inputs and exactly one more buffer
    let (client, device) = create_limited_cpu_client(3 * buffer + buffer);
    let xs: Vec<_> = (0..3)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&[k as f64; 256], &[256], &device))
        .collect();

    // The pairwise path needs a second buffer on its last step
    let mut out = Tensor::<CpuRuntime>::empty(&[0], DType::F64, &device);
    let err = client.add_n(&refs(&xs), &mut out, &pairwise()).unwrap_err();
    assert!(matches!(err, Error::OutOfMemory { size } if size == buffer));

    // Whatever was allocated before the failure is returned to the device
    drop(out);
    assert_eq!(device.memory().live_bytes(), 3 * buffer);

    // The fused path fits
    let mut out = Tensor::<CpuRuntime>::empty(&[0], DType::F64, &device);
    client.add_n(&refs(&xs), &mut out, &fused()).unwrap();
    assert_eq!(out.to_vec::<f64>(), [3.0; 256]);
    drop(out);

    // With no room at all, both fail the same way
    let (client, device) = create_limited_cpu_client(3 * buffer);
    let xs: Vec<_> = (0..3)
        .map(|k| Tensor::<CpuRuntime>::from_slice(&[k as f64; 256], &[256], &device))
        .collect();
    for (name, config) in both() {
        let mut out = Tensor::<CpuRuntime>::empty(&[0], DType::F64, &device);
        let err = client.add_n(&refs(&xs), &mut out, &config).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }), "{name}: {err}");
    }
}

#[test]
fn test_empty_inputs_rejected() {
    let (client, device) = create_cpu_client();

    for (name, config) in both() {
        let mut out = placeholder(&device);
        let err = client.add_n(&[], &mut out, &config).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument { arg: "inputs", .. }),
            "{name}: {err}"
        );
    }
    assert!(matches!(
        client.sum_n(&[], &fused()),
        Err(Error::InvalidArgument { arg: "inputs", .. })
    ));
}

#[test]
fn test_mismatched_inputs_rejected() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2, 1], &device);
    let c = Tensor::<CpuRuntime>::from_slice(&[1i32, 2], &[2], &device);

    for (name, config) in both() {
        let mut out = placeholder(&device);
        let err = client.add_n(&[&a, &a, &b], &mut out, &config).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }), "{name}: {err}");

        let err = client.add_n(&[&a, &c], &mut out, &config).unwrap_err();
        assert!(matches!(err, Error::DTypeMismatch { .. }), "{name}: {err}");
    }
}

#[test]
fn test_bool_inputs() {
    let (client, device) = create_cpu_client();
    let x = Tensor::<CpuRuntime>::try_from_bytes(&[1, 0, 1], &[3], DType::Bool, &device).unwrap();

    for (name, config) in both() {
        // One input is a copy, which works for any dtype
        let mut out = placeholder(&device);
        client.add_n(&[&x], &mut out, &config).unwrap();
        assert_eq!(out.dtype(), DType::Bool, "{name}");
        assert_eq!(out.to_bytes().unwrap(), [1, 0, 1], "{name}");

        // Two inputs need an addition, which booleans do not have
        let err = client.add_n(&[&x, &x], &mut out, &config).unwrap_err();
        assert!(
            matches!(
                err,
                Error::UnsupportedDType {
                    dtype: DType::Bool,
                    ..
                }
            ),
            "{name}: {err}"
        );
    }
}

#[test]
fn test_many_dtypes() {
    let (client, device) = create_cpu_client();

    macro_rules! check {
        ($ty:ty, $dtype:expr) => {{
            let xs: Vec<_> = (1..=4)
                .map(|k| Tensor::<CpuRuntime>::from_slice(&[k as $ty, 2 as $ty], &[2], &device))
                .collect();
            for (name, config) in both() {
                let out = client.sum_n(&refs(&xs), &config).unwrap();
                assert_eq!(out.dtype(), $dtype, "{name}");
                assert_eq!(out.to_vec::<$ty>(), [10 as $ty, 8 as $ty], "{name}");
            }
        }};
    }

    check!(f64, DType::F64);
    check!(f32, DType::F32);
    check!(i64, DType::I64);
    check!(i32, DType::I32);
    check!(i16, DType::I16);
    check!(i8, DType::I8);
    check!(u64, DType::U64);
    check!(u32, DType::U32);
    check!(u16, DType::U16);
    check!(u8, DType::U8);
}

#[cfg(feature = "f16")]
#[test]
fn test_half_precision() {
    use half::{bf16, f16};

    let (client, device) = create_cpu_client();
    let halves = [f16::from_f32(1.5), f16::from_f32(-2.0)];
    let a = Tensor::<CpuRuntime>::from_slice(&halves, &[2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[bf16::from_f32(0.5)], &[1], &device);

    for (name, config) in both() {
        let out = client.sum_n(&[&a, &a, &a], &config).unwrap();
        assert_eq!(
            out.to_vec::<f16>(),
            [f16::from_f32(4.5), f16::from_f32(-6.0)],
            "{name}"
        );

        let out = client.sum_n(&[&b, &b], &config).unwrap();
        assert_eq!(out.to_vec::<bf16>(), [bf16::from_f32(1.0)], "{name}");
    }
}

#[cfg(not(feature = "f16"))]
#[test]
fn test_half_precision_requires_feature() {
    let (client, device) = create_cpu_client();
    let x = Tensor::<CpuRuntime>::try_from_bytes(&[0, 0x3c, 0, 0x3c], &[2], DType::F16, &device)
        .unwrap();

    for (name, config) in both() {
        let err = client.sum_n(&[&x, &x], &config).unwrap_err();
        assert!(
            matches!(err, Error::FeatureRequired { feature: "f16", .. }),
            "{name}: {err}"
        );
    }
}

#[test]
fn test_global_config_drives_add_n() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1u16, 2], &[2], &device);

    let out = client.sum_n(&[&a, &a, &a], KernelConfig::global()).unwrap();
    assert_eq!(out.to_vec::<u16>(), [3, 6]);
}
