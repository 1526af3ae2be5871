//! CPU kernels for element-wise accumulation
//!
//! All kernels operate on contiguous buffers. Large buffers are split into
//! fixed-size chunks and processed with Rayon when the "rayon" feature is on.
//! Chunking never changes the per-element order of additions, so results are
//! identical with and without parallelism.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

use crate::dtype::Element;
use std::slice;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small tensors (overhead > benefit)
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
const PARALLEL_THRESHOLD: usize = 4096;

/// Elements per Rayon task
#[cfg(feature = "rayon")]
const CHUNK_SIZE: usize = 4096;

/// Element-wise `out[i] = a[i] + b[i]`
///
/// # Safety
/// - `a`, `b` and `out` must be valid for `len` elements
/// - `out` must not overlap `a` or `b`
#[inline]
pub unsafe fn add_kernel<T: Element>(a: *const T, b: *const T, out: *mut T, len: usize) {
    if len == 0 {
        return;
    }
    let a = slice::from_raw_parts(a, len);
    let b = slice::from_raw_parts(b, len);
    let out = slice::from_raw_parts_mut(out, len);

    #[cfg(feature = "rayon")]
    if len >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .zip(a.par_chunks(CHUNK_SIZE).zip(b.par_chunks(CHUNK_SIZE)))
            .for_each(|(o, (a, b))| add_chunk(a, b, o));
        return;
    }

    add_chunk(a, b, out);
}

#[inline]
fn add_chunk<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x.add_elem(y);
    }
}

/// Fused N-ary sum: `out[i] = ((src[0][i] + src[1][i]) + ...) + src[n-1][i]`
///
/// Sources are folded left to right for every element, which is the same
/// association order as a chain of binary adds.
///
/// # Safety
/// - `srcs` must be non-empty and every pointer valid for `len` elements
/// - `out` must be valid for `len` elements and overlap none of the sources
pub unsafe fn sum_n_kernel<T: Element>(srcs: &[*const T], out: *mut T, len: usize) {
    if len == 0 || srcs.is_empty() {
        return;
    }
    let srcs: Vec<&[T]> = srcs.iter().map(|&p| slice::from_raw_parts(p, len)).collect();
    let out = slice::from_raw_parts_mut(out, len);

    #[cfg(feature = "rayon")]
    if len >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(i, o)| {
                let start = i * CHUNK_SIZE;
                accumulate_chunk(&srcs, start, o);
            });
        return;
    }

    accumulate_chunk(&srcs, 0, out);
}

fn accumulate_chunk<T: Element>(srcs: &[&[T]], start: usize, out: &mut [T]) {
    let end = start + out.len();
    let (first, rest) = match srcs.split_first() {
        Some(split) => split,
        None => return,
    };

    out.copy_from_slice(&first[start..end]);
    for src in rest {
        for (o, &x) in out.iter_mut().zip(&src[start..end]) {
            *o = o.add_elem(x);
        }
    }
}
