use codspeed_criterion_compat::*;
use dev_utils::{config, utils};

use simdvec::ops::{Add, BinaryOp, Min, Mul};
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
use simdvec::simd::AVX512;
use simdvec::simd::{Kernel, GENERIC};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use simdvec::simd::{AVX2, SSE};
use simdvec::SimdVec;

const LANES: usize = 64;

fn random_vectors() -> Vec<SimdVec<u8, LANES>> {
    let data: Vec<u8> = utils::SampleUniformFullRange::get_random_array(config::NB_VECTORS * LANES);
    data.chunks_exact(LANES).map(SimdVec::from_slice).collect()
}

/// # Safety
/// `A` must be available on the executing CPU.
unsafe fn fold_on<A: Kernel<u8>, Op: BinaryOp<u8>>(data: &[SimdVec<u8, LANES>]) -> SimdVec<u8, LANES> {
    data[1..]
        .iter()
        .fold(data[0], |acc, &v| acc.binary_on_unchecked::<A, Op>(v))
}

fn simdvec_u8_binary_ops(c: &mut Criterion) {
    let data = &random_vectors();
    c.bench_function("generic_u8_add", |b| {
        b.iter(|| unsafe { fold_on::<GENERIC, Add>(black_box(data)) })
    });
    c.bench_function("generic_u8_mul", |b| {
        b.iter(|| unsafe { fold_on::<GENERIC, Mul>(black_box(data)) })
    });
    c.bench_function("generic_u8_min", |b| {
        b.iter(|| unsafe { fold_on::<GENERIC, Min>(black_box(data)) })
    });
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("sse2") {
        c.bench_function("sse_u8_add", |b| {
            b.iter(|| unsafe { fold_on::<SSE, Add>(black_box(data)) })
        });
        // no 8-bit multiply: runs on the halves
        c.bench_function("sse_u8_mul", |b| {
            b.iter(|| unsafe { fold_on::<SSE, Mul>(black_box(data)) })
        });
        c.bench_function("sse_u8_min", |b| {
            b.iter(|| unsafe { fold_on::<SSE, Min>(black_box(data)) })
        });
    }
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("avx2") {
        c.bench_function("avx2_u8_add", |b| {
            b.iter(|| unsafe { fold_on::<AVX2, Add>(black_box(data)) })
        });
        c.bench_function("avx2_u8_mul", |b| {
            b.iter(|| unsafe { fold_on::<AVX2, Mul>(black_box(data)) })
        });
        c.bench_function("avx2_u8_min", |b| {
            b.iter(|| unsafe { fold_on::<AVX2, Min>(black_box(data)) })
        });
    }
    #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
    if is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx512bw")
        && is_x86_feature_detected!("avx512dq")
    {
        c.bench_function("avx512_u8_add", |b| {
            b.iter(|| unsafe { fold_on::<AVX512, Add>(black_box(data)) })
        });
        c.bench_function("avx512_u8_min", |b| {
            b.iter(|| unsafe { fold_on::<AVX512, Min>(black_box(data)) })
        });
    }
    c.bench_function("impl_u8_reduce_min", |b| {
        b.iter(|| black_box(data).iter().map(|v| v.reduce_min()).min())
    });
}

criterion_group!(benches, simdvec_u8_binary_ops,);
criterion_main!(benches);
