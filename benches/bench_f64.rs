use codspeed_criterion_compat::*;
use dev_utils::{config, utils};

use simdvec::ops::{Add, MulAdd, Sqrt};
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
use simdvec::simd::AVX512;
use simdvec::simd::{FloatKernel, Kernel, GENERIC};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use simdvec::simd::{AVX, AVX2, FMA, SSE};
use simdvec::SimdVec;

const LANES: usize = 8;

fn random_vectors() -> Vec<SimdVec<f64, LANES>> {
    let data: Vec<f64> = utils::SampleUniformFullRange::get_random_array(config::NB_VECTORS * LANES);
    // keep the sums finite
    data.chunks_exact(LANES)
        .map(|chunk| SimdVec::from_slice(chunk).abs().sqrt().sqrt())
        .collect()
}

/// # Safety
/// `A` must be available on the executing CPU.
unsafe fn sum_on<A: Kernel<f64>>(data: &[SimdVec<f64, LANES>]) -> SimdVec<f64, LANES> {
    data.iter()
        .fold(SimdVec::setzero(), |acc, &v| acc.binary_on_unchecked::<A, Add>(v))
}

/// Scaled accumulation `acc += v * 0.5`
///
/// # Safety
/// `A` must be available on the executing CPU.
unsafe fn mul_add_on<A: Kernel<f64>>(data: &[SimdVec<f64, LANES>]) -> SimdVec<f64, LANES> {
    let scale = SimdVec::splat(0.5);
    data.iter()
        .fold(SimdVec::setzero(), |acc, &v| v.ternary_on_unchecked::<A, MulAdd>(scale, acc))
}

/// # Safety
/// `A` must be available on the executing CPU.
unsafe fn sqrt_on<A: FloatKernel<f64>>(data: &[SimdVec<f64, LANES>]) -> f64 {
    data.iter()
        .map(|&v| v.float_unary_on_unchecked::<A, Sqrt>()[0])
        .sum()
}

fn simdvec_f64_arithmetic(c: &mut Criterion) {
    let data = &random_vectors();
    c.bench_function("generic_f64_add", |b| {
        b.iter(|| unsafe { sum_on::<GENERIC>(black_box(data)) })
    });
    c.bench_function("generic_f64_sqrt", |b| {
        b.iter(|| unsafe { sqrt_on::<GENERIC>(black_box(data)) })
    });
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("sse2") {
        c.bench_function("sse_f64_add", |b| {
            b.iter(|| unsafe { sum_on::<SSE>(black_box(data)) })
        });
        c.bench_function("sse_f64_sqrt", |b| {
            b.iter(|| unsafe { sqrt_on::<SSE>(black_box(data)) })
        });
    }
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("avx") {
        c.bench_function("avx_f64_add", |b| {
            b.iter(|| unsafe { sum_on::<AVX>(black_box(data)) })
        });
        c.bench_function("avx_f64_sqrt", |b| {
            b.iter(|| unsafe { sqrt_on::<AVX>(black_box(data)) })
        });
    }
    #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
    if is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx512bw")
        && is_x86_feature_detected!("avx512dq")
    {
        c.bench_function("avx512_f64_add", |b| {
            b.iter(|| unsafe { sum_on::<AVX512>(black_box(data)) })
        });
        c.bench_function("avx512_f64_sqrt", |b| {
            b.iter(|| unsafe { sqrt_on::<AVX512>(black_box(data)) })
        });
    }
    c.bench_function("impl_f64_reduce_sum", |b| {
        b.iter(|| black_box(data).iter().map(|v| v.reduce_sum()).sum::<f64>())
    });
}

fn simdvec_f64_mul_add(c: &mut Criterion) {
    let data = &random_vectors();
    c.bench_function("generic_f64_mul_add", |b| {
        b.iter(|| unsafe { mul_add_on::<GENERIC>(black_box(data)) })
    });
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("avx2") {
        c.bench_function("avx2_f64_mul_add", |b| {
            b.iter(|| unsafe { mul_add_on::<AVX2>(black_box(data)) })
        });
    }
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        c.bench_function("avx2_fma_f64_mul_add", |b| {
            b.iter(|| unsafe { mul_add_on::<FMA<AVX2>>(black_box(data)) })
        });
    }
    #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
    if is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx512bw")
        && is_x86_feature_detected!("avx512dq")
    {
        c.bench_function("avx512_f64_mul_add", |b| {
            b.iter(|| unsafe { mul_add_on::<AVX512>(black_box(data)) })
        });
    }
    c.bench_function("impl_f64_mul_add", |b| {
        b.iter(|| {
            black_box(data)
                .iter()
                .fold(SimdVec::<f64, LANES>::setzero(), |acc, &v| {
                    v.mul_add(SimdVec::splat(0.5), acc)
                })
        })
    });
}

criterion_group!(benches, simdvec_f64_arithmetic, simdvec_f64_mul_add,);
criterion_main!(benches);
