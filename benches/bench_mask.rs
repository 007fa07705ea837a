use codspeed_criterion_compat::*;
use dev_utils::{config, utils};

#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
use simdvec::simd::AVX512;
use simdvec::simd::{Kernel, GENERIC};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use simdvec::simd::{AVX, AVX2, SSE};
use simdvec::{Scalar, SimdVecBool};

fn random_masks(lanes: usize) -> Vec<u64> {
    (0..config::NB_VECTORS)
        .map(|_| utils::get_random_mask(lanes))
        .collect()
}

/// Expand every bitmask to lanes and compress it back on the registers of `A`
///
/// # Safety
/// `A` must be available on the executing CPU.
unsafe fn roundtrip_on<A: Kernel<T>, T: Scalar, const W: usize>(masks: &[u64]) -> u64 {
    masks.iter().fold(0, |acc, &bits| {
        acc ^ SimdVecBool::<T, W>::from_mask_on_unchecked::<A>(bits).to_mask_on_unchecked::<A>()
    })
}

macro_rules! bench_mask_roundtrip {
    ($c:expr, $scalar:ty, $w:literal) => {{
        let masks = &random_masks($w);
        let name = |tag: &str| format!("{}_{}x{}_mask_roundtrip", tag, stringify!($scalar), $w);
        $c.bench_function(&name("generic"), |b| {
            b.iter(|| unsafe { roundtrip_on::<GENERIC, $scalar, $w>(black_box(masks)) })
        });
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if is_x86_feature_detected!("sse2") {
            $c.bench_function(&name("sse"), |b| {
                b.iter(|| unsafe { roundtrip_on::<SSE, $scalar, $w>(black_box(masks)) })
            });
        }
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if is_x86_feature_detected!("avx") {
            $c.bench_function(&name("avx"), |b| {
                b.iter(|| unsafe { roundtrip_on::<AVX, $scalar, $w>(black_box(masks)) })
            });
        }
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if is_x86_feature_detected!("avx2") {
            $c.bench_function(&name("avx2"), |b| {
                b.iter(|| unsafe { roundtrip_on::<AVX2, $scalar, $w>(black_box(masks)) })
            });
        }
        #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
        if is_x86_feature_detected!("avx512f")
            && is_x86_feature_detected!("avx512bw")
            && is_x86_feature_detected!("avx512dq")
        {
            $c.bench_function(&name("avx512"), |b| {
                b.iter(|| unsafe { roundtrip_on::<AVX512, $scalar, $w>(black_box(masks)) })
            });
        }
    }};
}

fn simdvec_mask_roundtrip(c: &mut Criterion) {
    // lookup-table paths on SSE/AVX, movemask on AVX2, mask registers on AVX512
    bench_mask_roundtrip!(c, u8, 64);
    bench_mask_roundtrip!(c, i16, 32);
    bench_mask_roundtrip!(c, f32, 16);
    bench_mask_roundtrip!(c, f64, 8);
}

criterion_group!(benches, simdvec_mask_roundtrip,);
criterion_main!(benches);
