//! Kernels for `f64` lanes.
use super::forward::{forward_binary, forward_from_bitmask, forward_reduce, Narrow};
use super::generic::{FloatKernel, Fused, Kernel};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::mask_table::EXPAND_EPI64;
    use super::*;

    impl Kernel<f64> for SSE {
        type Reg = __m128d;

        #[inline(always)]
        unsafe fn load_aligned(ptr: *const f64) -> __m128d {
            _mm_load_pd(ptr)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const f64) -> __m128d {
            _mm_loadu_pd(ptr)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut f64, a: __m128d) {
            _mm_store_pd(ptr, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut f64, a: __m128d) {
            _mm_storeu_pd(ptr, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: f64) -> __m128d {
            _mm_set1_pd(value)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m128d {
            _mm_setzero_pd()
        }

        #[inline(always)]
        unsafe fn add(a: __m128d, b: __m128d) -> __m128d {
            _mm_add_pd(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128d, b: __m128d) -> __m128d {
            _mm_sub_pd(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m128d, b: __m128d) -> __m128d {
            _mm_mul_pd(a, b)
        }

        #[inline(always)]
        unsafe fn div(a: __m128d, b: __m128d) -> __m128d {
            _mm_div_pd(a, b)
        }

        forward_binary!(Kernel<f64>; rem);

        #[inline(always)]
        unsafe fn min(a: __m128d, b: __m128d) -> __m128d {
            _mm_min_pd(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m128d, b: __m128d) -> __m128d {
            _mm_max_pd(a, b)
        }

        #[inline(always)]
        unsafe fn and(a: __m128d, b: __m128d) -> __m128d {
            _mm_and_pd(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m128d, b: __m128d) -> __m128d {
            _mm_or_pd(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m128d, b: __m128d) -> __m128d {
            _mm_xor_pd(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m128d, b: __m128d) -> __m128d {
            _mm_andnot_pd(a, b)
        }

        #[inline(always)]
        unsafe fn not(a: __m128d) -> __m128d {
            _mm_xor_pd(a, _mm_castsi128_pd(_mm_set1_epi32(-1)))
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmpeq_pd(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_ne(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmpneq_pd(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmplt_pd(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_le(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmple_pd(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmpgt_pd(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_ge(a: __m128d, b: __m128d) -> __m128d {
            _mm_cmpge_pd(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m128d) -> u64 {
            _mm_movemask_pd(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128d {
            let lanes = EXPAND_EPI64[(bits & 0b11) as usize];
            _mm_castsi128_pd(_mm_loadu_si128(lanes.as_ptr() as *const __m128i))
        }

        forward_reduce!(f64);
    }

    impl FloatKernel<f64> for SSE {
        #[inline(always)]
        unsafe fn sqrt(a: __m128d) -> __m128d {
            _mm_sqrt_pd(a)
        }
    }

    impl Narrow<f64> for SSE {
        type Half = GENERIC;

        #[inline(always)]
        unsafe fn split(a: __m128d) -> ([f64; 1], [f64; 1]) {
            let [lo, hi] = std::mem::transmute::<__m128d, [[f64; 1]; 2]>(a);
            (lo, hi)
        }

        #[inline(always)]
        unsafe fn join(lo: [f64; 1], hi: [f64; 1]) -> __m128d {
            std::mem::transmute::<[[f64; 1]; 2], __m128d>([lo, hi])
        }
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::SSE;
        use crate::simd::test_utils::float_kernel_tests;

        float_kernel_tests!(f64, SSE, 4, is_x86_feature_detected!("sse2"));

        #[test]
        fn test_nan_lanes_compare_unequal() {
            if !is_x86_feature_detected!("sse2") {
                return;
            }
            let a = crate::SimdVec::<f64, 4>::from_fn(|i| if i % 2 == 0 { f64::NAN } else { 1.0 });
            let eq = unsafe { a.binary_on_unchecked::<SSE, crate::ops::CmpEq>(a) };
            let ne = unsafe { a.binary_on_unchecked::<SSE, crate::ops::CmpNe>(a) };
            for i in 0..4 {
                assert_eq!(eq[i].to_bits() == 0, i % 2 == 0);
                assert_eq!(ne[i].to_bits() != 0, i % 2 == 0);
            }
        }
    }
}

// --------------------------------------- AVX / AVX2 ---------------------------------------

/// AVX2 adds nothing for float lanes: both tags share the same kernels.
macro_rules! impl_avx_f64 {
    ($tag:ident) => {
        impl Kernel<f64> for $tag {
            type Reg = __m256d;

            #[inline(always)]
            unsafe fn load_aligned(ptr: *const f64) -> __m256d {
                _mm256_load_pd(ptr)
            }

            #[inline(always)]
            unsafe fn load_unaligned(ptr: *const f64) -> __m256d {
                _mm256_loadu_pd(ptr)
            }

            #[inline(always)]
            unsafe fn store_aligned(ptr: *mut f64, a: __m256d) {
                _mm256_store_pd(ptr, a)
            }

            #[inline(always)]
            unsafe fn store_unaligned(ptr: *mut f64, a: __m256d) {
                _mm256_storeu_pd(ptr, a)
            }

            #[inline(always)]
            unsafe fn broadcast(value: f64) -> __m256d {
                _mm256_set1_pd(value)
            }

            #[inline(always)]
            unsafe fn setzero() -> __m256d {
                _mm256_setzero_pd()
            }

            #[inline(always)]
            unsafe fn add(a: __m256d, b: __m256d) -> __m256d {
                _mm256_add_pd(a, b)
            }

            #[inline(always)]
            unsafe fn sub(a: __m256d, b: __m256d) -> __m256d {
                _mm256_sub_pd(a, b)
            }

            #[inline(always)]
            unsafe fn mul(a: __m256d, b: __m256d) -> __m256d {
                _mm256_mul_pd(a, b)
            }

            #[inline(always)]
            unsafe fn div(a: __m256d, b: __m256d) -> __m256d {
                _mm256_div_pd(a, b)
            }

            forward_binary!(Kernel<f64>; rem);

            #[inline(always)]
            unsafe fn min(a: __m256d, b: __m256d) -> __m256d {
                _mm256_min_pd(a, b)
            }

            #[inline(always)]
            unsafe fn max(a: __m256d, b: __m256d) -> __m256d {
                _mm256_max_pd(a, b)
            }

            #[inline(always)]
            unsafe fn and(a: __m256d, b: __m256d) -> __m256d {
                _mm256_and_pd(a, b)
            }

            #[inline(always)]
            unsafe fn or(a: __m256d, b: __m256d) -> __m256d {
                _mm256_or_pd(a, b)
            }

            #[inline(always)]
            unsafe fn xor(a: __m256d, b: __m256d) -> __m256d {
                _mm256_xor_pd(a, b)
            }

            #[inline(always)]
            unsafe fn andnot(a: __m256d, b: __m256d) -> __m256d {
                _mm256_andnot_pd(a, b)
            }

            #[inline(always)]
            unsafe fn not(a: __m256d) -> __m256d {
                _mm256_xor_pd(a, _mm256_castsi256_pd(_mm256_set1_epi32(-1)))
            }

            #[inline(always)]
            unsafe fn cmp_eq(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_EQ_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_ne(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_NEQ_UQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_lt(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_LT_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_le(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_LE_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_gt(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_GT_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_ge(a: __m256d, b: __m256d) -> __m256d {
                _mm256_cmp_pd::<_CMP_GE_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn to_bitmask(a: __m256d) -> u64 {
                _mm256_movemask_pd(a) as u64
            }

            forward_from_bitmask!(f64);
            forward_reduce!(f64);
        }

        impl FloatKernel<f64> for $tag {
            #[inline(always)]
            unsafe fn sqrt(a: __m256d) -> __m256d {
                _mm256_sqrt_pd(a)
            }
        }

        impl Fused<f64> for $tag {
            #[inline(always)]
            unsafe fn fmadd(a: __m256d, b: __m256d, c: __m256d) -> __m256d {
                _mm256_fmadd_pd(a, b, c)
            }
        }

        impl Narrow<f64> for $tag {
            type Half = SSE;

            #[inline(always)]
            unsafe fn split(a: __m256d) -> (__m128d, __m128d) {
                (_mm256_castpd256_pd128(a), _mm256_extractf128_pd::<1>(a))
            }

            #[inline(always)]
            unsafe fn join(lo: __m128d, hi: __m128d) -> __m256d {
                _mm256_set_m128d(hi, lo)
            }
        }
    };
}

mod avx {
    use super::super::config::{AVX, SSE};
    use super::*;

    impl_avx_f64!(AVX);

    // ------------------------------------ TESTS --------------------------------------

}

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::*;

    impl_avx_f64!(AVX2);

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX2;
        use crate::simd::test_utils::float_kernel_tests;

        float_kernel_tests!(f64, AVX2, 8, is_x86_feature_detected!("avx2"));

        mod fma {
            use crate::simd::test_utils::float_kernel_tests;
            use crate::simd::{AVX2, FMA};

            float_kernel_tests!(
                f64,
                FMA<AVX2>,
                8,
                is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
            );

            /// `a * b + c` with a product that is not representable: the fused result
            /// keeps the low bits that the unfused one rounds away
            #[test]
            fn test_mul_add_rounds_once() {
                if !(is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")) {
                    return;
                }
                let eps = f64::EPSILON;
                let a = crate::SimdVec::<f64, 8>::splat(1.0 + eps);
                let c = crate::SimdVec::<f64, 8>::splat(-(1.0 + 2.0 * eps));
                let fused = unsafe { a.ternary_on_unchecked::<FMA<AVX2>, crate::ops::MulAdd>(a, c) };
                let unfused = unsafe { a.ternary_on_unchecked::<AVX2, crate::ops::MulAdd>(a, c) };
                assert_eq!(fused[0], eps * eps);
                assert_eq!(unfused[0], 0.0);
            }
        }
    }
}

// ----------------------------------------- AVX512 -----------------------------------------

#[cfg(feature = "avx512")]
mod avx512 {
    use super::super::config::{AVX2, AVX512};
    use super::*;

    /// Mask register to all-ones / all-zeros lanes
    #[inline(always)]
    unsafe fn widen(mask: __mmask8) -> __m512d {
        _mm512_castsi512_pd(_mm512_movm_epi64(mask))
    }

    impl Kernel<f64> for AVX512 {
        type Reg = __m512d;

        #[inline(always)]
        unsafe fn load_aligned(ptr: *const f64) -> __m512d {
            _mm512_load_pd(ptr)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const f64) -> __m512d {
            _mm512_loadu_pd(ptr)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut f64, a: __m512d) {
            _mm512_store_pd(ptr, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut f64, a: __m512d) {
            _mm512_storeu_pd(ptr, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: f64) -> __m512d {
            _mm512_set1_pd(value)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m512d {
            _mm512_setzero_pd()
        }

        #[inline(always)]
        unsafe fn add(a: __m512d, b: __m512d) -> __m512d {
            _mm512_add_pd(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512d, b: __m512d) -> __m512d {
            _mm512_sub_pd(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m512d, b: __m512d) -> __m512d {
            _mm512_mul_pd(a, b)
        }

        #[inline(always)]
        unsafe fn div(a: __m512d, b: __m512d) -> __m512d {
            _mm512_div_pd(a, b)
        }

        forward_binary!(Kernel<f64>; rem);

        /// AVX512 always has FMA
        #[inline(always)]
        unsafe fn mul_add(a: __m512d, b: __m512d, c: __m512d) -> __m512d {
            _mm512_fmadd_pd(a, b, c)
        }

        #[inline(always)]
        unsafe fn min(a: __m512d, b: __m512d) -> __m512d {
            _mm512_min_pd(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512d, b: __m512d) -> __m512d {
            _mm512_max_pd(a, b)
        }

        #[inline(always)]
        unsafe fn and(a: __m512d, b: __m512d) -> __m512d {
            _mm512_and_pd(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m512d, b: __m512d) -> __m512d {
            _mm512_or_pd(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m512d, b: __m512d) -> __m512d {
            _mm512_xor_pd(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m512d, b: __m512d) -> __m512d {
            _mm512_andnot_pd(a, b)
        }

        #[inline(always)]
        unsafe fn not(a: __m512d) -> __m512d {
            _mm512_xor_pd(a, _mm512_castsi512_pd(_mm512_set1_epi32(-1)))
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_EQ_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ne(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_NEQ_UQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_LT_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_le(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_LE_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_GT_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ge(a: __m512d, b: __m512d) -> __m512d {
            widen(_mm512_cmp_pd_mask::<_CMP_GE_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512d) -> u64 {
            _mm512_movepi64_mask(_mm512_castpd_si512(a)) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512d {
            widen(bits as __mmask8)
        }

        forward_reduce!(f64);
    }

    impl FloatKernel<f64> for AVX512 {
        #[inline(always)]
        unsafe fn sqrt(a: __m512d) -> __m512d {
            _mm512_sqrt_pd(a)
        }
    }

    impl Narrow<f64> for AVX512 {
        type Half = AVX2;

        #[inline(always)]
        unsafe fn split(a: __m512d) -> (__m256d, __m256d) {
            (_mm512_castpd512_pd256(a), _mm512_extractf64x4_pd::<1>(a))
        }

        #[inline(always)]
        unsafe fn join(lo: __m256d, hi: __m256d) -> __m512d {
            _mm512_insertf64x4::<1>(_mm512_castpd256_pd512(lo), hi)
        }
    }

    // ------------------------------------ TESTS --------------------------------------

}
