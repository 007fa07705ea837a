//! Kernels for `f32` lanes.
//!
//! Float kernels are native on every tag except for the remainder. The comparisons
//! use the ordered predicates (false on a NaN lane) except `cmp_ne`, which is
//! unordered (true on a NaN lane), like the scalar operators.
use super::forward::{forward_binary, forward_from_bitmask, forward_reduce, Narrow};
use super::generic::{FloatKernel, Fused, Kernel};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::mask_table::EXPAND_EPI32;
    use super::*;

    impl Kernel<f32> for SSE {
        type Reg = __m128;

        #[inline(always)]
        unsafe fn load_aligned(ptr: *const f32) -> __m128 {
            _mm_load_ps(ptr)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const f32) -> __m128 {
            _mm_loadu_ps(ptr)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut f32, a: __m128) {
            _mm_store_ps(ptr, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut f32, a: __m128) {
            _mm_storeu_ps(ptr, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: f32) -> __m128 {
            _mm_set1_ps(value)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m128 {
            _mm_setzero_ps()
        }

        #[inline(always)]
        unsafe fn add(a: __m128, b: __m128) -> __m128 {
            _mm_add_ps(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128, b: __m128) -> __m128 {
            _mm_sub_ps(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m128, b: __m128) -> __m128 {
            _mm_mul_ps(a, b)
        }

        #[inline(always)]
        unsafe fn div(a: __m128, b: __m128) -> __m128 {
            _mm_div_ps(a, b)
        }

        forward_binary!(Kernel<f32>; rem);

        #[inline(always)]
        unsafe fn min(a: __m128, b: __m128) -> __m128 {
            _mm_min_ps(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m128, b: __m128) -> __m128 {
            _mm_max_ps(a, b)
        }

        #[inline(always)]
        unsafe fn and(a: __m128, b: __m128) -> __m128 {
            _mm_and_ps(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m128, b: __m128) -> __m128 {
            _mm_or_ps(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m128, b: __m128) -> __m128 {
            _mm_xor_ps(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m128, b: __m128) -> __m128 {
            _mm_andnot_ps(a, b)
        }

        #[inline(always)]
        unsafe fn not(a: __m128) -> __m128 {
            _mm_xor_ps(a, _mm_castsi128_ps(_mm_set1_epi32(-1)))
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128, b: __m128) -> __m128 {
            _mm_cmpeq_ps(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_ne(a: __m128, b: __m128) -> __m128 {
            _mm_cmpneq_ps(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m128, b: __m128) -> __m128 {
            _mm_cmplt_ps(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_le(a: __m128, b: __m128) -> __m128 {
            _mm_cmple_ps(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128, b: __m128) -> __m128 {
            _mm_cmpgt_ps(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_ge(a: __m128, b: __m128) -> __m128 {
            _mm_cmpge_ps(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m128) -> u64 {
            _mm_movemask_ps(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128 {
            let lanes = EXPAND_EPI32[(bits & 0xf) as usize];
            _mm_castsi128_ps(_mm_loadu_si128(lanes.as_ptr() as *const __m128i))
        }

        forward_reduce!(f32);
    }

    impl FloatKernel<f32> for SSE {
        #[inline(always)]
        unsafe fn sqrt(a: __m128) -> __m128 {
            _mm_sqrt_ps(a)
        }
    }

    impl Narrow<f32> for SSE {
        type Half = GENERIC;

        #[inline(always)]
        unsafe fn split(a: __m128) -> ([f32; 2], [f32; 2]) {
            let [lo, hi] = std::mem::transmute::<__m128, [[f32; 2]; 2]>(a);
            (lo, hi)
        }

        #[inline(always)]
        unsafe fn join(lo: [f32; 2], hi: [f32; 2]) -> __m128 {
            std::mem::transmute::<[[f32; 2]; 2], __m128>([lo, hi])
        }
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::SSE;
        use crate::simd::test_utils::float_kernel_tests;

        float_kernel_tests!(f32, SSE, 8, is_x86_feature_detected!("sse2"));

        #[test]
        fn test_nan_lanes_compare_unequal() {
            if !is_x86_feature_detected!("sse2") {
                return;
            }
            let a = crate::SimdVec::<f32, 8>::from_fn(|i| if i % 2 == 0 { f32::NAN } else { 1.0 });
            let eq = unsafe { a.binary_on_unchecked::<SSE, crate::ops::CmpEq>(a) };
            let ne = unsafe { a.binary_on_unchecked::<SSE, crate::ops::CmpNe>(a) };
            for i in 0..8 {
                assert_eq!(eq[i].to_bits() == 0, i % 2 == 0);
                assert_eq!(ne[i].to_bits() != 0, i % 2 == 0);
            }
        }
    }
}

// --------------------------------------- AVX / AVX2 ---------------------------------------

/// AVX2 adds nothing for float lanes: both tags share the same kernels.
macro_rules! impl_avx_f32 {
    ($tag:ident) => {
        impl Kernel<f32> for $tag {
            type Reg = __m256;

            #[inline(always)]
            unsafe fn load_aligned(ptr: *const f32) -> __m256 {
                _mm256_load_ps(ptr)
            }

            #[inline(always)]
            unsafe fn load_unaligned(ptr: *const f32) -> __m256 {
                _mm256_loadu_ps(ptr)
            }

            #[inline(always)]
            unsafe fn store_aligned(ptr: *mut f32, a: __m256) {
                _mm256_store_ps(ptr, a)
            }

            #[inline(always)]
            unsafe fn store_unaligned(ptr: *mut f32, a: __m256) {
                _mm256_storeu_ps(ptr, a)
            }

            #[inline(always)]
            unsafe fn broadcast(value: f32) -> __m256 {
                _mm256_set1_ps(value)
            }

            #[inline(always)]
            unsafe fn setzero() -> __m256 {
                _mm256_setzero_ps()
            }

            #[inline(always)]
            unsafe fn add(a: __m256, b: __m256) -> __m256 {
                _mm256_add_ps(a, b)
            }

            #[inline(always)]
            unsafe fn sub(a: __m256, b: __m256) -> __m256 {
                _mm256_sub_ps(a, b)
            }

            #[inline(always)]
            unsafe fn mul(a: __m256, b: __m256) -> __m256 {
                _mm256_mul_ps(a, b)
            }

            #[inline(always)]
            unsafe fn div(a: __m256, b: __m256) -> __m256 {
                _mm256_div_ps(a, b)
            }

            forward_binary!(Kernel<f32>; rem);

            #[inline(always)]
            unsafe fn min(a: __m256, b: __m256) -> __m256 {
                _mm256_min_ps(a, b)
            }

            #[inline(always)]
            unsafe fn max(a: __m256, b: __m256) -> __m256 {
                _mm256_max_ps(a, b)
            }

            #[inline(always)]
            unsafe fn and(a: __m256, b: __m256) -> __m256 {
                _mm256_and_ps(a, b)
            }

            #[inline(always)]
            unsafe fn or(a: __m256, b: __m256) -> __m256 {
                _mm256_or_ps(a, b)
            }

            #[inline(always)]
            unsafe fn xor(a: __m256, b: __m256) -> __m256 {
                _mm256_xor_ps(a, b)
            }

            #[inline(always)]
            unsafe fn andnot(a: __m256, b: __m256) -> __m256 {
                _mm256_andnot_ps(a, b)
            }

            #[inline(always)]
            unsafe fn not(a: __m256) -> __m256 {
                _mm256_xor_ps(a, _mm256_castsi256_ps(_mm256_set1_epi32(-1)))
            }

            #[inline(always)]
            unsafe fn cmp_eq(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_EQ_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_ne(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_NEQ_UQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_lt(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_LT_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_le(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_LE_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_gt(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_GT_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn cmp_ge(a: __m256, b: __m256) -> __m256 {
                _mm256_cmp_ps::<_CMP_GE_OQ>(a, b)
            }

            #[inline(always)]
            unsafe fn to_bitmask(a: __m256) -> u64 {
                _mm256_movemask_ps(a) as u64
            }

            forward_from_bitmask!(f32);
            forward_reduce!(f32);
        }

        impl FloatKernel<f32> for $tag {
            #[inline(always)]
            unsafe fn sqrt(a: __m256) -> __m256 {
                _mm256_sqrt_ps(a)
            }
        }

        impl Fused<f32> for $tag {
            #[inline(always)]
            unsafe fn fmadd(a: __m256, b: __m256, c: __m256) -> __m256 {
                _mm256_fmadd_ps(a, b, c)
            }
        }

        impl Narrow<f32> for $tag {
            type Half = SSE;

            #[inline(always)]
            unsafe fn split(a: __m256) -> (__m128, __m128) {
                (_mm256_castps256_ps128(a), _mm256_extractf128_ps::<1>(a))
            }

            #[inline(always)]
            unsafe fn join(lo: __m128, hi: __m128) -> __m256 {
                _mm256_set_m128(hi, lo)
            }
        }
    };
}

mod avx {
    use super::super::config::{AVX, SSE};
    use super::*;

    impl_avx_f32!(AVX);

    // ------------------------------------ TESTS --------------------------------------

}

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::*;

    impl_avx_f32!(AVX2);

    // ------------------------------------ TESTS --------------------------------------

}

// ----------------------------------------- AVX512 -----------------------------------------

#[cfg(feature = "avx512")]
mod avx512 {
    use super::super::config::{AVX2, AVX512};
    use super::*;

    /// Mask register to all-ones / all-zeros lanes
    #[inline(always)]
    unsafe fn widen(mask: __mmask16) -> __m512 {
        _mm512_castsi512_ps(_mm512_movm_epi32(mask))
    }

    impl Kernel<f32> for AVX512 {
        type Reg = __m512;

        #[inline(always)]
        unsafe fn load_aligned(ptr: *const f32) -> __m512 {
            _mm512_load_ps(ptr)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const f32) -> __m512 {
            _mm512_loadu_ps(ptr)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut f32, a: __m512) {
            _mm512_store_ps(ptr, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut f32, a: __m512) {
            _mm512_storeu_ps(ptr, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: f32) -> __m512 {
            _mm512_set1_ps(value)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m512 {
            _mm512_setzero_ps()
        }

        #[inline(always)]
        unsafe fn add(a: __m512, b: __m512) -> __m512 {
            _mm512_add_ps(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512, b: __m512) -> __m512 {
            _mm512_sub_ps(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m512, b: __m512) -> __m512 {
            _mm512_mul_ps(a, b)
        }

        #[inline(always)]
        unsafe fn div(a: __m512, b: __m512) -> __m512 {
            _mm512_div_ps(a, b)
        }

        forward_binary!(Kernel<f32>; rem);

        /// AVX512 always has FMA
        #[inline(always)]
        unsafe fn mul_add(a: __m512, b: __m512, c: __m512) -> __m512 {
            _mm512_fmadd_ps(a, b, c)
        }

        #[inline(always)]
        unsafe fn min(a: __m512, b: __m512) -> __m512 {
            _mm512_min_ps(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512, b: __m512) -> __m512 {
            _mm512_max_ps(a, b)
        }

        #[inline(always)]
        unsafe fn and(a: __m512, b: __m512) -> __m512 {
            _mm512_and_ps(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m512, b: __m512) -> __m512 {
            _mm512_or_ps(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m512, b: __m512) -> __m512 {
            _mm512_xor_ps(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m512, b: __m512) -> __m512 {
            _mm512_andnot_ps(a, b)
        }

        #[inline(always)]
        unsafe fn not(a: __m512) -> __m512 {
            _mm512_xor_ps(a, _mm512_castsi512_ps(_mm512_set1_epi32(-1)))
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_EQ_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ne(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_NEQ_UQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_LT_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_le(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_LE_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_GT_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ge(a: __m512, b: __m512) -> __m512 {
            widen(_mm512_cmp_ps_mask::<_CMP_GE_OQ>(a, b))
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512) -> u64 {
            _mm512_movepi32_mask(_mm512_castps_si512(a)) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512 {
            widen(bits as __mmask16)
        }

        forward_reduce!(f32);
    }

    impl FloatKernel<f32> for AVX512 {
        #[inline(always)]
        unsafe fn sqrt(a: __m512) -> __m512 {
            _mm512_sqrt_ps(a)
        }
    }

    impl Narrow<f32> for AVX512 {
        type Half = AVX2;

        #[inline(always)]
        unsafe fn split(a: __m512) -> (__m256, __m256) {
            (_mm512_castps512_ps256(a), _mm512_extractf32x8_ps::<1>(a))
        }

        #[inline(always)]
        unsafe fn join(lo: __m256, hi: __m256) -> __m512 {
            _mm512_insertf32x8::<1>(_mm512_castps256_ps512(lo), hi)
        }
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX512;
        use crate::simd::test_utils::{avx512_detected, float_kernel_tests};

        float_kernel_tests!(f32, AVX512, 32, avx512_detected());
    }
}
