//! Kernels for `u64` lanes.
//!
//! Unsigned lanes are compared after flipping their sign bit (AVX2 only compares
//! signed 64-bit integers).
use super::forward::{forward_binary, forward_from_bitmask, forward_reduce, Narrow};
use super::generic::{Fused, IntKernel, Kernel};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::generic::{narrow_m128i, sse_int_common};
    use super::super::mask_table::EXPAND_EPI64;
    use super::*;

    impl Kernel<u64> for SSE {
        type Reg = __m128i;

        sse_int_common!(u64, i64, _mm_set1_epi64x);

        #[inline(always)]
        unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
            _mm_add_epi64(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128i, b: __m128i) -> __m128i {
            _mm_sub_epi64(a, b)
        }

        forward_binary!(Kernel<u64>; mul, div, rem, min, max, cmp_eq, cmp_gt);

        #[inline(always)]
        unsafe fn to_bitmask(a: __m128i) -> u64 {
            _mm_movemask_pd(_mm_castsi128_pd(a)) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128i {
            _mm_loadu_si128(EXPAND_EPI64[(bits & 0b11) as usize].as_ptr() as *const __m128i)
        }

        forward_reduce!(u64);
    }

    impl IntKernel<u64> for SSE {
        forward_binary!(IntKernel<u64>; shl, shr);
    }

    impl Narrow<u64> for SSE {
        type Half = GENERIC;

        narrow_m128i!(u64, 1);
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::SSE;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(u64, SSE, 4, is_x86_feature_detected!("sse2"));
    }
}

// ------------------------------------------- AVX ------------------------------------------

mod avx {
    use super::super::config::{AVX, SSE};
    use super::super::generic::{avx_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<u64> for AVX {
        type Reg = __m256i;

        avx_int_memory!(u64, i64, _mm256_set1_epi64x);
        avx_int_bitwise!();

        forward_binary!(Kernel<u64>;
            add, sub, mul, div, rem, min, max, cmp_eq, cmp_gt, cmp_lt);

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_pd(_mm256_castsi256_pd(a)) as u64
        }

        forward_from_bitmask!(u64);
        forward_reduce!(u64);
    }

    impl IntKernel<u64> for AVX {
        forward_binary!(IntKernel<u64>; shl, shr);
    }

    impl Fused<u64> for AVX {}

    impl Narrow<u64> for AVX {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(u64, AVX, 8, is_x86_feature_detected!("avx"));
    }
}

// ------------------------------------------ AVX2 ------------------------------------------

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::super::generic::{avx2_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    #[inline(always)]
    unsafe fn flip_sign(a: __m256i) -> __m256i {
        _mm256_xor_si256(a, _mm256_set1_epi64x(i64::MIN))
    }

    impl Kernel<u64> for AVX2 {
        type Reg = __m256i;

        avx_int_memory!(u64, i64, _mm256_set1_epi64x);
        avx2_int_bitwise!();

        #[inline(always)]
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
            _mm256_add_epi64(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
            _mm256_sub_epi64(a, b)
        }

        forward_binary!(Kernel<u64>; mul, div, rem);

        #[inline(always)]
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpeq_epi64(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpgt_epi64(flip_sign(a), flip_sign(b))
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_pd(_mm256_castsi256_pd(a)) as u64
        }

        forward_from_bitmask!(u64);
        forward_reduce!(u64);
    }

    impl IntKernel<u64> for AVX2 {
        #[inline(always)]
        unsafe fn shl(a: __m256i, count: __m256i) -> __m256i {
            _mm256_sllv_epi64(a, count)
        }

        #[inline(always)]
        unsafe fn shr(a: __m256i, count: __m256i) -> __m256i {
            _mm256_srlv_epi64(a, count)
        }
    }

    impl Fused<u64> for AVX2 {}

    impl Narrow<u64> for AVX2 {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

}

// ----------------------------------------- AVX512 -----------------------------------------

#[cfg(feature = "avx512")]
mod avx512 {
    use super::super::config::{AVX2, AVX512};
    use super::super::generic::{avx512_int_cmp, avx512_int_common, narrow_m512i};
    use super::*;

    impl Kernel<u64> for AVX512 {
        type Reg = __m512i;

        avx512_int_common!(u64, i64, _mm512_set1_epi64);

        #[inline(always)]
        unsafe fn add(a: __m512i, b: __m512i) -> __m512i {
            _mm512_add_epi64(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512i, b: __m512i) -> __m512i {
            _mm512_sub_epi64(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m512i, b: __m512i) -> __m512i {
            _mm512_mullo_epi64(a, b)
        }

        forward_binary!(Kernel<u64>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epu64(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epu64(a, b)
        }

        avx512_int_cmp!(
            _mm512_movm_epi64,
            _mm512_cmpeq_epu64_mask,
            _mm512_cmpneq_epu64_mask,
            _mm512_cmplt_epu64_mask,
            _mm512_cmple_epu64_mask,
            _mm512_cmpgt_epu64_mask,
            _mm512_cmpge_epu64_mask
        );

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512i) -> u64 {
            _mm512_movepi64_mask(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512i {
            _mm512_movm_epi64(bits as __mmask8)
        }

        forward_reduce!(u64);
    }

    impl IntKernel<u64> for AVX512 {
        #[inline(always)]
        unsafe fn shl(a: __m512i, count: __m512i) -> __m512i {
            _mm512_sllv_epi64(a, count)
        }

        #[inline(always)]
        unsafe fn shr(a: __m512i, count: __m512i) -> __m512i {
            _mm512_srlv_epi64(a, count)
        }
    }

    impl Narrow<u64> for AVX512 {
        type Half = AVX2;

        narrow_m512i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX512;
        use crate::simd::test_utils::{avx512_detected, int_kernel_tests};

        int_kernel_tests!(u64, AVX512, 16, avx512_detected());
    }
}
