//! Kernels for `i16` lanes.
//!
//! No instruction set before AVX512 packs 16-bit lanes into a bitmask: the byte mask
//! is compressed with a lookup table instead (see `mask_table.rs`).
use super::forward::{forward_binary, forward_from_bitmask, forward_mask, forward_reduce, Narrow};
use super::generic::{Fused, IntKernel, Kernel};
use super::mask_table::COMPRESS_EPI16;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::generic::{narrow_m128i, sse_int_common};
    use super::super::mask_table::EXPAND_EPI16;
    use super::*;

    impl Kernel<i16> for SSE {
        type Reg = __m128i;

        sse_int_common!(i16, i16, _mm_set1_epi16);

        #[inline(always)]
        unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
            _mm_add_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128i, b: __m128i) -> __m128i {
            _mm_sub_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m128i, b: __m128i) -> __m128i {
            _mm_mullo_epi16(a, b)
        }

        forward_binary!(Kernel<i16>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m128i, b: __m128i) -> __m128i {
            _mm_min_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m128i, b: __m128i) -> __m128i {
            _mm_max_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpeq_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpgt_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmplt_epi16(a, b)
        }

        /// `_mm_movemask_epi8` sets two bits per lane; keep one of them
        #[inline(always)]
        unsafe fn to_bitmask(a: __m128i) -> u64 {
            let bytes = _mm_movemask_epi8(a) as usize;
            (COMPRESS_EPI16[bytes & 0xff] as u64) | ((COMPRESS_EPI16[bytes >> 8] as u64) << 4)
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128i {
            _mm_loadu_si128(EXPAND_EPI16[(bits & 0xff) as usize].as_ptr() as *const __m128i)
        }

        forward_reduce!(i16);
    }

    impl IntKernel<i16> for SSE {
        forward_binary!(IntKernel<i16>; shl, shr);
    }

    impl Narrow<i16> for SSE {
        type Half = GENERIC;

        narrow_m128i!(i16, 4);
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::SSE;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(i16, SSE, 16, is_x86_feature_detected!("sse2"));
    }
}

// ------------------------------------------- AVX ------------------------------------------

mod avx {
    use super::super::config::{AVX, SSE};
    use super::super::generic::{avx_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i16> for AVX {
        type Reg = __m256i;

        avx_int_memory!(i16, i16, _mm256_set1_epi16);
        avx_int_bitwise!();

        forward_binary!(Kernel<i16>;
            add, sub, mul, div, rem, min, max, cmp_eq, cmp_gt, cmp_lt);
        forward_mask!(i16);
        forward_reduce!(i16);
    }

    impl IntKernel<i16> for AVX {
        forward_binary!(IntKernel<i16>; shl, shr);
    }

    impl Fused<i16> for AVX {}

    impl Narrow<i16> for AVX {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(i16, AVX, 32, is_x86_feature_detected!("avx"));
    }
}

// ------------------------------------------ AVX2 ------------------------------------------

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::super::generic::{avx2_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i16> for AVX2 {
        type Reg = __m256i;

        avx_int_memory!(i16, i16, _mm256_set1_epi16);
        avx2_int_bitwise!();

        #[inline(always)]
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
            _mm256_add_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
            _mm256_sub_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
            _mm256_mullo_epi16(a, b)
        }

        forward_binary!(Kernel<i16>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpeq_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpgt_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            let bytes = _mm256_movemask_epi8(a) as u32;
            (0..4).fold(0, |bits, k| {
                let byte = ((bytes >> (8 * k)) & 0xff) as usize;
                bits | ((COMPRESS_EPI16[byte] as u64) << (4 * k))
            })
        }

        forward_from_bitmask!(i16);
        forward_reduce!(i16);
    }

    impl IntKernel<i16> for AVX2 {
        forward_binary!(IntKernel<i16>; shl, shr);
    }

    impl Fused<i16> for AVX2 {}

    impl Narrow<i16> for AVX2 {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX2;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(i16, AVX2, 32, is_x86_feature_detected!("avx2"));
    }
}

// ----------------------------------------- AVX512 -----------------------------------------

#[cfg(feature = "avx512")]
mod avx512 {
    use super::super::config::{AVX2, AVX512};
    use super::super::generic::{avx512_int_cmp, avx512_int_common, narrow_m512i};
    use super::*;

    impl Kernel<i16> for AVX512 {
        type Reg = __m512i;

        avx512_int_common!(i16, i16, _mm512_set1_epi16);

        #[inline(always)]
        unsafe fn add(a: __m512i, b: __m512i) -> __m512i {
            _mm512_add_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512i, b: __m512i) -> __m512i {
            _mm512_sub_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m512i, b: __m512i) -> __m512i {
            _mm512_mullo_epi16(a, b)
        }

        forward_binary!(Kernel<i16>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epi16(a, b)
        }

        avx512_int_cmp!(
            _mm512_movm_epi16,
            _mm512_cmpeq_epi16_mask,
            _mm512_cmpneq_epi16_mask,
            _mm512_cmplt_epi16_mask,
            _mm512_cmple_epi16_mask,
            _mm512_cmpgt_epi16_mask,
            _mm512_cmpge_epi16_mask
        );

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512i) -> u64 {
            _mm512_movepi16_mask(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512i {
            _mm512_movm_epi16(bits as __mmask32)
        }

        forward_reduce!(i16);
    }

    impl IntKernel<i16> for AVX512 {
        #[inline(always)]
        unsafe fn shl(a: __m512i, count: __m512i) -> __m512i {
            _mm512_sllv_epi16(a, count)
        }

        #[inline(always)]
        unsafe fn shr(a: __m512i, count: __m512i) -> __m512i {
            _mm512_srav_epi16(a, count)
        }
    }

    impl Narrow<i16> for AVX512 {
        type Half = AVX2;

        narrow_m512i!();
    }

    // ------------------------------------ TESTS --------------------------------------

}
