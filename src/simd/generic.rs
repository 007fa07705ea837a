use super::config::InstructionSet;
use crate::ops::BinaryOp;
use crate::scalar::{FloatScalar, IntScalar, Scalar};

// ---------------------------------- SIMD operations ----------------------------------

/// Core SIMD operations
/// These operations are the register-level primitives every data type - instruction
/// set combination has to provide. They are implemented in the `simd_*.rs` files
/// (and for the portable `GENERIC` tag in `scalar/generic.rs`).
///
/// Every method must produce, lane by lane, the exact bits of the per-lane formula of
/// the [`Scalar`] trait (see `scalar/mod.rs`). The defaulted methods are expressed in
/// terms of the required ones, so an implementation only overrides what the hardware
/// does natively; what it cannot do natively is forwarded to the half-width tag (see
/// `forward.rs`).
///
/// # Safety
/// All methods are `unsafe`: the caller guarantees that the instruction set is
/// enabled on the executing CPU, and for the memory operations that the pointer is
/// valid for one register (and aligned to [`InstructionSet::ALIGNMENT`] for the
/// aligned variants).
pub trait Kernel<T: Scalar>: InstructionSet {
    /// The native register type
    type Reg: Copy;
    /// Number of lanes of type `T` in one register
    const LANES: usize = Self::REGISTER_SIZE / (std::mem::size_of::<T>() * 8);

    // ------ memory

    unsafe fn load_aligned(ptr: *const T) -> Self::Reg;
    unsafe fn load_unaligned(ptr: *const T) -> Self::Reg;
    unsafe fn store_aligned(ptr: *mut T, a: Self::Reg);
    unsafe fn store_unaligned(ptr: *mut T, a: Self::Reg);

    // ------ setup

    unsafe fn broadcast(value: T) -> Self::Reg;

    #[inline(always)]
    unsafe fn setzero() -> Self::Reg {
        Self::broadcast(T::zero())
    }

    // ------ arithmetic

    unsafe fn add(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn sub(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn mul(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn div(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn rem(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    /// `a * b + c`, rounded twice (only the FMA tags fuse it)
    #[inline(always)]
    unsafe fn mul_add(a: Self::Reg, b: Self::Reg, c: Self::Reg) -> Self::Reg {
        Self::add(Self::mul(a, b), c)
    }

    #[inline(always)]
    unsafe fn min(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::select(Self::cmp_lt(a, b), a, b)
    }

    #[inline(always)]
    unsafe fn max(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::select(Self::cmp_gt(a, b), a, b)
    }

    // ------ bitwise

    unsafe fn and(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn or(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn xor(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    /// `!a & b`
    #[inline(always)]
    unsafe fn andnot(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::and(Self::not(a), b)
    }

    #[inline(always)]
    unsafe fn not(a: Self::Reg) -> Self::Reg {
        Self::xor(a, Self::broadcast(T::ALL_ONES))
    }

    // ------ comparison (lanes become all-ones or all-zeros)

    unsafe fn cmp_eq(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    unsafe fn cmp_gt(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    // NOTE: the defaults below are only valid for totally ordered lanes; the float
    // kernels override all of them to get the IEEE unordered semantics right.

    #[inline(always)]
    unsafe fn cmp_ne(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::not(Self::cmp_eq(a, b))
    }

    #[inline(always)]
    unsafe fn cmp_lt(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::cmp_gt(b, a)
    }

    #[inline(always)]
    unsafe fn cmp_le(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::not(Self::cmp_gt(a, b))
    }

    #[inline(always)]
    unsafe fn cmp_ge(a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::not(Self::cmp_lt(a, b))
    }

    /// Lanes of `a` where `mask` is set, lanes of `b` elsewhere
    #[inline(always)]
    unsafe fn select(mask: Self::Reg, a: Self::Reg, b: Self::Reg) -> Self::Reg {
        Self::or(Self::and(mask, a), Self::andnot(mask, b))
    }

    // ------ mask codec

    /// Pack the most significant bit of every lane into the low `LANES` bits
    unsafe fn to_bitmask(a: Self::Reg) -> u64;
    /// Expand the low `LANES` bits into all-ones / all-zeros lanes
    unsafe fn from_bitmask(bits: u64) -> Self::Reg;

    // ------ horizontal

    /// Fold all lanes of the register with `Op`
    unsafe fn reduce<Op: BinaryOp<T>>(a: Self::Reg) -> T;
}

/// Integer-only SIMD operations: per-lane variable shifts
pub trait IntKernel<T: IntScalar>: Kernel<T> {
    unsafe fn shl(a: Self::Reg, count: Self::Reg) -> Self::Reg;
    unsafe fn shr(a: Self::Reg, count: Self::Reg) -> Self::Reg;
}

/// Float-only SIMD operations
pub trait FloatKernel<T: FloatScalar>: Kernel<T> {
    unsafe fn sqrt(a: Self::Reg) -> Self::Reg;

    /// Clear the sign bit
    #[inline(always)]
    unsafe fn abs(a: Self::Reg) -> Self::Reg {
        Self::andnot(Self::broadcast(T::SIGN_MASK), a)
    }
}

/// Fused multiply-add, used by the `FMA<Base>` tags for their `mul_add`.
///
/// The default is the unfused formula; float kernels of FMA-capable tags override it
/// with the single-rounding instruction.
pub trait Fused<T: Scalar>: Kernel<T> {
    #[inline(always)]
    unsafe fn fmadd(a: Self::Reg, b: Self::Reg, c: Self::Reg) -> Self::Reg {
        Self::add(Self::mul(a, b), c)
    }
}

// ------------------------------- Shared x86 kernel bodies -----------------------------

/// Memory, setup and bitwise operations of a 128-bit integer register.
/// `$signed` is the signed integer of the lane width (the `_mm_set1_*` argument type).
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! sse_int_common {
    ($scalar_type:ty, $signed:ty, $set1:ident) => {
        #[inline(always)]
        unsafe fn load_aligned(ptr: *const $scalar_type) -> __m128i {
            _mm_load_si128(ptr as *const __m128i)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const $scalar_type) -> __m128i {
            _mm_loadu_si128(ptr as *const __m128i)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut $scalar_type, a: __m128i) {
            _mm_store_si128(ptr as *mut __m128i, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut $scalar_type, a: __m128i) {
            _mm_storeu_si128(ptr as *mut __m128i, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: $scalar_type) -> __m128i {
            $set1(value as $signed)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m128i {
            _mm_setzero_si128()
        }

        #[inline(always)]
        unsafe fn and(a: __m128i, b: __m128i) -> __m128i {
            _mm_and_si128(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m128i, b: __m128i) -> __m128i {
            _mm_or_si128(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m128i, b: __m128i) -> __m128i {
            _mm_xor_si128(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m128i, b: __m128i) -> __m128i {
            _mm_andnot_si128(a, b)
        }
    };
}

/// Memory and setup operations of a 256-bit integer register (AVX and AVX2).
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! avx_int_memory {
    ($scalar_type:ty, $signed:ty, $set1:ident) => {
        #[inline(always)]
        unsafe fn load_aligned(ptr: *const $scalar_type) -> __m256i {
            _mm256_load_si256(ptr as *const __m256i)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const $scalar_type) -> __m256i {
            _mm256_loadu_si256(ptr as *const __m256i)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut $scalar_type, a: __m256i) {
            _mm256_store_si256(ptr as *mut __m256i, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut $scalar_type, a: __m256i) {
            _mm256_storeu_si256(ptr as *mut __m256i, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: $scalar_type) -> __m256i {
            $set1(value as $signed)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m256i {
            _mm256_setzero_si256()
        }
    };
}

/// Bitwise operations of a 256-bit integer register without AVX2: AVX only has the
/// float-domain logic instructions, the bits pass through unchanged.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! avx_int_bitwise {
    () => {
        #[inline(always)]
        unsafe fn and(a: __m256i, b: __m256i) -> __m256i {
            _mm256_castps_si256(_mm256_and_ps(_mm256_castsi256_ps(a), _mm256_castsi256_ps(b)))
        }

        #[inline(always)]
        unsafe fn or(a: __m256i, b: __m256i) -> __m256i {
            _mm256_castps_si256(_mm256_or_ps(_mm256_castsi256_ps(a), _mm256_castsi256_ps(b)))
        }

        #[inline(always)]
        unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
            _mm256_castps_si256(_mm256_xor_ps(_mm256_castsi256_ps(a), _mm256_castsi256_ps(b)))
        }

        #[inline(always)]
        unsafe fn andnot(a: __m256i, b: __m256i) -> __m256i {
            _mm256_castps_si256(_mm256_andnot_ps(
                _mm256_castsi256_ps(a),
                _mm256_castsi256_ps(b),
            ))
        }
    };
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! avx2_int_bitwise {
    () => {
        #[inline(always)]
        unsafe fn and(a: __m256i, b: __m256i) -> __m256i {
            _mm256_and_si256(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m256i, b: __m256i) -> __m256i {
            _mm256_or_si256(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
            _mm256_xor_si256(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m256i, b: __m256i) -> __m256i {
            _mm256_andnot_si256(a, b)
        }
    };
}

/// Memory, setup and bitwise operations of a 512-bit integer register.
///
/// The loads and stores go through plain pointer reads and writes of the register
/// type, which compile to the same (aligned or unaligned) moves.
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
macro_rules! avx512_int_common {
    ($scalar_type:ty, $signed:ty, $set1:ident) => {
        #[inline(always)]
        unsafe fn load_aligned(ptr: *const $scalar_type) -> __m512i {
            std::ptr::read(ptr as *const __m512i)
        }

        #[inline(always)]
        unsafe fn load_unaligned(ptr: *const $scalar_type) -> __m512i {
            std::ptr::read_unaligned(ptr as *const __m512i)
        }

        #[inline(always)]
        unsafe fn store_aligned(ptr: *mut $scalar_type, a: __m512i) {
            std::ptr::write(ptr as *mut __m512i, a)
        }

        #[inline(always)]
        unsafe fn store_unaligned(ptr: *mut $scalar_type, a: __m512i) {
            std::ptr::write_unaligned(ptr as *mut __m512i, a)
        }

        #[inline(always)]
        unsafe fn broadcast(value: $scalar_type) -> __m512i {
            $set1(value as $signed)
        }

        #[inline(always)]
        unsafe fn setzero() -> __m512i {
            _mm512_setzero_si512()
        }

        #[inline(always)]
        unsafe fn and(a: __m512i, b: __m512i) -> __m512i {
            _mm512_and_si512(a, b)
        }

        #[inline(always)]
        unsafe fn or(a: __m512i, b: __m512i) -> __m512i {
            _mm512_or_si512(a, b)
        }

        #[inline(always)]
        unsafe fn xor(a: __m512i, b: __m512i) -> __m512i {
            _mm512_xor_si512(a, b)
        }

        #[inline(always)]
        unsafe fn andnot(a: __m512i, b: __m512i) -> __m512i {
            _mm512_andnot_si512(a, b)
        }
    };
}

/// The six AVX512 comparisons of an integer lane type: compare into a mask register
/// and widen the mask back to all-ones / all-zeros lanes.
/// `$ty` is the intrinsic suffix (`epi8`, `epu8`, ...), `$movm` the widening.
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
macro_rules! avx512_int_cmp {
    ($movm:ident, $eq:ident, $ne:ident, $lt:ident, $le:ident, $gt:ident, $ge:ident) => {
        #[inline(always)]
        unsafe fn cmp_eq(a: __m512i, b: __m512i) -> __m512i {
            $movm($eq(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ne(a: __m512i, b: __m512i) -> __m512i {
            $movm($ne(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m512i, b: __m512i) -> __m512i {
            $movm($lt(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_le(a: __m512i, b: __m512i) -> __m512i {
            $movm($le(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m512i, b: __m512i) -> __m512i {
            $movm($gt(a, b))
        }

        #[inline(always)]
        unsafe fn cmp_ge(a: __m512i, b: __m512i) -> __m512i {
            $movm($ge(a, b))
        }
    };
}

// ------------------------------------ register halves ---------------------------------

/// `Narrow` of a 128-bit integer register: two 64-bit words of `GENERIC`
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! narrow_m128i {
    ($scalar_type:ty, $word:literal) => {
        #[inline(always)]
        unsafe fn split(a: __m128i) -> ([$scalar_type; $word], [$scalar_type; $word]) {
            let [lo, hi] = std::mem::transmute::<__m128i, [[$scalar_type; $word]; 2]>(a);
            (lo, hi)
        }

        #[inline(always)]
        unsafe fn join(lo: [$scalar_type; $word], hi: [$scalar_type; $word]) -> __m128i {
            std::mem::transmute::<[[$scalar_type; $word]; 2], __m128i>([lo, hi])
        }
    };
}

/// `Narrow` of a 256-bit integer register: two 128-bit registers
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! narrow_m256i {
    () => {
        #[inline(always)]
        unsafe fn split(a: __m256i) -> (__m128i, __m128i) {
            (_mm256_castsi256_si128(a), _mm256_extractf128_si256::<1>(a))
        }

        #[inline(always)]
        unsafe fn join(lo: __m128i, hi: __m128i) -> __m256i {
            _mm256_set_m128i(hi, lo)
        }
    };
}

/// `Narrow` of a 512-bit integer register: two 256-bit registers
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
macro_rules! narrow_m512i {
    () => {
        #[inline(always)]
        unsafe fn split(a: __m512i) -> (__m256i, __m256i) {
            (_mm512_castsi512_si256(a), _mm512_extracti64x4_epi64::<1>(a))
        }

        #[inline(always)]
        unsafe fn join(lo: __m256i, hi: __m256i) -> __m512i {
            _mm512_inserti64x4::<1>(_mm512_castsi256_si512(lo), hi)
        }
    };
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use {
    avx2_int_bitwise, avx_int_bitwise, avx_int_memory, narrow_m128i, narrow_m256i,
    sse_int_common,
};

#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) use {avx512_int_cmp, avx512_int_common, narrow_m512i};
