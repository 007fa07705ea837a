//! Fixed-width SIMD vectors with compile-time instruction set dispatch.
//!
//! A [`SimdVec<T, W>`](SimdVec) holds `W` lanes of a scalar type `T`. Its operations are
//! mapped at compile time on the widest instruction set that is enabled for the build and
//! whose register size divides the byte size of the vector; vectors of any other size run
//! lane by lane on the portable fallback. The result of every operation is the same on
//! every instruction set, bit for bit (except for the association order of float
//! reductions and the single rounding of `mul_add` on FMA-capable targets).
//!
//! The instruction sets are enabled for the following architectures:
//! - `x86` / `x86_64`: [`SSE`](https://en.wikipedia.org/wiki/Streaming_SIMD_Extensions) (SSE2), [`AVX`](https://en.wikipedia.org/wiki/Advanced_Vector_Extensions), [`AVX2`](https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#Advanced_Vector_Extensions_2) (optionally with FMA), [`AVX512`](https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX-512)
//! - every other architecture: the portable `GENERIC` fallback
//!
//! Which instruction sets are enabled is decided by the target features of the build
//! (e.g. `RUSTFLAGS="-C target-cpu=native"`), not at runtime.
//!
//! # Description
//!
//! This crate provides two vector types:
//! - [`SimdVec`](struct.SimdVec.html): arithmetic, bitwise logic, shifts, comparisons,
//!   reductions and memory operations on `W` lanes.
//! - [`SimdVecBool`](struct.SimdVecBool.html): the result of a comparison, with lane-wise
//!   logic, selection, queries (`all_of`, `popcount`, ...) and a compact `u64` bitmask
//!   form.
//!
//! The supported lane types are
//!   - ints: `i8`, `i16`, `i32`, `i64`
//!   - uints: `u8`, `u16`, `u32`, `u64`
//!   - floats: `f32`, `f64` and `f16` (see [Features](#features), lane by lane only)
//!
//! The explicit-tag API (`binary_on::<AVX2, Add>`, `to_mask_on::<SSE>`, ...) runs an
//! operation on a chosen instruction set; it fails to compile when the tag is not enabled
//! for the build or the vector is not a whole number of its registers.
//!
//! # Features
//!
//! - **`avx512`** - compiles the AVX512 (F + BW + DQ) kernels (requires Rust 1.89).
//! - **`half`** - enables `f16` lanes (requires the [`half`](https://crates.io/crates/half) crate).
//!
//! # Examples
//!
//! ## Arithmetic and comparisons
//! ```
//! use simdvec::SimdVec;
//!
//! let a = SimdVec::<i32, 8>::from_fn(|i| i as i32);
//! let b = SimdVec::<i32, 8>::splat(4);
//! let mask = a.cmp_lt(b);
//! assert_eq!(mask.to_mask(), 0b0000_1111);
//! assert_eq!(mask.select(a, b * 10).to_array(), [0, 1, 2, 3, 40, 40, 40, 40]);
//! assert_eq!((a + b).reduce_sum(), 28 + 32);
//! ```
//!
//! ## Masks
//! ```
//! use simdvec::SimdVecBool;
//!
//! let m = SimdVecBool::<f32, 4>::from_mask(0b1010);
//! assert_eq!(m.to_array(), [false, true, false, true]);
//! assert_eq!(m.find_first_set(), Some(1));
//! assert!(SimdVecBool::<f32, 4>::try_from_mask(0b1_0000).is_err());
//! ```
//!

// It is necessary to import this at the root of the crate
// See: https://github.com/la10736/rstest/tree/master/rstest_reuse#use-rstest_resuse-at-the-top-of-your-crate
#[cfg(test)]
use rstest_reuse;

pub mod complex;
mod error;
mod kernel;
pub mod ops;
pub mod scalar;
pub mod simd;
pub mod utils;
mod vec;
mod vec_bool;

pub use error::{SimdError, SimdResult};
pub use kernel::{ArchVisitor, FloatVisitor, IntVisitor};
pub use scalar::{FloatScalar, IntScalar, Scalar, SignedScalar};
pub use simd::{
    enabled_instruction_sets, log_build_config, InstructionSet, Target, AVX, AVX2, AVX512,
    FMA, GENERIC, SSE,
};
pub use vec::SimdVec;
pub use vec_bool::SimdVecBool;
