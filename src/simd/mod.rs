mod config;
pub use config::*;
mod generic;
pub use generic::*;
pub(crate) mod forward;
pub use forward::{HalfReg, Narrow};
mod fma;
#[cfg_attr(not(any(target_arch = "x86", target_arch = "x86_64")), allow(dead_code))]
mod mask_table;
// FLOAT
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_f32;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_f64;
// SIGNED INT
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_i16;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_i32;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_i64;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_i8;
// UNSIGNED INT
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_u16;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_u32;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_u64;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod simd_u8;

#[cfg(test)]
pub(crate) mod test_utils;
