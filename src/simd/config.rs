/// This module contains the instruction set tags. A tag is a zero-sized struct that
/// stores the register size, the alignment and whether the instruction set is enabled
/// for the current build. The [`Target`] enum resolves, for a vector of a given byte
/// size, which tag backs it.
///
/// The tags form one capability chain per family:
/// `GENERIC -> SSE -> AVX -> AVX2 -> AVX512`, with the FMA-augmented branch
/// `FMA<AVX>` / `FMA<AVX2>` next to it.
///
/// More info on target features:
/// https://github.com/rust-lang/portable-simd/blob/master/beginners-guide.md#target-features
///
use std::marker::PhantomData;

use crate::scalar::Scalar;

/// SIMD instruction set trait - used to store the register size and get the lane size
/// for a given datatype
pub trait InstructionSet: Copy + Default + 'static {
    /// The size of the register in bits
    const REGISTER_SIZE: usize;
    /// The alignment (in bytes) of one register
    const ALIGNMENT: usize = Self::REGISTER_SIZE / 8;
    /// Human readable name of the instruction set
    const NAME: &'static str;
    /// Whether the build target guarantees this instruction set
    const SUPPORTED: bool;

    /// The tag whose features are a subset of this tag's features
    type Parent: InstructionSet;

    // Set the const lanesize for each datatype
    const LANE_SIZE_8: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u8>() * 8);
    const LANE_SIZE_16: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u16>() * 8);
    const LANE_SIZE_32: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u32>() * 8);
    const LANE_SIZE_64: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u64>() * 8);

    fn get_lane_size<DType>() -> usize {
        Self::REGISTER_SIZE / (std::mem::size_of::<DType>() * 8)
    }

    #[inline(always)]
    fn supported() -> bool {
        Self::SUPPORTED
    }

    #[inline(always)]
    fn alignment() -> usize {
        Self::ALIGNMENT
    }

    #[inline(always)]
    fn name() -> &'static str {
        Self::NAME
    }

    /// Number of steps needed to walk from this tag down to `GENERIC`
    fn depth() -> usize {
        if Self::REGISTER_SIZE == GENERIC::REGISTER_SIZE && Self::NAME == GENERIC::NAME {
            0
        } else {
            1 + Self::Parent::depth()
        }
    }
}

// -------------------------------------- portable -------------------------------------

/// Portable instruction set - every operation is a loop over the lanes.
///
/// The register of this tag is a 64-bit word (`[T; 8 / size_of::<T>()]`), which is
/// where the forwarding adapter bottoms out. Vectors whose byte size is not a
/// multiple of a SIMD register run lane by lane on this tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GENERIC;

impl InstructionSet for GENERIC {
    const REGISTER_SIZE: usize = 64;
    const NAME: &'static str = "generic";
    const SUPPORTED: bool = true;
    type Parent = GENERIC;
}

// ----------------------------------- x86_64 / x86 ------------------------------------

/// SSE instruction set (SSE2 baseline) - implemented for all ints, uints and floats
/// (see the simd_*.rs files)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SSE;

impl InstructionSet for SSE {
    /// SSE register size is 128 bits
    /// https://en.wikipedia.org/wiki/Streaming_SIMD_Extensions#Registers
    const REGISTER_SIZE: usize = 128;
    const NAME: &'static str = "sse";
    const SUPPORTED: bool = cfg!(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2"
    ));
    type Parent = GENERIC;
}

/// AVX instruction set - floats are native, integer arithmetic is forwarded to SSE
/// halves (AVX has no 256-bit integer instructions besides loads & stores)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AVX;

impl InstructionSet for AVX {
    /// AVX register size is 256 bits
    /// https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#Advanced_Vector_Extensions
    const REGISTER_SIZE: usize = 256;
    const NAME: &'static str = "avx";
    const SUPPORTED: bool = cfg!(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx"
    ));
    type Parent = SSE;
}

/// AVX2 instruction set - native 256-bit integer arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AVX2;

impl InstructionSet for AVX2 {
    /// AVX2 register size is 256 bits
    /// AVX2: https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX2
    const REGISTER_SIZE: usize = 256;
    const NAME: &'static str = "avx2";
    const SUPPORTED: bool = cfg!(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx2"
    ));
    type Parent = AVX;
}

/// AVX512 instruction set (F + BW + DQ) - only compiled with the `avx512` feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AVX512;

impl InstructionSet for AVX512 {
    /// AVX512 register size is 512 bits
    /// https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX-512
    const REGISTER_SIZE: usize = 512;
    const NAME: &'static str = "avx512";
    const SUPPORTED: bool = cfg!(all(
        feature = "avx512",
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx512f",
        target_feature = "avx512bw",
        target_feature = "avx512dq"
    ));
    type Parent = AVX2;
}

/// FMA-augmented branch of a 256-bit tag: same registers as `Base`, but
/// `mul_add` on float lanes is a single fused instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FMA<Base> {
    pub(crate) _base: PhantomData<Base>,
}

const FMA_ENABLED: bool = cfg!(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "fma"
));

macro_rules! impl_fma_tag {
    ($base:ident, $name:expr) => {
        impl InstructionSet for FMA<$base> {
            const REGISTER_SIZE: usize = <$base as InstructionSet>::REGISTER_SIZE;
            const NAME: &'static str = $name;
            const SUPPORTED: bool = <$base as InstructionSet>::SUPPORTED && FMA_ENABLED;
            type Parent = $base;
        }
    };
}

impl_fma_tag!(AVX, "avx+fma");
impl_fma_tag!(AVX2, "avx2+fma");

// --------------------------------------- Target --------------------------------------

/// The instruction set that backs a vector of a given byte size.
///
/// Resolution prefers the widest enabled tag whose register size divides the byte
/// size of the vector; when none does, the vector runs lane by lane on `GENERIC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Generic,
    Sse,
    Avx,
    AvxFma,
    Avx2,
    Avx2Fma,
    Avx512,
}

impl Target {
    /// Resolve the target for a vector of `bytes` bytes
    pub const fn resolve(bytes: usize) -> Target {
        if bytes == 0 {
            return Target::Generic;
        }
        if AVX512::SUPPORTED && bytes % (AVX512::REGISTER_SIZE / 8) == 0 {
            return Target::Avx512;
        }
        if <FMA<AVX2>>::SUPPORTED && bytes % (AVX2::REGISTER_SIZE / 8) == 0 {
            return Target::Avx2Fma;
        }
        if AVX2::SUPPORTED && bytes % (AVX2::REGISTER_SIZE / 8) == 0 {
            return Target::Avx2;
        }
        if <FMA<AVX>>::SUPPORTED && bytes % (AVX::REGISTER_SIZE / 8) == 0 {
            return Target::AvxFma;
        }
        if AVX::SUPPORTED && bytes % (AVX::REGISTER_SIZE / 8) == 0 {
            return Target::Avx;
        }
        if SSE::SUPPORTED && bytes % (SSE::REGISTER_SIZE / 8) == 0 {
            return Target::Sse;
        }
        Target::Generic
    }

    /// Resolve the target for a vector of `bytes` bytes of `T` lanes; lane types
    /// without kernels (`f16`) always run on `GENERIC`
    pub const fn resolve_for<T: Scalar>(bytes: usize) -> Target {
        if T::HAS_SIMD {
            Target::resolve(bytes)
        } else {
            Target::Generic
        }
    }

    /// Register size in bits (the generic target reports its 64-bit word)
    pub const fn register_size(self) -> usize {
        match self {
            Target::Generic => GENERIC::REGISTER_SIZE,
            Target::Sse => SSE::REGISTER_SIZE,
            Target::Avx | Target::AvxFma => AVX::REGISTER_SIZE,
            Target::Avx2 | Target::Avx2Fma => AVX2::REGISTER_SIZE,
            Target::Avx512 => AVX512::REGISTER_SIZE,
        }
    }

    pub const fn alignment(self) -> usize {
        self.register_size() / 8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Target::Generic => GENERIC::NAME,
            Target::Sse => SSE::NAME,
            Target::Avx => AVX::NAME,
            Target::AvxFma => <FMA<AVX>>::NAME,
            Target::Avx2 => AVX2::NAME,
            Target::Avx2Fma => <FMA<AVX2>>::NAME,
            Target::Avx512 => AVX512::NAME,
        }
    }

    /// The widest target enabled for this build
    pub const fn best() -> Target {
        // 64 bytes is divisible by every register size
        Target::resolve(64)
    }
}

/// Names of every instruction set tag enabled for this build, narrowest first
pub fn enabled_instruction_sets() -> Vec<&'static str> {
    let mut names = vec![GENERIC::NAME];
    if SSE::SUPPORTED {
        names.push(SSE::NAME);
    }
    if AVX::SUPPORTED {
        names.push(AVX::NAME);
    }
    if <FMA<AVX>>::SUPPORTED {
        names.push(<FMA<AVX>>::NAME);
    }
    if AVX2::SUPPORTED {
        names.push(AVX2::NAME);
    }
    if <FMA<AVX2>>::SUPPORTED {
        names.push(<FMA<AVX2>>::NAME);
    }
    if AVX512::SUPPORTED {
        names.push(AVX512::NAME);
    }
    names
}

/// Emit the build configuration (widest target and enabled tags) as a tracing event
pub fn log_build_config() {
    let best = Target::best();
    tracing::info!(
        best = best.name(),
        register_bits = best.register_size(),
        enabled = ?enabled_instruction_sets(),
        "SIMD instruction sets resolved at build time"
    );
}

// ======================================= TESTS =======================================
