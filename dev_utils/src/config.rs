/// Number of vectors processed per benchmark iteration
pub const NB_VECTORS: usize = 1024;

/// Number of random runs in the kernel tests
pub const NB_RUNS: usize = 1_000;
