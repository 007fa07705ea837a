//! Lookup tables of the mask codec.
//!
//! The tables are built at compile time and cover the lane widths for which the
//! instruction sets have no direct bitmask <-> vector conversion.

/// `_mm_movemask_epi8` of 16-bit lanes yields two equal bits per lane. Indexed by one
/// byte of that result, this table holds the 4 lane bits (the odd bits of the byte).
pub(crate) static COMPRESS_EPI16: [u8; 256] = compress_epi16();

/// 8 lane bits -> 8 bytes of all-ones / all-zeros
pub(crate) static EXPAND_EPI8: [u64; 256] = expand_epi8();

/// 8 lane bits -> 8 lanes of 16 bits
pub(crate) static EXPAND_EPI16: [[u16; 8]; 256] = expand_epi16();

/// 4 lane bits -> 4 lanes of 32 bits
pub(crate) static EXPAND_EPI32: [[u32; 4]; 16] = expand_epi32();

/// 2 lane bits -> 2 lanes of 64 bits
pub(crate) static EXPAND_EPI64: [[u64; 2]; 4] = expand_epi64();

const fn compress_epi16() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut byte = 0;
    while byte < 256 {
        let mut lane = 0;
        while lane < 4 {
            if byte & (1 << (2 * lane + 1)) != 0 {
                table[byte] |= 1 << lane;
            }
            lane += 1;
        }
        byte += 1;
    }
    table
}

const fn expand_epi8() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut bits = 0;
    while bits < 256 {
        let mut lane = 0;
        while lane < 8 {
            if bits & (1 << lane) != 0 {
                table[bits] |= 0xff << (8 * lane);
            }
            lane += 1;
        }
        bits += 1;
    }
    table
}

const fn expand_epi16() -> [[u16; 8]; 256] {
    let mut table = [[0u16; 8]; 256];
    let mut bits = 0;
    while bits < 256 {
        let mut lane = 0;
        while lane < 8 {
            if bits & (1 << lane) != 0 {
                table[bits][lane] = u16::MAX;
            }
            lane += 1;
        }
        bits += 1;
    }
    table
}

const fn expand_epi32() -> [[u32; 4]; 16] {
    let mut table = [[0u32; 4]; 16];
    let mut bits = 0;
    while bits < 16 {
        let mut lane = 0;
        while lane < 4 {
            if bits & (1 << lane) != 0 {
                table[bits][lane] = u32::MAX;
            }
            lane += 1;
        }
        bits += 1;
    }
    table
}

const fn expand_epi64() -> [[u64; 2]; 4] {
    let mut table = [[0u64; 2]; 4];
    let mut bits = 0;
    while bits < 4 {
        let mut lane = 0;
        while lane < 2 {
            if bits & (1 << lane) != 0 {
                table[bits][lane] = u64::MAX;
            }
            lane += 1;
        }
        bits += 1;
    }
    table
}
