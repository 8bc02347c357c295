/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Static baseline tables: the zig-zag permutation, the Annex K default
//! quantization tables, and the Annex K default Huffman `BITS`/`HUFFVAL`
//! specifications for luma and chroma, DC and AC.
//!
//! Nothing in this module allocates or depends on an encode's runtime
//! state; everything here is `const`/`static` data shared read-only by
//! every context.

/// Maps a position in the 64-entry zig-zag scan to its natural
/// (row-major) index within an 8x8 block.
///
/// `ZIGZAG_ORDER[k]` is the natural index whose coefficient goes at
/// zig-zag position `k`.
pub const ZIGZAG_ORDER: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10,
    17, 24, 32, 25, 18, 11, 4, 5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6, 7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63
];

/// Annex K, Table K.1: default luminance quantization table, natural order.
pub const DEFAULT_LUMA_QUANT_TABLE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99
];

/// Annex K, Table K.2: default chrominance quantization table, natural order.
pub const DEFAULT_CHROMA_QUANT_TABLE: [u16; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99
];

/// A Huffman table specification as given in Annex K: counts of codes of
/// each length 1..=16, and the symbols in canonical order.
pub struct HuffmanSpec {
    pub bits:    [u8; 16],
    pub huffval: &'static [u8]
}

/// Table K.3: luma DC.
pub const LUMA_DC_SPEC: HuffmanSpec = HuffmanSpec {
    bits:    [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    huffval: &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B]
};

/// Table K.4: chroma DC.
pub const CHROMA_DC_SPEC: HuffmanSpec = HuffmanSpec {
    bits:    [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    huffval: &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B]
};

/// Table K.5: luma AC.
pub const LUMA_AC_SPEC: HuffmanSpec = HuffmanSpec {
    bits:    [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 0x7D],
    huffval: &[
        0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61,
        0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52,
        0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x25,
        0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45,
        0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64,
        0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x83,
        0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99,
        0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6,
        0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3,
        0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8,
        0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA
    ]
};

/// Table K.6: chroma AC.
pub const CHROMA_AC_SPEC: HuffmanSpec = HuffmanSpec {
    bits:    [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 0x77],
    huffval: &[
        0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61,
        0x71, 0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xA1, 0xB1, 0xC1, 0x09, 0x23, 0x33,
        0x52, 0xF0, 0x15, 0x62, 0x72, 0xD1, 0x0A, 0x16, 0x24, 0x34, 0xE1, 0x25, 0xF1, 0x17, 0x18,
        0x19, 0x1A, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44,
        0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63,
        0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A,
        0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97,
        0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4,
        0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA,
        0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7,
        0xE8, 0xE9, 0xEA, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA
    ]
};

/// AC symbol for Zero Run Length (16 zero coefficients with more to follow).
pub const ZRL: u8 = 0xF0;
/// AC symbol for End Of Block (all remaining coefficients are zero).
pub const EOB: u8 = 0x00;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_order_is_a_permutation_of_0_63() {
        let mut seen = [false; 64];
        for &idx in ZIGZAG_ORDER.iter() {
            assert!(idx < 64);
            assert!(!seen[idx], "natural index {idx} appears twice");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn zigzag_starts_and_ends_correctly() {
        assert_eq!(ZIGZAG_ORDER[0], 0);
        assert_eq!(ZIGZAG_ORDER[63], 63);
        // second scan position is the natural (0,1) entry
        assert_eq!(ZIGZAG_ORDER[1], 1);
        assert_eq!(ZIGZAG_ORDER[2], 8);
    }

    #[test]
    fn huffman_specs_sum_of_bits_matches_huffval_len() {
        assert_eq!(LUMA_DC_SPEC.bits.iter().map(|&b| b as usize).sum::<usize>(), LUMA_DC_SPEC.huffval.len());
        assert_eq!(CHROMA_DC_SPEC.bits.iter().map(|&b| b as usize).sum::<usize>(), CHROMA_DC_SPEC.huffval.len());
        assert_eq!(LUMA_AC_SPEC.bits.iter().map(|&b| b as usize).sum::<usize>(), LUMA_AC_SPEC.huffval.len());
        assert_eq!(CHROMA_AC_SPEC.bits.iter().map(|&b| b as usize).sum::<usize>(), CHROMA_AC_SPEC.huffval.len());
    }

    #[test]
    fn quant_tables_are_in_valid_range() {
        for &v in DEFAULT_LUMA_QUANT_TABLE.iter().chain(DEFAULT_CHROMA_QUANT_TABLE.iter()) {
            assert!(v >= 1 && v <= 255);
        }
    }
}
