/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The forward 8x8 DCT, level shift, and quantization.
//!
//! Direct O(N^4) evaluation with a precomputed cosine matrix, as the
//! reference does; this is not the fastest transform but it is the
//! easiest to get exactly right.

use core::f32::consts::PI;

use crate::tables::ZIGZAG_ORDER;

/// An 8x8 block of raw samples, row-major.
pub type SampleBlock = [u8; 64];
/// An 8x8 block of coefficients, row-major (natural order, not zig-zag).
pub type CoeffBlock = [f32; 64];

/// `cos_table[x][u] = cos((2x+1)*u*pi/16)`, precomputed once and reused
/// for every block in an encode.
pub struct CosineTable {
    table: [[f32; 8]; 8]
}

impl CosineTable {
    pub fn new() -> Self {
        let mut table = [[0f32; 8]; 8];
        for (x, row) in table.iter_mut().enumerate() {
            for (u, slot) in row.iter_mut().enumerate() {
                *slot = ((2 * x + 1) as f32 * u as f32 * PI / 16.0).cos();
            }
        }
        CosineTable { table }
    }

    #[inline]
    fn at(&self, x: usize, u: usize) -> f32 {
        self.table[x][u]
    }
}

impl Default for CosineTable {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn c(k: usize) -> f32 {
    if k == 0 {
        core::f32::consts::FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Level-shift (subtract 128) and forward DCT an 8x8 sample block,
/// producing natural-order (not zig-zag) coefficients.
pub fn forward_dct(block: &SampleBlock, cos: &CosineTable) -> CoeffBlock {
    let mut shifted = [0f32; 64];
    for (dst, &src) in shifted.iter_mut().zip(block.iter()) {
        *dst = src as f32 - 128.0;
    }

    let mut out = [0f32; 64];
    for u in 0..8 {
        for v in 0..8 {
            let mut sum = 0f32;
            for x in 0..8 {
                for y in 0..8 {
                    sum += shifted[x * 8 + y] * cos.at(x, u) * cos.at(y, v);
                }
            }
            out[u * 8 + v] = 0.25 * c(u) * c(v) * sum;
        }
    }
    out
}

/// Inverse 8x8 DCT, level-unshifted back to `[0, 255]` samples. Only used
/// by the self-test path that checks the DCT/quantize round trip; not
/// part of the public encode API.
#[cfg(test)]
pub(crate) fn inverse_dct(coeffs: &CoeffBlock, cos: &CosineTable) -> SampleBlock {
    let mut out = [0f32; 64];
    for x in 0..8 {
        for y in 0..8 {
            let mut sum = 0f32;
            for u in 0..8 {
                for v in 0..8 {
                    sum += c(u) * c(v) * coeffs[u * 8 + v] * cos.at(x, u) * cos.at(y, v);
                }
            }
            out[x * 8 + y] = 0.25 * sum + 128.0;
        }
    }

    let mut samples = [0u8; 64];
    for (dst, &src) in samples.iter_mut().zip(out.iter()) {
        *dst = src.round().clamp(0.0, 255.0) as u8;
    }
    samples
}

/// Element-wise divide natural-order coefficients by a natural-order
/// quantization table, then permute into zig-zag order.
pub fn quantize_and_zigzag(coeffs: &CoeffBlock, quant_table: &[u16; 64]) -> [f32; 64] {
    let mut zigzag = [0f32; 64];
    for (k, &natural_idx) in ZIGZAG_ORDER.iter().enumerate() {
        zigzag[k] = coeffs[natural_idx] / quant_table[natural_idx] as f32;
    }
    zigzag
}

#[cfg(test)]
mod tests {
    use super::*;

    // S2: the classic Wikipedia JPEG example block.
    const WIKI_BLOCK: SampleBlock = [
        52, 55, 61, 66, 70, 61, 64, 73,
        63, 59, 55, 90, 109, 85, 69, 72,
        62, 59, 68, 113, 144, 104, 66, 73,
        63, 58, 71, 122, 154, 106, 70, 69,
        67, 61, 68, 104, 126, 88, 68, 70,
        79, 65, 60, 70, 77, 68, 58, 75,
        85, 71, 64, 59, 55, 61, 65, 83,
        87, 79, 69, 68, 65, 76, 78, 94
    ];

    #[test]
    fn s2_dct_of_classic_block() {
        let cos = CosineTable::new();
        let coeffs = forward_dct(&WIKI_BLOCK, &cos);
        assert!((coeffs[0] - (-415.375)).abs() < 0.5, "DC was {}", coeffs[0]);
        // row 0, col 1 natural order is index 1
        assert!((coeffs[1] - (-30.1875)).abs() < 0.5, "AC(0,1) was {}", coeffs[1]);
    }

    // Invariant 6: DCT+IDCT with quant=1 reconstructs within +/-1 per pixel.
    #[test]
    fn dct_idct_round_trip_with_unit_quant() {
        let cos = CosineTable::new();
        let coeffs = forward_dct(&WIKI_BLOCK, &cos);
        let reconstructed = inverse_dct(&coeffs, &cos);
        for (&orig, &recon) in WIKI_BLOCK.iter().zip(reconstructed.iter()) {
            let diff = (orig as i16 - recon as i16).abs();
            assert!(diff <= 1, "pixel differed by {diff}: {orig} vs {recon}");
        }
    }

    #[test]
    fn flat_block_has_zero_ac_coefficients() {
        let block: SampleBlock = [128; 64];
        let cos = CosineTable::new();
        let coeffs = forward_dct(&block, &cos);
        for &ac in coeffs[1..].iter() {
            assert!(ac.abs() < 1e-3, "expected zero AC, got {ac}");
        }
    }

    #[test]
    fn quantize_and_zigzag_places_dc_first() {
        let cos = CosineTable::new();
        let coeffs = forward_dct(&WIKI_BLOCK, &cos);
        let quant = [1u16; 64];
        let zz = quantize_and_zigzag(&coeffs, &quant);
        assert_eq!(zz[0], coeffs[0]);
    }
}
