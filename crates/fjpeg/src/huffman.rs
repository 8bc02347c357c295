//! Canonical Huffman table construction (ITU-T T.81 Annex C).
//!
//! Expands a `(BITS, HUFFVAL)` specification into a lookup table indexed
//! by symbol byte, yielding `(code, length)`. A `length` of zero marks a
//! symbol with no assigned code.

use crate::errors::EncodeErrors;
use crate::tables::HuffmanSpec;

/// A built Huffman table: for each possible symbol byte, its canonical
/// code and the number of bits in that code.
#[derive(Clone)]
pub struct HuffmanTable {
    codes: [(u16, u8); 256]
}

impl HuffmanTable {
    /// Build a table from an Annex K-style specification.
    ///
    /// Figure C.1 generates the per-symbol code lengths, Figure C.2
    /// assigns contiguous canonical codes per length, and Figure C.3
    /// permutes the result into the `HUFFVAL` order.
    pub fn build(spec: &HuffmanSpec) -> Result<Self, EncodeErrors> {
        let total: usize = spec.bits.iter().map(|&b| b as usize).sum();
        if total > 256 {
            error!("Huffman spec rejected: sum(BITS)={total} exceeds 256");
            return Err(EncodeErrors::TableSpecInvalid("sum(BITS) exceeds 256"));
        }
        if total != spec.huffval.len() {
            error!(
                "Huffman spec rejected: sum(BITS)={total} does not match HUFFVAL length {}",
                spec.huffval.len()
            );
            return Err(EncodeErrors::TableSpecInvalid(
                "sum(BITS) does not match the length of HUFFVAL"
            ));
        }

        let sizes = create_sizes(&spec.bits);
        let huffcodes = create_codes(&sizes, total);

        let mut codes = [(0u16, 0u8); 256];
        let mut assigned = [false; 256];

        for (k, &symbol) in spec.huffval.iter().enumerate() {
            if assigned[symbol as usize] {
                error!("Huffman spec rejected: HUFFVAL repeats symbol {symbol:#04x}");
                return Err(EncodeErrors::TableSpecInvalid("HUFFVAL repeats a symbol"));
            }
            assigned[symbol as usize] = true;
            codes[symbol as usize] = (huffcodes[k], sizes[k]);
        }

        Ok(HuffmanTable { codes })
    }

    /// Look up the `(code, length)` pair for `symbol`. A length of 0
    /// means the symbol has no code in this table.
    #[inline]
    pub fn get(&self, symbol: u8) -> (u16, u8) {
        self.codes[symbol as usize]
    }
}

/// Figure C.1: emit `BITS[i-1]` copies of length `i`, for `i = 1..=16`.
fn create_sizes(bits: &[u8; 16]) -> [u8; 256] {
    let mut sizes = [0u8; 256];
    let mut k = 0;
    for (i, &count) in bits.iter().enumerate() {
        for _ in 0..count {
            sizes[k] = (i + 1) as u8;
            k += 1;
        }
    }
    sizes
}

/// Figure C.2: assign contiguous canonical codes per length.
fn create_codes(sizes: &[u8; 256], total: usize) -> [u16; 256] {
    let mut codes = [0u16; 256];
    if total == 0 {
        return codes;
    }

    let mut code: u16 = 0;
    let mut size = sizes[0];

    for k in 0..total {
        while sizes[k] != size {
            code <<= 1;
            size += 1;
        }
        codes[k] = code;
        code += 1;
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{LUMA_DC_SPEC, LUMA_AC_SPEC};

    // S1 from the test plan: luma DC with a synthetic spec matching
    // Annex K Table K.3.
    #[test]
    fn s1_luma_dc_codes() {
        let table = HuffmanTable::build(&LUMA_DC_SPEC).unwrap();
        let expected: [(u8, u16, u8); 12] = [
            (0, 0b00, 2),
            (1, 0b010, 3),
            (2, 0b011, 3),
            (3, 0b100, 3),
            (4, 0b101, 3),
            (5, 0b110, 3),
            (6, 0b1110, 4),
            (7, 0b11110, 5),
            (8, 0b111110, 6),
            (9, 0b1111110, 7),
            (10, 0b11111110, 8),
            (11, 0b111111110, 9)
        ];
        for (symbol, code, length) in expected {
            assert_eq!(table.get(symbol), (code, length), "symbol {symbol}");
        }
    }

    #[test]
    fn codes_of_equal_length_are_contiguous_and_prefix_free() {
        let table = HuffmanTable::build(&LUMA_AC_SPEC).unwrap();
        let mut by_length: std::collections::BTreeMap<u8, Vec<u16>> = std::collections::BTreeMap::new();
        for symbol in 0u16..256 {
            let (code, length) = table.get(symbol as u8);
            if length > 0 {
                by_length.entry(length).or_default().push(code);
            }
        }
        for codes in by_length.values_mut() {
            codes.sort_unstable();
            for pair in codes.windows(2) {
                assert_eq!(pair[1], pair[0] + 1, "codes of equal length must be contiguous");
            }
        }

        // no code is a prefix of a longer one
        let mut all: Vec<(u16, u8)> = Vec::new();
        for symbol in 0u16..256 {
            let (code, length) = table.get(symbol as u8);
            if length > 0 {
                all.push((code, length));
            }
        }
        for &(code_a, len_a) in &all {
            for &(code_b, len_b) in &all {
                if len_a < len_b {
                    let prefix = code_b >> (len_b - len_a);
                    assert_ne!(prefix, code_a, "a code must not prefix a longer one");
                }
            }
        }
    }

    #[test]
    fn rejects_oversized_bits_table() {
        use crate::tables::HuffmanSpec;
        let spec = HuffmanSpec { bits: [255; 16], huffval: &[] };
        assert!(HuffmanTable::build(&spec).is_err());
    }

    #[test]
    fn rejects_mismatched_huffval_length() {
        use crate::tables::HuffmanSpec;
        let spec = HuffmanSpec { bits: [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], huffval: &[] };
        assert!(HuffmanTable::build(&spec).is_err());
    }
}
