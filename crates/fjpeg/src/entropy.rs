//! Per-block entropy coding: DC differential + category/VLI, AC run-length
//! + category/VLI with ZRL and EOB, driven by a channel's Huffman tables.

use fjpeg_core::bytestream::{ZByteIoError, ZByteWriterTrait};

use crate::bitwriter::BitWriter;
use crate::errors::EncodeErrors;
use crate::huffman::HuffmanTable;
use crate::tables::{EOB, ZRL};

/// Compute `(category, vli_bits)` for a signed coefficient.
///
/// Category is the number of bits needed to represent `|value|`
/// (`0` for `value == 0`). The VLI for a positive value is its low
/// `category` bits; for a negative value it is the low `category` bits of
/// `value - 1`, which is equivalent to the one's complement of `|value|`.
pub fn category_and_vli(value: i32) -> (u8, u16) {
    if value == 0 {
        return (0, 0);
    }
    let magnitude = value.unsigned_abs();
    let category = (32 - magnitude.leading_zeros()) as u8;
    let vli = if value > 0 {
        magnitude as u16
    } else {
        (value - 1) as u16 & ((1u16 << category) - 1)
    };
    (category, vli)
}

/// The four Huffman tables needed for one channel's worth of coding.
pub struct ChannelTables<'a> {
    pub dc: &'a HuffmanTable,
    pub ac: &'a HuffmanTable
}

/// Encode one 8x8 block's zig-zag coefficients, already rounded to
/// signed integers. Returns the DC value to use as `last_dc` for the
/// next block on this channel.
pub fn encode_block<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, coeffs: &[i32; 64], last_dc: i32, tables: &ChannelTables
) -> Result<i32, EncodeErrors> {
    encode_dc(writer, coeffs[0], last_dc, tables.dc)?;
    encode_ac(writer, coeffs, tables.ac)?;
    Ok(coeffs[0])
}

fn encode_dc<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, dc: i32, last_dc: i32, dc_table: &HuffmanTable
) -> Result<(), EncodeErrors> {
    let diff = dc - last_dc;
    let (category, vli) = category_and_vli(diff);
    if category > 11 {
        error!("DC category {category} exceeds the baseline limit of 11 (diff={diff})");
        return Err(EncodeErrors::EncodeOverflow(category, 11));
    }
    write_symbol(writer, dc_table, category)?;
    if category > 0 {
        writer.write(vli, category as u32)?;
    }
    Ok(())
}

fn encode_ac<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, coeffs: &[i32; 64], ac_table: &HuffmanTable
) -> Result<(), EncodeErrors> {
    let last_nz = coeffs[1..].iter().rposition(|&c| c != 0).map(|i| i + 1).unwrap_or(0);

    if last_nz == 0 {
        write_symbol(writer, ac_table, EOB)?;
        return Ok(());
    }

    let mut run = 0u8;
    for &coeff in &coeffs[1..=last_nz] {
        if coeff == 0 {
            run += 1;
            if run == 16 {
                write_symbol(writer, ac_table, ZRL)?;
                run = 0;
            }
            continue;
        }

        let (category, vli) = category_and_vli(coeff);
        if category > 10 {
            error!("AC category {category} exceeds the baseline limit of 10 (coeff={coeff})");
            return Err(EncodeErrors::EncodeOverflow(category, 10));
        }
        let symbol = (run << 4) | category;
        write_symbol(writer, ac_table, symbol)?;
        writer.write(vli, category as u32)?;
        run = 0;
    }

    if last_nz != 63 {
        write_symbol(writer, ac_table, EOB)?;
    }
    Ok(())
}

fn write_symbol<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, table: &HuffmanTable, symbol: u8
) -> Result<(), ZByteIoError> {
    let (code, length) = table.get(symbol);
    writer.write(code, length as u32)
}
