/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JFIF/JPEG container marker emission: SOI, APP0, DQT, SOF0, DHT, COM,
//! SOS, EOI, in the order T.81 requires.

use fjpeg_core::bytestream::{ZByteIoError, ZByteWriterTrait};

use crate::bitwriter::BitWriter;
use crate::components::Channel;
use crate::tables::ZIGZAG_ORDER;

const SOI: u8 = 0xD8;
const APP0: u8 = 0xE0;
const DQT: u8 = 0xDB;
const SOF0: u8 = 0xC0;
const DHT: u8 = 0xC4;
const COM: u8 = 0xFE;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;

pub fn write_soi<T: ZByteWriterTrait>(writer: &mut BitWriter<T>) -> Result<(), ZByteIoError> {
    writer.write_raw_bytes(&[0xFF, SOI])
}

pub fn write_eoi<T: ZByteWriterTrait>(writer: &mut BitWriter<T>) -> Result<(), ZByteIoError> {
    writer.write_raw_bytes(&[0xFF, EOI])
}

/// APP0/JFIF segment: version 1.02, no density, no thumbnail.
pub fn write_app0<T: ZByteWriterTrait>(writer: &mut BitWriter<T>) -> Result<(), ZByteIoError> {
    writer.write_raw_bytes(&[0xFF, APP0])?;
    writer.write_raw_bytes(&16u16.to_be_bytes())?;
    writer.write_raw_bytes(b"JFIF\0")?;
    writer.write_raw_bytes(&[0x01, 0x02])?; // version 1.02
    writer.write_raw_bytes(&[0x00])?; // density units: none
    writer.write_raw_bytes(&1u16.to_be_bytes())?; // Xdensity
    writer.write_raw_bytes(&1u16.to_be_bytes())?; // Ydensity
    writer.write_raw_bytes(&[0x00, 0x00]) // no thumbnail
}

/// One DQT segment carrying a single table, `table` in natural order,
/// `table_id` 0 for luma or 1 for chroma.
pub fn write_dqt<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, table: &[u16; 64], table_id: u8
) -> Result<(), ZByteIoError> {
    writer.write_raw_bytes(&[0xFF, DQT])?;
    writer.write_raw_bytes(&67u16.to_be_bytes())?;
    writer.write_raw_bytes(&[table_id & 0x0F])?; // Pq=0 (8-bit precision) | Tq
    for &natural_idx in ZIGZAG_ORDER.iter() {
        writer.write_raw_bytes(&[table[natural_idx] as u8])?;
    }
    Ok(())
}

/// SOF0 (baseline DCT) frame header.
pub fn write_sof0<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, width: u16, height: u16, channels: u8
) -> Result<(), ZByteIoError> {
    let grayscale = channels == 1;
    let length: u16 = if grayscale { 11 } else { 17 };

    writer.write_raw_bytes(&[0xFF, SOF0])?;
    writer.write_raw_bytes(&length.to_be_bytes())?;
    writer.write_raw_bytes(&[8])?; // P: sample precision
    writer.write_raw_bytes(&height.to_be_bytes())?;
    writer.write_raw_bytes(&width.to_be_bytes())?;
    writer.write_raw_bytes(&[channels])?;

    let components: &[Channel] = if grayscale {
        &[Channel::Luma]
    } else {
        &[Channel::Luma, Channel::Cb, Channel::Cr]
    };
    for (i, &component) in components.iter().enumerate() {
        writer.write_raw_bytes(&[(i + 1) as u8])?;
        writer.write_raw_bytes(&[component.sampling_factor(grayscale)])?;
        writer.write_raw_bytes(&[component.quant_table_id() as u8])?;
    }
    Ok(())
}

/// One DHT segment carrying one or more tables. Each entry is
/// `(class_and_id, bits, huffval)` where `class_and_id = Tc<<4 | Th`.
pub fn write_dht<T: ZByteWriterTrait>(
    writer: &mut BitWriter<T>, entries: &[(u8, &[u8; 16], &[u8])]
) -> Result<(), ZByteIoError> {
    let payload_len: usize = entries.iter().map(|(_, _, v)| 1 + 16 + v.len()).sum();
    let length = (2 + payload_len) as u16;

    writer.write_raw_bytes(&[0xFF, DHT])?;
    writer.write_raw_bytes(&length.to_be_bytes())?;
    for &(class_and_id, bits, huffval) in entries {
        writer.write_raw_bytes(&[class_and_id])?;
        writer.write_raw_bytes(bits)?;
        writer.write_raw_bytes(huffval)?;
    }
    Ok(())
}

/// A vendor comment identifying the encoder, matching the banner the
/// reference CLI prints at startup.
pub fn write_com<T: ZByteWriterTrait>(writer: &mut BitWriter<T>) -> Result<(), ZByteIoError> {
    let text = concat!("FJPEG ", env!("CARGO_PKG_VERSION"));
    let length = (text.len() + 2) as u16;
    writer.write_raw_bytes(&[0xFF, COM])?;
    writer.write_raw_bytes(&length.to_be_bytes())?;
    writer.write_raw_bytes(text.as_bytes())
}

/// SOS (start of scan) header. Does not write the entropy-coded data
/// itself; callers flip the writer into stuffing mode afterward and
/// drive the entropy coder.
pub fn write_sos<T: ZByteWriterTrait>(writer: &mut BitWriter<T>, channels: u8) -> Result<(), ZByteIoError> {
    let grayscale = channels == 1;
    let length: u16 = if grayscale { 8 } else { 12 };

    writer.write_raw_bytes(&[0xFF, SOS])?;
    writer.write_raw_bytes(&length.to_be_bytes())?;
    writer.write_raw_bytes(&[channels])?;

    let components: &[Channel] = if grayscale {
        &[Channel::Luma]
    } else {
        &[Channel::Luma, Channel::Cb, Channel::Cr]
    };
    for (i, &component) in components.iter().enumerate() {
        writer.write_raw_bytes(&[(i + 1) as u8])?;
        let td_ta = if component.is_luma() { 0x00 } else { 0x11 };
        writer.write_raw_bytes(&[td_ta])?;
    }
    writer.write_raw_bytes(&[0, 63, 0])?; // Ss=0, Se=63, Ah=0|Al=0
    Ok(())
}

/// Build the two DHT entries needed for grayscale: luma DC and luma AC.
pub fn luma_dht_entries<'a>(
    dc_bits: &'a [u8; 16], dc_vals: &'a [u8], ac_bits: &'a [u8; 16], ac_vals: &'a [u8]
) -> [(u8, &'a [u8; 16], &'a [u8]); 2] {
    [(0x00, dc_bits, dc_vals), (0x10, ac_bits, ac_vals)]
}

/// Build the two DHT entries needed for chroma: chroma DC (Th=1) and
/// chroma AC (Th=1).
pub fn chroma_dht_entries<'a>(
    dc_bits: &'a [u8; 16], dc_vals: &'a [u8], ac_bits: &'a [u8; 16], ac_vals: &'a [u8]
) -> [(u8, &'a [u8; 16], &'a [u8]); 2] {
    [(0x01, dc_bits, dc_vals), (0x11, ac_bits, ac_vals)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soi_and_eoi_bytes() {
        let mut writer = BitWriter::new(Vec::new());
        write_soi(&mut writer).unwrap();
        write_eoi(&mut writer).unwrap();
        assert_eq!(writer.into_inner(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[test]
    fn app0_matches_s5_prefix() {
        let mut writer = BitWriter::new(Vec::new());
        write_app0(&mut writer).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(
            &bytes[..14],
            &[0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x02, 0x00, 0x00, 0x01]
        );
        assert_eq!(bytes.len(), 18); // 2 marker bytes + 16-byte length-inclusive payload
    }

    #[test]
    fn dqt_is_67_bytes_of_segment_plus_marker() {
        let mut writer = BitWriter::new(Vec::new());
        let table = [1u16; 64];
        write_dqt(&mut writer, &table, 0).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), 2 + 67);
        assert_eq!(&bytes[0..2], &[0xFF, 0xDB]);
        assert_eq!(&bytes[4..5], &[0x00]); // Pq=0, Tq=0
    }

    #[test]
    fn sof0_length_depends_on_channel_count() {
        let mut writer = BitWriter::new(Vec::new());
        write_sof0(&mut writer, 16, 16, 1).unwrap();
        let gray = writer.into_inner();
        assert_eq!(u16::from_be_bytes([gray[2], gray[3]]), 11);

        let mut writer = BitWriter::new(Vec::new());
        write_sof0(&mut writer, 16, 16, 3).unwrap();
        let color = writer.into_inner();
        assert_eq!(u16::from_be_bytes([color[2], color[3]]), 17);
    }

    #[test]
    fn dht_class_and_id_nibbles_follow_t81() {
        // Tc in the high nibble, Th in the low nibble -- not swapped.
        let dc_bits = [0u8; 16];
        let ac_bits = [0u8; 16];
        let entries = chroma_dht_entries(&dc_bits, &[], &ac_bits, &[]);
        assert_eq!(entries[0].0, 0x01); // Tc=0 (dc), Th=1
        assert_eq!(entries[1].0, 0x11); // Tc=1 (ac), Th=1
    }

    #[test]
    fn sos_component_selectors_match_channel_count() {
        let mut writer = BitWriter::new(Vec::new());
        write_sos(&mut writer, 1).unwrap();
        let gray = writer.into_inner();
        assert_eq!(u16::from_be_bytes([gray[2], gray[3]]), 8);

        let mut writer = BitWriter::new(Vec::new());
        write_sos(&mut writer, 3).unwrap();
        let color = writer.into_inner();
        assert_eq!(u16::from_be_bytes([color[2], color[3]]), 12);
    }
}
