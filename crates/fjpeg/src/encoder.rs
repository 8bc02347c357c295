/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fjpeg_core::bytestream::ZByteWriterTrait;
use fjpeg_core::colorspace::ColorSpace;
use fjpeg_core::options::EncoderOptions;

use crate::bitwriter::BitWriter;
use crate::components::Channel;
use crate::container;
use crate::entropy::{encode_block, ChannelTables};
use crate::errors::EncodeErrors;
use crate::huffman::HuffmanTable;
use crate::quality::scale_quant_table;
use crate::scanner::{mcu_order, validate_dimensions, Plane};
use crate::tables::{
    CHROMA_AC_SPEC, CHROMA_DC_SPEC, DEFAULT_CHROMA_QUANT_TABLE, DEFAULT_LUMA_QUANT_TABLE,
    LUMA_AC_SPEC, LUMA_DC_SPEC
};
use crate::transform::{forward_dct, quantize_and_zigzag, CosineTable};

/// A baseline JPEG encoder.
///
/// Owns the scaled quantization tables, the four built Huffman tables,
/// and the source sample planes for one encode. Constructed once per
/// image; there is no support for reusing a context across encodes with
/// different dimensions.
///
/// # Example
///
/// ```
/// use fjpeg_core::colorspace::ColorSpace;
/// use fjpeg_core::options::EncoderOptions;
/// use fjpeg::JpegEncoder;
///
/// let options = EncoderOptions::new(ColorSpace::Luma).with_dimensions(16, 16);
/// let pixels = vec![128u8; 16 * 16];
/// let mut encoder = JpegEncoder::new(&pixels, options).unwrap();
/// let mut sink = Vec::new();
/// encoder.encode(&mut sink).unwrap();
/// assert_eq!(&sink[0..2], &[0xFF, 0xD8]);
/// ```
pub struct JpegEncoder<'a> {
    pixel_data: &'a [u8],
    options:    EncoderOptions,

    luma_quant:   [u16; 64],
    chroma_quant: [u16; 64],

    luma_dc:   HuffmanTable,
    luma_ac:   HuffmanTable,
    chroma_dc: HuffmanTable,
    chroma_ac: HuffmanTable,

    /// Rounded, zig-zag-ordered coefficients in MCU order, populated by
    /// [`transform`](Self::transform) and consumed by
    /// [`encode`](Self::encode).
    coeffs: Option<Vec<[i32; 64]>>
}

impl<'a> JpegEncoder<'a> {
    /// Create a new encoder for `data`, validating `options` and building
    /// the scaled quant tables and canonical Huffman tables up front.
    ///
    /// `data` must be exactly `options.expected_input_len()` bytes: a Y
    /// plane, followed (for `ColorSpace::YCbCr420`) by Cb and Cr planes at
    /// half resolution.
    pub fn new(data: &'a [u8], options: EncoderOptions) -> Result<Self, EncodeErrors> {
        if options.quality < 1 || options.quality > 100 {
            warn!("rejecting quality {}, expected a value in 1..=100", options.quality);
            return Err(EncodeErrors::InvalidQuality(options.quality));
        }
        validate_dimensions(options.width, options.height, options.colorspace.mcu_size())?;

        let expected = options.expected_input_len();
        if data.len() != expected {
            warn!("rejecting input: expected {expected} bytes but found {}", data.len());
            return Err(EncodeErrors::InputLengthMismatch(expected, data.len()));
        }

        debug!(
            "building encoder context: {}x{} colorspace={:?} quality={}",
            options.width, options.height, options.colorspace, options.quality
        );

        let luma_quant = scale_quant_table(&DEFAULT_LUMA_QUANT_TABLE, options.quality)?;
        let chroma_quant = scale_quant_table(&DEFAULT_CHROMA_QUANT_TABLE, options.quality)?;

        let luma_dc = HuffmanTable::build(&LUMA_DC_SPEC)?;
        let luma_ac = HuffmanTable::build(&LUMA_AC_SPEC)?;
        let chroma_dc = HuffmanTable::build(&CHROMA_DC_SPEC)?;
        let chroma_ac = HuffmanTable::build(&CHROMA_AC_SPEC)?;

        Ok(JpegEncoder {
            pixel_data: data,
            options,
            luma_quant,
            chroma_quant,
            luma_dc,
            luma_ac,
            chroma_dc,
            chroma_ac,
            coeffs: None
        })
    }

    fn planes(&self) -> (Plane, Option<Plane>, Option<Plane>) {
        let width = self.options.width;
        let height = self.options.height;
        let luma_len = width * height;

        let luma = Plane::new(width, height, self.pixel_data[..luma_len].to_vec());

        if self.options.colorspace == ColorSpace::Luma {
            return (luma, None, None);
        }

        let cw = width / 2;
        let ch = height / 2;
        let chroma_len = cw * ch;
        let cb = Plane::new(cw, ch, self.pixel_data[luma_len..luma_len + chroma_len].to_vec());
        let cr = Plane::new(
            cw,
            ch,
            self.pixel_data[luma_len + chroma_len..luma_len + 2 * chroma_len].to_vec()
        );
        (luma, Some(cb), Some(cr))
    }

    fn quant_table(&self, channel: Channel) -> &[u16; 64] {
        match channel.quant_table_id() {
            0 => &self.luma_quant,
            _ => &self.chroma_quant
        }
    }

    fn channel_tables(&self, channel: Channel) -> ChannelTables<'_> {
        if channel.is_luma() {
            ChannelTables { dc: &self.luma_dc, ac: &self.luma_ac }
        } else {
            ChannelTables { dc: &self.chroma_dc, ac: &self.chroma_ac }
        }
    }

    /// Run the forward DCT, quantization, and zig-zag reorder over every
    /// block of every plane, in MCU order, caching the rounded
    /// coefficients for [`encode`](Self::encode). A no-op if already run.
    ///
    /// Exposed separately (rather than folded into `encode`) so a caller
    /// — the CLI in particular — can time the transform stage apart from
    /// header emission and entropy coding; `encode` calls this itself if
    /// it hasn't been run yet, so calling it explicitly first is optional.
    pub fn transform(&mut self) -> Result<(), EncodeErrors> {
        if self.coeffs.is_some() {
            return Ok(());
        }

        let grayscale = self.options.colorspace == ColorSpace::Luma;
        let (luma, cb, cr) = self.planes();
        let cos = CosineTable::new();
        let order = mcu_order(self.options.width, self.options.height, grayscale);

        trace!("transforming {} blocks", order.len());
        let mut coeffs = Vec::with_capacity(order.len());
        for block_ref in &order {
            let plane = match block_ref.channel {
                Channel::Luma => &luma,
                Channel::Cb => cb.as_ref().expect("color image has a Cb plane"),
                Channel::Cr => cr.as_ref().expect("color image has a Cr plane")
            };
            let samples = plane.block_at(block_ref.bx, block_ref.by);
            let dct = forward_dct(&samples, &cos);
            let quant_table = self.quant_table(block_ref.channel);
            let zigzag = quantize_and_zigzag(&dct, quant_table);

            let mut rounded = [0i32; 64];
            for (dst, &src) in rounded.iter_mut().zip(zigzag.iter()) {
                *dst = round_half_up(src);
            }
            coeffs.push(rounded);
        }

        self.coeffs = Some(coeffs);
        Ok(())
    }

    /// Encode the image into `sink`, returning the number of bytes
    /// written. Calls [`transform`](Self::transform) first if it hasn't
    /// run yet. Any error aborts the encode; the caller should treat
    /// whatever was partially written to `sink` as invalid.
    pub fn encode<T: ZByteWriterTrait>(&mut self, sink: T) -> Result<usize, EncodeErrors> {
        self.transform()?;

        let grayscale = self.options.colorspace == ColorSpace::Luma;
        let channels: u8 = if grayscale { 1 } else { 3 };

        let mut writer = BitWriter::new(sink);
        // A quantized, Huffman-coded image rarely exceeds a quarter of its
        // raw planar size; growable sinks can reserve that much up front.
        writer.reserve(self.pixel_data.len() / 4)?;

        container::write_soi(&mut writer)?;
        container::write_app0(&mut writer)?;
        container::write_dqt(&mut writer, &self.luma_quant, 0)?;
        if !grayscale {
            container::write_dqt(&mut writer, &self.chroma_quant, 1)?;
        }
        container::write_sof0(&mut writer, self.options.width as u16, self.options.height as u16, channels)?;

        let luma_dht = container::luma_dht_entries(
            &LUMA_DC_SPEC.bits,
            LUMA_DC_SPEC.huffval,
            &LUMA_AC_SPEC.bits,
            LUMA_AC_SPEC.huffval
        );
        container::write_dht(&mut writer, &luma_dht)?;
        if !grayscale {
            let chroma_dht = container::chroma_dht_entries(
                &CHROMA_DC_SPEC.bits,
                CHROMA_DC_SPEC.huffval,
                &CHROMA_AC_SPEC.bits,
                CHROMA_AC_SPEC.huffval
            );
            container::write_dht(&mut writer, &chroma_dht)?;
        }
        container::write_com(&mut writer)?;
        container::write_sos(&mut writer, channels)?;

        let order = mcu_order(self.options.width, self.options.height, grayscale);
        let coeffs = self.coeffs.as_ref().expect("transform() populates coeffs before encode uses them");

        let mut last_dc = [0i32; 3]; // indexed by Channel as 0=Luma,1=Cb,2=Cr

        writer.set_stuffing(true);
        trace!("entropy coding {} blocks", order.len());
        for (block_ref, rounded) in order.iter().zip(coeffs.iter()) {
            let idx = channel_index(block_ref.channel);
            let tables = self.channel_tables(block_ref.channel);
            last_dc[idx] = encode_block(&mut writer, rounded, last_dc[idx], &tables)?;
        }
        writer.flush()?;
        writer.set_stuffing(false);

        container::write_eoi(&mut writer)?;
        writer.flush_io()?;

        Ok(writer.bytes_written())
    }
}

fn channel_index(channel: Channel) -> usize {
    match channel {
        Channel::Luma => 0,
        Channel::Cb => 1,
        Channel::Cr => 2
    }
}

/// Half-up rounding matching the entropy stage's rounding semantics:
/// `trunc(x + 0.5)`, i.e. truncation toward zero, not toward -infinity.
/// `floor` and `trunc` only agree for `x >= -0.5`; using `floor` here
/// would shift every negative, non-half-integer coefficient by one.
fn round_half_up(x: f32) -> i32 {
    (x + 0.5).trunc() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_options(size: usize) -> EncoderOptions {
        EncoderOptions::new(ColorSpace::Luma).with_dimensions(size, size)
    }

    // round_half_up must truncate toward zero on `x + 0.5`, matching the
    // original's `(int)(block[i] + 0.5f)` cast, not floor toward -infinity.
    #[test]
    fn round_half_up_matches_trunc_for_negative_values() {
        assert_eq!(round_half_up(-1.3), 0);
        assert_eq!(round_half_up(-2.3), -1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.6), 0);
        assert_eq!(round_half_up(-1.5), -1);
    }

    #[test]
    fn round_half_up_matches_for_positive_values() {
        assert_eq!(round_half_up(1.3), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(0.4), 0);
    }

    // S5: end-to-end grayscale encode of a flat 16x16 image.
    #[test]
    fn s5_end_to_end_grayscale() {
        let pixels = vec![128u8; 16 * 16];
        let mut encoder = JpegEncoder::new(&pixels, gray_options(16)).unwrap();
        let mut sink = Vec::new();
        encoder.encode(&mut sink).unwrap();

        assert_eq!(&sink[0..2], &[0xFF, 0xD8]);
        assert_eq!(&sink[sink.len() - 2..], &[0xFF, 0xD9]);

        let dqt_count = count_marker(&sink, 0xDB);
        assert_eq!(dqt_count, 1);
        let sof_count = count_marker(&sink, 0xC0);
        assert_eq!(sof_count, 1);
        let dht_count = count_marker(&sink, 0xC4);
        assert_eq!(dht_count, 1);
        let sos_count = count_marker(&sink, 0xDA);
        assert_eq!(sos_count, 1);
    }

    // Invariant 8: between SOS payload end and EOI, no bare 0xFF.
    #[test]
    fn invariant_8_no_bare_ff_in_entropy_segment() {
        let pixels: Vec<u8> = (0..256).map(|i| (i % 256) as u8).collect();
        let mut encoder = JpegEncoder::new(&pixels, gray_options(16)).unwrap();
        let mut sink = Vec::new();
        encoder.encode(&mut sink).unwrap();

        // find end of SOS header (find 0xFF 0xDA, then skip its length-prefixed payload)
        let sos_pos = find_marker(&sink, 0xDA).unwrap();
        let header_len = u16::from_be_bytes([sink[sos_pos + 2], sink[sos_pos + 3]]) as usize;
        let ecs_start = sos_pos + 2 + header_len;
        let ecs_end = sink.len() - 2; // exclude EOI marker

        let mut i = ecs_start;
        while i < ecs_end {
            if sink[i] == 0xFF {
                assert_eq!(sink[i + 1], 0x00, "bare 0xFF found at {i}");
                i += 2;
            } else {
                i += 1;
            }
        }
    }

    #[test]
    fn rejects_quality_out_of_range() {
        let pixels = vec![0u8; 64];
        let opts = EncoderOptions::new(ColorSpace::Luma).with_dimensions(8, 8).with_quality(0);
        assert!(JpegEncoder::new(&pixels, opts).is_err());
    }

    #[test]
    fn rejects_non_multiple_dimensions() {
        let pixels = vec![0u8; 10 * 10];
        let opts = EncoderOptions::new(ColorSpace::Luma).with_dimensions(10, 10);
        assert!(JpegEncoder::new(&pixels, opts).is_err());
    }

    #[test]
    fn rejects_input_length_mismatch() {
        let pixels = vec![0u8; 10];
        let opts = EncoderOptions::new(ColorSpace::Luma).with_dimensions(8, 8);
        assert!(JpegEncoder::new(&pixels, opts).is_err());
    }

    #[test]
    fn calling_transform_before_encode_gives_the_same_output() {
        let pixels = vec![128u8; 16 * 16];

        let mut staged = JpegEncoder::new(&pixels, gray_options(16)).unwrap();
        staged.transform().unwrap();
        let mut staged_out = Vec::new();
        staged.encode(&mut staged_out).unwrap();

        let mut direct = JpegEncoder::new(&pixels, gray_options(16)).unwrap();
        let mut direct_out = Vec::new();
        direct.encode(&mut direct_out).unwrap();

        assert_eq!(staged_out, direct_out);
    }

    #[test]
    fn color_encode_produces_two_dqt_and_dht_segments() {
        let width = 16;
        let height = 16;
        let luma = vec![128u8; width * height];
        let chroma = vec![128u8; (width / 2) * (height / 2)];
        let mut pixels = luma;
        pixels.extend(chroma.iter());
        pixels.extend(chroma.iter());

        let opts = EncoderOptions::new(ColorSpace::YCbCr420).with_dimensions(width, height);
        let mut encoder = JpegEncoder::new(&pixels, opts).unwrap();
        let mut sink = Vec::new();
        encoder.encode(&mut sink).unwrap();

        assert_eq!(count_marker(&sink, 0xDB), 2);
        assert_eq!(count_marker(&sink, 0xC4), 2);
    }

    fn find_marker(data: &[u8], marker: u8) -> Option<usize> {
        let mut i = 0;
        while i + 1 < data.len() {
            if data[i] == 0xFF && data[i + 1] == marker {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    fn count_marker(data: &[u8], marker: u8) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i + 1 < data.len() {
            if data[i] == 0xFF && data[i + 1] == marker {
                count += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        count
    }
}
