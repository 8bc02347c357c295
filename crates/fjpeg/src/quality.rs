//! Quality-factor scaling of the default quantization tables.

use crate::errors::EncodeErrors;

/// Scale a default quantization table by a quality factor in `1..=100`.
///
/// `q' = clamp((q_default * (100 - quality) + 25) / 50, 1, 255)`.
///
/// Quality 50 reproduces `default` unscaled; quality 100 collapses every
/// entry to 1; quality 1 yields the coarsest table. This is a bespoke
/// formula and deliberately does not match the IJG `5000/quality` /
/// `200 - 2*quality` scaling used by some other encoders, except at the
/// quality=50 crossover.
pub fn scale_quant_table(default: &[u16; 64], quality: u8) -> Result<[u16; 64], EncodeErrors> {
    if quality < 1 || quality > 100 {
        warn!("rejecting quality {quality}, expected a value in 1..=100");
        return Err(EncodeErrors::InvalidQuality(quality));
    }

    let mut scaled = [0u16; 64];
    for (dst, &base) in scaled.iter_mut().zip(default.iter()) {
        let numerator = base as i64 * (100 - quality as i64) + 25;
        let value = numerator / 50;
        *dst = value.clamp(1, 255) as u16;
    }
    Ok(scaled)
}
