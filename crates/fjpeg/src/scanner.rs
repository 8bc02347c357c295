//! Plane storage and MCU-order block iteration.

use crate::components::Channel;
use crate::errors::EncodeErrors;
use crate::transform::SampleBlock;

/// A single rectangular plane of 8-bit samples.
pub struct Plane {
    pub width:  usize,
    pub height: usize,
    pub data:   Vec<u8>
}

impl Plane {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Plane { width, height, data }
    }

    /// Extract the 8x8 block at tile coordinates `(bx, by)`, row-major.
    ///
    /// Caller guarantees `(bx, by)` falls entirely within the plane; the
    /// context validates dimensions are multiples of 8 at construction.
    pub fn block_at(&self, bx: usize, by: usize) -> SampleBlock {
        let mut block = [0u8; 64];
        for row in 0..8 {
            let src_row = (by * 8 + row) * self.width + bx * 8;
            let dst_row = row * 8;
            block[dst_row..dst_row + 8].copy_from_slice(&self.data[src_row..src_row + 8]);
        }
        block
    }
}

/// One (channel, block-x, block-y) entry in the MCU scan order, where the
/// block coordinates are in units of 8x8 tiles *within that channel's own
/// plane* (chroma tile coordinates are already halved relative to luma).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockRef {
    pub channel: Channel,
    pub bx:      usize,
    pub by:      usize
}

/// Produce the full MCU-ordered sequence of block references for a
/// grayscale or 4:2:0 image.
///
/// For grayscale: raster order over 8x8 blocks, one per MCU.
/// For 4:2:0: 16x16 MCUs over the luma plane; each MCU emits luma blocks
/// `(0,0), (1,0), (0,1), (1,1)` (left-to-right, then top-to-bottom) then
/// one Cb and one Cr block at the spatially aligned chroma tile.
pub fn mcu_order(width: usize, height: usize, grayscale: bool) -> Vec<BlockRef> {
    let mut order = Vec::new();
    if grayscale {
        let blocks_x = width / 8;
        let blocks_y = height / 8;
        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                order.push(BlockRef { channel: Channel::Luma, bx, by });
            }
        }
    } else {
        let mcus_x = width / 16;
        let mcus_y = height / 16;
        for mcu_y in 0..mcus_y {
            for mcu_x in 0..mcus_x {
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    order.push(BlockRef {
                        channel: Channel::Luma,
                        bx:      mcu_x * 2 + dx,
                        by:      mcu_y * 2 + dy
                    });
                }
                order.push(BlockRef { channel: Channel::Cb, bx: mcu_x, by: mcu_y });
                order.push(BlockRef { channel: Channel::Cr, bx: mcu_x, by: mcu_y });
            }
        }
    }
    order
}

/// Validate that `width`/`height` are positive multiples of `mcu_size`.
pub fn validate_dimensions(width: usize, height: usize, mcu_size: usize) -> Result<(), EncodeErrors> {
    if width == 0 || width % mcu_size != 0 {
        warn!("rejecting width {width}, expected a positive multiple of {mcu_size}");
        return Err(EncodeErrors::InvalidDimensions(width, mcu_size));
    }
    if height == 0 || height % mcu_size != 0 {
        warn!("rejecting height {height}, expected a positive multiple of {mcu_size}");
        return Err(EncodeErrors::InvalidDimensions(height, mcu_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_order_is_raster() {
        let order = mcu_order(16, 8, true);
        assert_eq!(order.len(), 2);
        assert_eq!(order[0], BlockRef { channel: Channel::Luma, bx: 0, by: 0 });
        assert_eq!(order[1], BlockRef { channel: Channel::Luma, bx: 1, by: 0 });
    }

    #[test]
    fn color_mcu_emits_four_luma_then_cb_then_cr() {
        let order = mcu_order(16, 16, false);
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], BlockRef { channel: Channel::Luma, bx: 0, by: 0 });
        assert_eq!(order[1], BlockRef { channel: Channel::Luma, bx: 1, by: 0 });
        assert_eq!(order[2], BlockRef { channel: Channel::Luma, bx: 0, by: 1 });
        assert_eq!(order[3], BlockRef { channel: Channel::Luma, bx: 1, by: 1 });
        assert_eq!(order[4], BlockRef { channel: Channel::Cb, bx: 0, by: 0 });
        assert_eq!(order[5], BlockRef { channel: Channel::Cr, bx: 0, by: 0 });
    }

    #[test]
    fn multiple_mcus_are_in_raster_order() {
        let order = mcu_order(32, 16, false);
        // two MCUs side by side, 6 entries each
        assert_eq!(order.len(), 12);
        assert_eq!(order[6].channel, Channel::Luma);
        assert_eq!(order[6].bx, 2);
    }

    #[test]
    fn block_at_extracts_row_major_tile() {
        let mut data = vec![0u8; 16 * 16];
        // mark the second 8x8 tile (bx=1, by=0) with 7s
        for row in 0..8 {
            for col in 0..8 {
                data[row * 16 + (8 + col)] = 7;
            }
        }
        let plane = Plane::new(16, 16, data);
        let block = plane.block_at(1, 0);
        assert!(block.iter().all(|&v| v == 7));
        let other = plane.block_at(0, 0);
        assert!(other.iter().all(|&v| v == 0));
    }

    #[test]
    fn validate_dimensions_rejects_non_multiple() {
        assert!(validate_dimensions(17, 16, 16).is_err());
        assert!(validate_dimensions(0, 16, 16).is_err());
        assert!(validate_dimensions(16, 16, 16).is_ok());
    }
}
