//! Full-screen bitmaps for the alarm animation.
//!
//! Layout (1024 bytes, 128×64, 1 bit per pixel):
//! ```text
//! Row-major, 16 bytes per pixel row, top row first.
//! Within a byte the MSB is the leftmost pixel.
//! ```
//! This matches both the ST7920 GDRAM order and `embedded_graphics`
//! `ImageRaw<BinaryColor>`.
//!
//! Each frame is a 2-pixel-thick rectangle pulse that grows one ring
//! per frame from the centre towards the screen edge.

use crate::config::{GLCD_HEIGHT, GLCD_WIDTH};

/// Bytes in one pixel row.
pub const BITMAP_STRIDE: usize = GLCD_WIDTH / 8;

/// Bytes in one full-screen bitmap.
pub const BITMAP_SIZE: usize = BITMAP_STRIDE * GLCD_HEIGHT;

/// A full-screen monochrome image.
pub type Bitmap = [u8; BITMAP_SIZE];

/// Inset of ring `n` from the screen edge (ring 0 is innermost).
const RING_INSETS: [usize; 4] = [24, 16, 8, 0];

const RING_THICKNESS: usize = 2;

/// Blank screen.
pub const CLEAR_SCREEN: Bitmap = [0; BITMAP_SIZE];

/// Alarm animation, drawn in order and repeated.
pub const FIRE_ALARM_FRAMES: [Bitmap; 4] = [pulse(1), pulse(2), pulse(3), pulse(4)];

const fn byte_index(x: usize, y: usize) -> usize {
    y * BITMAP_STRIDE + x / 8
}

const fn bit_mask(x: usize) -> u8 {
    0x80 >> (x % 8)
}

/// Draw the outline of the rectangle inset `inset` pixels from every edge.
const fn ring(mut bitmap: Bitmap, inset: usize) -> Bitmap {
    let mut t = 0;
    while t < RING_THICKNESS {
        let left = inset + t;
        let right = GLCD_WIDTH - 1 - inset - t;
        let top = inset + t;
        let bottom = GLCD_HEIGHT - 1 - inset - t;

        let mut x = left;
        while x <= right {
            bitmap[byte_index(x, top)] |= bit_mask(x);
            bitmap[byte_index(x, bottom)] |= bit_mask(x);
            x += 1;
        }
        let mut y = top;
        while y <= bottom {
            bitmap[byte_index(left, y)] |= bit_mask(left);
            bitmap[byte_index(right, y)] |= bit_mask(right);
            y += 1;
        }
        t += 1;
    }
    bitmap
}

/// Frame with the innermost `rings` rings drawn.
const fn pulse(rings: usize) -> Bitmap {
    let mut bitmap = CLEAR_SCREEN;
    let mut n = 0;
    while n < rings {
        bitmap = ring(bitmap, RING_INSETS[n]);
        n += 1;
    }
    bitmap
}
