//! Frame and depth storage owned by the software back-end.

use crate::renderer::Rgba;

/// `width*height` pixels stored *column-first*.
///
/// Row `c` of the buffer (`pixels[c*width .. (c+1)*width]`) is screen
/// column `c`, scanned from the ceiling side (index 0) to the floor side.
/// Presenting rotates it: display pixel `(x = c, y = i)` is
/// `pixels[c*width + i]`, so the display surface is `height × width`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Pixels per column (length of one stripe).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of columns, i.e. rays cast per frame.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(display_width, display_height)` after rotation.
    #[inline]
    pub fn display_size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// One contiguous column stripe.
    #[inline(always)]
    pub fn column(&self, c: usize) -> &[Rgba] {
        &self.pixels[c * self.width..(c + 1) * self.width]
    }

    #[inline(always)]
    pub fn column_mut(&mut self, c: usize) -> &mut [Rgba] {
        &mut self.pixels[c * self.width..(c + 1) * self.width]
    }

    /// Rotate into a row-major `display_size()` surface (minifb layout).
    pub fn transpose_into(&self, dst: &mut [u32]) {
        transpose(&self.pixels, self.width, self.height, dst);
    }

    /// Raw RGBA8 bytes in display orientation.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rotated = vec![0u32; self.pixels.len()];
        self.transpose_into(&mut rotated);
        rotated
            .into_iter()
            .flat_map(|px| {
                let [a, r, g, b] = px.to_be_bytes();
                [r, g, b, a]
            })
            .collect()
    }
}

/// Rotate `columns` stripes of `column_len` pixels into a row-major surface
/// `columns` wide. Takes the arguments [`Renderer::end_frame`] submits.
///
/// [`Renderer::end_frame`]: crate::renderer::Renderer::end_frame
pub fn transpose(src: &[Rgba], column_len: usize, columns: usize, dst: &mut [u32]) {
    debug_assert_eq!(src.len(), column_len * columns);
    debug_assert_eq!(dst.len(), src.len());
    for (c, stripe) in src.chunks_exact(column_len).enumerate() {
        for (i, &px) in stripe.iter().enumerate() {
            dst[i * columns + c] = px;
        }
    }
}

/// Nearest opaque wall or door distance, one entry per column.
#[derive(Clone, Debug, Default)]
pub struct DepthBuffer {
    dist: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(columns: usize) -> Self {
        Self {
            dist: vec![f32::INFINITY; columns],
        }
    }

    pub fn reset(&mut self) {
        self.dist.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn get(&self, c: usize) -> f32 {
        self.dist[c]
    }

    #[inline(always)]
    pub fn set(&mut self, c: usize, d: f32) {
        self.dist[c] = d;
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.dist
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_contiguous_rows() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.column_mut(1).fill(7);
        assert_eq!(&fb.pixels()[4..8], &[7, 7, 7, 7]);
        assert_eq!(fb.column(0), &[0, 0, 0, 0]);
        assert_eq!(fb.display_size(), (3, 4));
    }

    #[test]
    fn transpose_puts_columns_across_the_display() {
        let mut fb = FrameBuffer::new(2, 3);
        for c in 0..3 {
            for (i, px) in fb.column_mut(c).iter_mut().enumerate() {
                *px = (c * 10 + i) as u32;
            }
        }
        let mut out = vec![0; 6];
        fb.transpose_into(&mut out);
        // display is 3 wide, 2 tall
        assert_eq!(out, vec![0, 10, 20, 1, 11, 21]);
    }

    #[test]
    fn rgba8_export_reorders_channels() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.column_mut(0)[0] = 0x80_112233;
        assert_eq!(fb.to_rgba8(), vec![0x11, 0x22, 0x33, 0x80]);
    }

    #[test]
    fn depth_reset_clears_to_infinity() {
        let mut db = DepthBuffer::new(2);
        db.set(1, 3.5);
        assert_eq!(db.as_slice(), &[f32::INFINITY, 3.5]);
        db.reset();
        assert!(db.as_slice().iter().all(|d| d.is_infinite()));
    }
}
