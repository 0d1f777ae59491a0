//! Grayscale raster helpers shared by the detector and encoder.

/// Letterbox geometry: how a frame was scaled and padded to fit the
/// detector input, used to map detections back to frame coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// Fit a `src_w` × `src_h` frame inside a `dst_w` × `dst_h` input,
    /// preserving aspect ratio and centering.
    pub fn fit(src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> Self {
        let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
        let new_w = (src_w as f32 * scale).round();
        let new_h = (src_h as f32 * scale).round();
        Self {
            scale,
            pad_x: (dst_w as f32 - new_w) / 2.0,
            pad_y: (dst_h as f32 - new_h) / 2.0,
        }
    }

    /// Map a point from letterboxed space back to frame space.
    pub fn unmap(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Resize a grayscale raster with bilinear interpolation.
pub fn resize_bilinear(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> Vec<u8> {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return vec![0; dst_w * dst_h];
    }

    let scale_x = src_w as f32 / dst_w as f32;
    let scale_y = src_h as f32 / dst_h as f32;
    let mut dst = vec![0u8; dst_w * dst_h];

    for y in 0..dst_h {
        let src_y = (y as f32 + 0.5) * scale_y - 0.5;
        let y0 = (src_y.floor() as i32).clamp(0, src_h as i32 - 1) as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = (src_y - src_y.floor()).clamp(0.0, 1.0);

        for x in 0..dst_w {
            let src_x = (x as f32 + 0.5) * scale_x - 0.5;
            let x0 = (src_x.floor() as i32).clamp(0, src_w as i32 - 1) as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = (src_x - src_x.floor()).clamp(0.0, 1.0);

            let tl = src[y0 * src_w + x0] as f32;
            let tr = src[y0 * src_w + x1] as f32;
            let bl = src[y1 * src_w + x0] as f32;
            let br = src[y1 * src_w + x1] as f32;

            let val = tl * (1.0 - fx) * (1.0 - fy)
                + tr * fx * (1.0 - fy)
                + bl * (1.0 - fx) * fy
                + br * fx * fy;

            dst[y * dst_w + x] = val.round().clamp(0.0, 255.0) as u8;
        }
    }

    dst
}

/// Crop a rectangle out of a grayscale frame, clamped to the frame
/// bounds. Returns the pixels and the clamped width/height.
pub fn crop_clamped(
    frame: &[u8],
    frame_w: u32,
    frame_h: u32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) -> (Vec<u8>, u32, u32) {
    let fw = frame_w as i64;
    let fh = frame_h as i64;

    let x0 = (x.floor() as i64).clamp(0, fw);
    let y0 = (y.floor() as i64).clamp(0, fh);
    let x1 = ((x + w).ceil() as i64).clamp(x0, fw);
    let y1 = ((y + h).ceil() as i64).clamp(y0, fh);

    let cw = (x1 - x0) as u32;
    let ch = (y1 - y0) as u32;

    let mut out = Vec::with_capacity((cw * ch) as usize);
    for row in y0..y1 {
        let start = (row * fw + x0) as usize;
        out.extend_from_slice(&frame[start..start + cw as usize]);
    }

    (out, cw, ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_roundtrip() {
        let lb = Letterbox::fit(320, 240, 640, 640);
        let (x, y) = (100.0f32, 50.0f32);
        let lx = x * lb.scale + lb.pad_x;
        let ly = y * lb.scale + lb.pad_y;
        let (rx, ry) = lb.unmap(lx, ly);
        assert!((rx - x).abs() < 0.1, "x: {rx} vs {x}");
        assert!((ry - y).abs() < 0.1, "y: {ry} vs {y}");
    }

    #[test]
    fn test_letterbox_wide_frame_pads_vertically() {
        let lb = Letterbox::fit(640, 480, 640, 640);
        assert_eq!(lb.pad_x, 0.0);
        assert!(lb.pad_y > 0.0);
    }

    #[test]
    fn test_resize_uniform_stays_uniform() {
        let src = vec![128u8; 100 * 100];
        let dst = resize_bilinear(&src, 100, 100, 200, 200);
        assert!(dst.iter().all(|&p| p == 128));
    }

    #[test]
    fn test_resize_identity() {
        let src: Vec<u8> = (0..16).collect();
        let dst = resize_bilinear(&src, 4, 4, 4, 4);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_crop_interior() {
        // 4x4 frame with row-major values 0..16
        let frame: Vec<u8> = (0..16).collect();
        let (crop, w, h) = crop_clamped(&frame, 4, 4, 1.0, 1.0, 2.0, 2.0);
        assert_eq!((w, h), (2, 2));
        assert_eq!(crop, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_clamps_to_frame_bounds() {
        let frame: Vec<u8> = (0..16).collect();
        let (crop, w, h) = crop_clamped(&frame, 4, 4, 2.0, 2.0, 10.0, 10.0);
        assert_eq!((w, h), (2, 2));
        assert_eq!(crop, vec![10, 11, 14, 15]);
    }

    #[test]
    fn test_crop_negative_origin_clamped() {
        let frame: Vec<u8> = (0..16).collect();
        let (crop, w, h) = crop_clamped(&frame, 4, 4, -2.0, -2.0, 4.0, 4.0);
        assert_eq!((w, h), (2, 2));
        assert_eq!(crop, vec![0, 1, 4, 5]);
    }
}
