use crate::foundation::{
    error::{ShotframeError, ShotframeResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with `src` pre-scaled by `coverage / 255`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }
    let cov = u16::from(coverage);
    let sa = mul_div255_u8(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), cov);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a constant premultiplied `tint` through an 8-bit alpha plane.
pub fn tint_over_in_place(dst: &mut [u8], alpha: &[u8], tint: PremulRgba8) -> ShotframeResult<()> {
    if dst.len() != alpha.len() * 4 {
        return Err(ShotframeError::render(
            "tint_over_in_place expects one alpha byte per rgba8 pixel",
        ));
    }
    if tint[3] == 0 {
        return Ok(());
    }
    for (d, &a) in dst.chunks_exact_mut(4).zip(alpha) {
        let out = over([d[0], d[1], d[2], d[3]], tint, a);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Geometry for drawing a premultiplied image into a destination rectangle.
#[derive(Clone, Copy, Debug)]
pub struct ImageDraw<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
    /// Destination rectangle in output pixels `(x0, y0, x1, y1)`.
    pub dest: (f64, f64, f64, f64),
}

/// Bilinearly resample `img` into `dst`, weighting every pixel by `coverage`.
///
/// Only pixels inside the destination rectangle (and the surface) are visited.
pub fn draw_image_masked(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    coverage: &[u8],
    img: ImageDraw<'_>,
) -> ShotframeResult<()> {
    let n = (dst_width as usize) * (dst_height as usize);
    if dst.len() != n * 4 || coverage.len() != n {
        return Err(ShotframeError::render(
            "draw_image_masked expects dst/coverage sized to the surface",
        ));
    }
    if img.pixels.len() != (img.width as usize) * (img.height as usize) * 4 {
        return Err(ShotframeError::render(
            "draw_image_masked expects image bytes matching width*height*4",
        ));
    }
    let (x0, y0, x1, y1) = img.dest;
    let (dw, dh) = (x1 - x0, y1 - y0);
    if img.width == 0 || img.height == 0 || dw <= 0.0 || dh <= 0.0 {
        return Ok(());
    }

    let sx = f64::from(img.width) / dw;
    let sy = f64::from(img.height) / dh;
    let px_lo = x0.floor().max(0.0) as u32;
    let px_hi = (x1.ceil().min(f64::from(dst_width))).max(0.0) as u32;
    let py_lo = y0.floor().max(0.0) as u32;
    let py_hi = (y1.ceil().min(f64::from(dst_height))).max(0.0) as u32;

    for py in py_lo..py_hi {
        let v = (f64::from(py) + 0.5 - y0) * sy - 0.5;
        for px in px_lo..px_hi {
            let idx = (py as usize) * (dst_width as usize) + px as usize;
            let cov = coverage[idx];
            if cov == 0 {
                continue;
            }
            let u = (f64::from(px) + 0.5 - x0) * sx - 0.5;
            let src = sample_bilinear(img.pixels, img.width, img.height, u, v);
            let o = idx * 4;
            let out = over([dst[o], dst[o + 1], dst[o + 2], dst[o + 3]], src, cov);
            dst[o..o + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

fn sample_bilinear(src: &[u8], width: u32, height: u32, u: f64, v: f64) -> PremulRgba8 {
    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let (x0, y0) = (u.floor(), v.floor());
    let (fx, fy) = (u - x0, v - y0);
    let (x0, y0) = (x0 as u32, y0 as u32);
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let px = |x: u32, y: u32| -> &[u8] {
        let i = ((y as usize) * (width as usize) + x as usize) * 4;
        &src[i..i + 4]
    };
    let (p00, p10, p01, p11) = (px(x0, y0), px(x1, y0), px(x0, y1), px(x1, y1));

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) + (f64::from(p10[c]) - f64::from(p00[c])) * fx;
        let bot = f64::from(p01[c]) + (f64::from(p11[c]) - f64::from(p01[c])) * fx;
        out[c] = (top + (bot - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    // Rounding can push a color channel above alpha; keep the pixel valid premultiplied.
    let a = out[3];
    for c in &mut out[..3] {
        *c = (*c).min(a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
