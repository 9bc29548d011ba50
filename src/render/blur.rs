use rayon::prelude::*;

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Separable Gaussian blur of a single 8-bit plane (edge-clamped).
///
/// Rows are processed in parallel on the rayon pool.
pub fn blur_alpha8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ShotframeResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| ShotframeError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ShotframeError::render(
            "blur_alpha8 expects src matching width*height",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Kernel radius and sigma for a CSS-style blur length in output pixels.
pub fn blur_params(blur_px: f64) -> (u32, f32) {
    if !blur_px.is_finite() || blur_px <= 0.0 {
        return (0, 0.0);
    }
    let radius = blur_px.ceil() as u32;
    (radius, (blur_px / 2.0) as f32)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ShotframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ShotframeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ShotframeError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold the quantization remainder into the center tap so weights sum to 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    dst.par_chunks_mut(width as usize)
        .zip(src.par_chunks(width as usize))
        .for_each(|(out_row, row)| {
            for x in 0..w {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    acc += u64::from(kw) * u64::from(row[sx as usize]);
                }
                out_row[x as usize] = q16_to_u8(acc);
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as usize;
    let h = height as i32;
    dst.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as i32;
            for (x, out) in out_row.iter_mut().enumerate() {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    acc += u64::from(kw) * u64::from(src[sy as usize * w + x]);
                }
                *out = q16_to_u8(acc);
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
