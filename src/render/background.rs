use rayon::prelude::*;

use crate::{
    decoration::model::{Background, BackgroundMode, GradientDirection},
    foundation::core::{Color, Point},
};

/// Fill a `width * height` premultiplied RGBA8 buffer with the backdrop.
///
/// `scale` maps canvas units to output pixels; it only matters for explicit gradient points.
/// A gradient with fewer than two stops draws the solid color instead.
pub fn paint_background(bg: &Background, width: u32, height: u32, scale: f64) -> Vec<u8> {
    let n = (width as usize) * (height as usize);
    let stops = match bg.mode {
        BackgroundMode::Gradient => bg.gradient.resolved_stops(),
        BackgroundMode::Solid => Vec::new(),
    };
    if stops.len() < 2 {
        return bg.color.to_premul().repeat(n);
    }

    let (start, end) = match bg.gradient.direction {
        GradientDirection::Compass(c) => c.endpoints(
            f64::from(width.saturating_sub(1)),
            f64::from(height.saturating_sub(1)),
        ),
        GradientDirection::Points { start, end } => (
            Point::new(start.x * scale, start.y * scale),
            Point::new(end.x * scale, end.y * scale),
        ),
    };
    let ramp = Ramp::new(&stops);
    let axis = end - start;
    let len2 = axis.hypot2();

    let mut out = vec![0u8; n * 4];
    if n == 0 {
        return out;
    }
    out.par_chunks_mut(width as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let t = if len2 > 0.0 {
                    let d = Point::new(x as f64, y as f64) - start;
                    (d.dot(axis) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                px.copy_from_slice(&ramp.at(t));
            }
        });
    out
}

/// Piecewise-linear color ramp over premultiplied stops.
struct Ramp {
    offsets: Vec<f64>,
    colors: Vec<[u8; 4]>,
}

impl Ramp {
    fn new(stops: &[(f64, Color)]) -> Self {
        Self {
            offsets: stops.iter().map(|(o, _)| *o).collect(),
            colors: stops.iter().map(|(_, c)| c.to_premul()).collect(),
        }
    }

    fn at(&self, t: f64) -> [u8; 4] {
        let last = self.offsets.len() - 1;
        if t <= self.offsets[0] {
            return self.colors[0];
        }
        if t >= self.offsets[last] {
            return self.colors[last];
        }
        let i = self
            .offsets
            .windows(2)
            .position(|w| t <= w[1])
            .unwrap_or(last - 1);
        let (o0, o1) = (self.offsets[i], self.offsets[i + 1]);
        if o1 <= o0 {
            return self.colors[i + 1];
        }
        let f = (t - o0) / (o1 - o0);
        let (a, b) = (self.colors[i], self.colors[i + 1]);
        let mut out = [0u8; 4];
        for c in 0..4 {
            let v = f64::from(a[c]) + (f64::from(b[c]) - f64::from(a[c])) * f;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
