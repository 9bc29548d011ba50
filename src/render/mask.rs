use kurbo::{PathEl, Rect, RoundedRect, Shape};

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Flattening tolerance for rounded corners, in output pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Rasterize the rounded-rect silhouette of `rect` into a `width * height` coverage plane.
///
/// `radius` is clamped to half of the shorter side. Coverage is the anti-aliased alpha.
pub fn silhouette_coverage(
    width: u32,
    height: u32,
    rect: Rect,
    radius: f64,
) -> ShotframeResult<Vec<u8>> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ShotframeError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ShotframeError::render("surface height exceeds u16"))?;
    let n = usize::from(w) * usize::from(h);
    let rect = rect.abs();
    if n == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Ok(vec![0; n]);
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&silhouette_path(rect, radius));
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

fn silhouette_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let max_r = rect.width().min(rect.height()) / 2.0;
    let r = if radius.is_finite() {
        radius.clamp(0.0, max_r)
    } else {
        0.0
    };
    if r <= 0.0 {
        path_to_cpu(rect.path_elements(PATH_TOLERANCE))
    } else {
        path_to_cpu(RoundedRect::from_rect(rect, r).path_elements(PATH_TOLERANCE))
    }
}

fn path_to_cpu(elements: impl Iterator<Item = PathEl>) -> vello_cpu::kurbo::BezPath {
    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
