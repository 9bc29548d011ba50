use kurbo::Rect;

use crate::{
    decoration::model::{DecorationState, Foreground, Layout, Padding},
    foundation::{
        core::CanvasSize,
        error::{ShotframeError, ShotframeResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::{
        background::paint_background,
        blur::{blur_alpha8, blur_params},
        composite::{ImageDraw, draw_image_masked, tint_over_in_place},
        frame::RasterImage,
        mask::silhouette_coverage,
    },
};

/// Largest output side the rasterizer accepts.
pub const MAX_SURFACE_SIDE: u32 = u16::MAX as u32;

/// Render `state` at its configured export scale.
pub fn render(state: &DecorationState) -> ShotframeResult<RasterImage> {
    render_at(state, state.export_scale)
}

/// Render `state` with canvas units mapped to `scale` output pixels.
///
/// Pipeline: background, shadow from the blurred silhouette, then the foreground masked by
/// the silhouette. Output is straight-alpha RGBA8.
#[tracing::instrument(
    skip(state),
    fields(
        width = tracing::field::Empty,
        height = tracing::field::Empty,
        foreground = state.has_foreground()
    )
)]
pub fn render_at(state: &DecorationState, scale: f64) -> ShotframeResult<RasterImage> {
    let (width, height) = state.canvas.scaled(scale);
    tracing::Span::current()
        .record("width", width)
        .record("height", height);
    if width == 0 || height == 0 {
        return Ok(RasterImage::empty());
    }
    if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
        return Err(ShotframeError::render(format!(
            "output {width}x{height} exceeds the {MAX_SURFACE_SIDE}px surface limit"
        )));
    }

    let mut data = paint_background(&state.background, width, height, scale);

    if let Some(fg) = &state.foreground
        && let Some(dest) = foreground_rect(fg, state.canvas, state.layout, scale)
    {
        let coverage = silhouette_coverage(width, height, dest, state.corner_radius * scale)?;

        let tint = state
            .shadow
            .color
            .with_alpha_mul(state.shadow.opacity / 100.0)
            .to_premul();
        if tint[3] > 0 {
            let (radius, sigma) = blur_params(state.shadow.blur * scale);
            let shadow = blur_alpha8(&coverage, width, height, radius, sigma)?;
            tint_over_in_place(&mut data, &shadow, tint)?;
        }

        draw_image_masked(
            &mut data,
            width,
            height,
            &coverage,
            ImageDraw {
                pixels: fg.image.rgba8_premul.as_slice(),
                width: fg.image.width,
                height: fg.image.height,
                dest: (dest.x0, dest.y0, dest.x1, dest.y1),
            },
        )?;
    }

    unpremultiply_rgba8_in_place(&mut data);
    Ok(RasterImage {
        width,
        height,
        data,
    })
}

/// Destination of the foreground in output pixels, or `None` when nothing would be drawn.
pub fn foreground_rect(
    fg: &Foreground,
    canvas: CanvasSize,
    layout: Layout,
    scale: f64,
) -> Option<Rect> {
    let rect = match layout {
        Layout::Free => {
            let (w, h) = fg.scaled_size();
            let p = fg.placement;
            Rect::new(p.x, p.y, p.x + w, p.y + h)
        }
        Layout::Inset(padding) => inset_rect(fg, canvas, padding)?,
    };
    let rect = rect.abs().scale_from_origin(scale);
    let usable = [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite());
    (usable && rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
}

/// Contain-fit of the image inside the padded canvas, centered.
fn inset_rect(fg: &Foreground, canvas: CanvasSize, padding: Padding) -> Option<Rect> {
    let container = Rect::new(
        padding.left,
        padding.top,
        f64::from(canvas.width) - padding.right,
        f64::from(canvas.height) - padding.bottom,
    );
    let (iw, ih) = (f64::from(fg.image.width), f64::from(fg.image.height));
    if container.width() <= 0.0 || container.height() <= 0.0 || iw <= 0.0 || ih <= 0.0 {
        return None;
    }
    let fit = (container.width() / iw).min(container.height() / ih);
    let (w, h) = (iw * fit, ih * fit);
    let c = container.center();
    Some(Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
