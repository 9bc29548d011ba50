use std::path::{Path, PathBuf};

use crate::{
    assets::loader::{ImageLoader, LoadOutcome, LoadTicket},
    decoration::{
        model::{DecorationState, StopId},
        picker::{ColorDialog, recolor_stop},
        update::Update,
    },
    export::{ExportOptions, export_png},
    foundation::error::ShotframeResult,
    render::{RasterImage, render_at},
};

/// Which surface the session shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorView {
    /// No image yet; waiting for a drop or file pick.
    DropZone,
    /// An image is loaded and the decorated canvas is shown.
    Canvas,
}

/// One editing session: the decoration state, pending image loads and the viewport.
#[derive(Debug, Default)]
pub struct Editor {
    state: DecorationState,
    loader: ImageLoader,
    viewport: Option<(u32, u32)>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: DecorationState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &DecorationState {
        &self.state
    }

    pub fn view(&self) -> EditorView {
        if self.state.has_foreground() {
            EditorView::Canvas
        } else {
            EditorView::DropZone
        }
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn dispatch(&mut self, update: Update) {
        self.state = std::mem::take(&mut self.state).apply(update);
    }

    /// Record a new viewport size; the canvas follows it while auto-fit is on.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        self.dispatch(Update::FitViewport { width, height });
    }

    pub fn set_auto_canvas(&mut self, on: bool) {
        self.dispatch(Update::SetAutoCanvas(on));
        if on && let Some((width, height)) = self.viewport {
            self.dispatch(Update::FitViewport { width, height });
        }
    }

    pub fn open_path(&mut self, path: impl Into<PathBuf>) -> LoadTicket {
        self.loader.request_path(path)
    }

    pub fn open_bytes(&mut self, bytes: Vec<u8>) -> LoadTicket {
        self.loader.request_bytes(bytes)
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Apply any finished load without blocking.
    ///
    /// Returns `Ok(true)` when a new foreground was installed. A failed load keeps the
    /// current foreground and view, and surfaces the decode error.
    pub fn poll_loads(&mut self) -> ShotframeResult<bool> {
        match self.loader.poll() {
            Some(outcome) => self.apply_outcome(outcome),
            None => Ok(false),
        }
    }

    /// Block until the most recent load resolves, then apply it.
    pub fn wait_for_load(&mut self) -> ShotframeResult<bool> {
        match self.loader.wait() {
            Some(outcome) => self.apply_outcome(outcome),
            None => Ok(false),
        }
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) -> ShotframeResult<bool> {
        match outcome {
            LoadOutcome::Loaded { ticket, image } => {
                tracing::debug!(
                    ticket = ticket.as_u64(),
                    width = image.width,
                    height = image.height,
                    "foreground loaded"
                );
                self.dispatch(Update::LoadForeground(image));
                Ok(true)
            }
            LoadOutcome::Failed { ticket, error } => {
                tracing::warn!(ticket = ticket.as_u64(), %error, "foreground load failed");
                Err(error)
            }
        }
    }

    /// Open `dialog` for gradient stop `id`; cancelling leaves the state unchanged.
    pub fn pick_stop_color(&mut self, id: StopId, dialog: &mut dyn ColorDialog) {
        self.state = recolor_stop(std::mem::take(&mut self.state), id, dialog);
    }

    /// On-screen rendering at canvas resolution.
    pub fn preview(&self) -> ShotframeResult<RasterImage> {
        render_at(&self.state, 1.0)
    }

    /// Write the export into `dir`; `Ok(None)` when there is nothing to export.
    pub fn export(&self, dir: &Path, opts: &ExportOptions) -> ShotframeResult<Option<PathBuf>> {
        export_png(&self.state, dir, opts)
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
