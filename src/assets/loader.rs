use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
};

use crate::{
    assets::decode::{PreparedImage, decode_image, read_image},
    foundation::error::{ShotframeError, ShotframeResult},
};

/// Sequence number handed out for every load request.
///
/// Tickets are strictly increasing; a higher ticket always supersedes a lower one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Decides which completed load may write the foreground.
///
/// Only the most recently issued ticket is accepted, and only once.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadSequencer {
    issued: u64,
    settled: bool,
}

impl LoadSequencer {
    pub fn issue(&mut self) -> LoadTicket {
        self.issued += 1;
        self.settled = false;
        LoadTicket(self.issued)
    }

    pub fn latest(&self) -> Option<LoadTicket> {
        (self.issued > 0).then_some(LoadTicket(self.issued))
    }

    /// Whether the latest request is still in flight.
    pub fn is_outstanding(&self) -> bool {
        self.issued > 0 && !self.settled
    }

    pub fn accept(&mut self, ticket: LoadTicket) -> bool {
        if ticket.0 == self.issued && !self.settled {
            self.settled = true;
            true
        } else {
            false
        }
    }
}

/// Result of the most recent load request.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The image decoded; it should replace the foreground.
    Loaded {
        ticket: LoadTicket,
        image: PreparedImage,
    },
    /// Reading or decoding failed; the foreground must stay as it was.
    Failed {
        ticket: LoadTicket,
        error: ShotframeError,
    },
}

impl LoadOutcome {
    pub fn ticket(&self) -> LoadTicket {
        match self {
            Self::Loaded { ticket, .. } | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

type Completion = (LoadTicket, ShotframeResult<PreparedImage>);

/// Runs image reads/decodes on the rayon pool and surfaces only the newest result.
///
/// Superseded requests are never cancelled; their results are dropped on arrival.
pub struct ImageLoader {
    seq: LoadSequencer,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            seq: LoadSequencer::default(),
            tx,
            rx,
        }
    }

    pub fn latest(&self) -> Option<LoadTicket> {
        self.seq.latest()
    }

    pub fn is_loading(&self) -> bool {
        self.seq.is_outstanding()
    }

    /// Start reading and decoding `path` in the background.
    pub fn request_path(&mut self, path: impl Into<PathBuf>) -> LoadTicket {
        let path = path.into();
        self.spawn(move || read_image(&path))
    }

    /// Start decoding already-read file bytes in the background.
    pub fn request_bytes(&mut self, bytes: Vec<u8>) -> LoadTicket {
        self.spawn(move || Ok(decode_image(&bytes)?))
    }

    fn spawn<F>(&mut self, job: F) -> LoadTicket
    where
        F: FnOnce() -> ShotframeResult<PreparedImage> + Send + 'static,
    {
        let ticket = self.seq.issue();
        let tx = self.tx.clone();
        tracing::debug!(ticket = ticket.0, "image load requested");
        rayon::spawn(move || {
            // A panicking decoder must still settle the ticket, or `wait` would block forever.
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job))
                .unwrap_or_else(|_| Err(ShotframeError::render("image load panicked")));
            // The receiver lives as long as the loader; a send error only means it was dropped.
            let _ = tx.send((ticket, result));
        });
        ticket
    }

    /// Non-blocking: return the newest request's outcome if it has arrived.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let mut out = None;
        while let Ok(done) = self.rx.try_recv() {
            if let Some(outcome) = self.settle(done) {
                out = Some(outcome);
            }
        }
        out
    }

    /// Block until the newest request resolves. Returns `None` if nothing is in flight.
    pub fn wait(&mut self) -> Option<LoadOutcome> {
        while self.seq.is_outstanding() {
            let done = self.rx.recv().ok()?;
            if let Some(outcome) = self.settle(done) {
                return Some(outcome);
            }
        }
        None
    }

    fn settle(&mut self, (ticket, result): Completion) -> Option<LoadOutcome> {
        if !self.seq.accept(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.seq.issued,
                "discarding superseded image load"
            );
            return None;
        }
        Some(match result {
            Ok(image) => LoadOutcome::Loaded { ticket, image },
            Err(error) => LoadOutcome::Failed { ticket, error },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
