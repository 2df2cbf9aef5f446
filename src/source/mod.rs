//! Media source capability
//!
//! The controller delegates all actual playback to an opaque [`MediaSource`]:
//! the host platform's decode/output stack hidden behind a small trait. The
//! shipped adapter is [`rodio::RodioSource`]; tests substitute a scripted
//! source through the same seam.

pub mod rodio;

use std::path::Path;

use tokio::sync::mpsc;

use crate::error::Result;

/// Channel the source fires its completion notification on.
///
/// Exactly one `()` is sent per play-through that reaches natural end.
/// Teardown (`reset`, drop) must never produce a completion.
pub type CompletionSender = mpsc::UnboundedSender<()>;

/// Receiving half handed to the controller's completion watcher.
pub type CompletionReceiver = mpsc::UnboundedReceiver<()>;

/// Platform playback capability consumed by the controller.
///
/// `set_source` and `prepare` are the only fallible operations; everything
/// else is assumed available once prepared and degrades to a no-op before
/// that.
pub trait MediaSource: Send {
    /// Bind the source to a media file. Fails with [`Error::Source`] on an
    /// invalid or unreadable path.
    ///
    /// [`Error::Source`]: crate::error::Error::Source
    fn set_source(&mut self, path: &Path) -> Result<()>;

    /// Ready the decoder. Fails with [`Error::Prepare`] when the data is
    /// rejected. May block; the controller calls it off the async threads.
    ///
    /// [`Error::Prepare`]: crate::error::Error::Prepare
    fn prepare(&mut self) -> Result<()>;

    /// Start or restart playback from the current position.
    fn start(&mut self);

    /// Pause playback, retaining the current position.
    fn pause(&mut self);

    /// Drop the prepared media; a new `set_source`/`prepare` cycle follows.
    fn reset(&mut self);

    /// Jump to the given position. Valid in any play state once prepared.
    fn seek(&mut self, position_ms: u64);

    /// Current playback position in milliseconds.
    fn position(&self) -> u64;

    /// Total duration of the prepared media in milliseconds (0 if unknown).
    fn duration(&self) -> u64;

    /// Whether the source is actively producing audio.
    fn is_playing(&self) -> bool;

    /// Register the channel completion notifications are delivered on.
    fn set_completion_sender(&mut self, tx: CompletionSender);
}

/// Creates [`MediaSource`] instances.
///
/// The controller constructs a source lazily on first `load` and recreates
/// one through the factory after `release`.
pub trait SourceFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn MediaSource>>;
}

impl<F> SourceFactory for F
where
    F: Fn() -> Result<Box<dyn MediaSource>> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn MediaSource>> {
        self()
    }
}
