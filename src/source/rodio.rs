//! rodio-backed media source
//!
//! Delegates playback to the platform output stack through rodio. This
//! adapter never inspects sample data; it binds a file, hands the decoder to
//! a sink, and reports position and end-of-stream.
//!
//! End-of-stream detection: rodio exposes no completion callback, so a
//! watcher thread polls the sink for emptiness. A generation counter is
//! bumped whenever the current queue becomes invalid (re-prepare, reset,
//! drop) so teardown never fires a spurious completion.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use super::{CompletionSender, MediaSource};
use crate::error::{Error, Result};

/// Poll cadence of the end-of-stream watcher thread.
const WATCH_INTERVAL: Duration = Duration::from_millis(100);

/// [`MediaSource`] implementation over a rodio output stream and sink.
pub struct RodioSource {
    // Must stay alive for the lifetime of the source
    stream: OutputStream,

    sink: Option<Arc<Sink>>,
    path: Option<PathBuf>,
    duration_ms: u64,

    completion_tx: Option<CompletionSender>,
    generation: Arc<AtomicU64>,
    watcher_armed: bool,
}

impl RodioSource {
    /// Open the default platform output stream.
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Internal(format!("audio output unavailable: {e}")))?;

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration_ms: 0,
            completion_tx: None,
            generation: Arc::new(AtomicU64::new(0)),
            watcher_armed: false,
        })
    }

    /// Invalidate the current queue; any live watcher exits without firing.
    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Decode the bound file and append it to a fresh paused sink.
    fn build_sink(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| Error::Prepare("prepare called before set_source".to_string()))?;

        let file = File::open(&path)
            .map_err(|e| Error::Source(format!("{}: {e}", path.display())))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| Error::Prepare(format!("{}: {e}", path.display())))?;

        self.duration_ms = decoder
            .total_duration()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        self.bump_generation();
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(decoder);

        self.sink = Some(Arc::new(sink));
        self.watcher_armed = false;
        Ok(())
    }

    /// Spawn the end-of-stream watcher for the current queue, at most one
    /// per prepared play-through.
    fn arm_watcher(&mut self) {
        if self.watcher_armed {
            return;
        }
        let (Some(sink), Some(tx)) = (self.sink.clone(), self.completion_tx.clone()) else {
            return;
        };

        let generation = Arc::clone(&self.generation);
        let armed_for = generation.load(Ordering::SeqCst);

        thread::spawn(move || loop {
            if generation.load(Ordering::SeqCst) != armed_for {
                return;
            }
            if sink.empty() {
                let _ = tx.send(());
                return;
            }
            thread::sleep(WATCH_INTERVAL);
        });

        self.watcher_armed = true;
    }
}

impl MediaSource for RodioSource {
    fn set_source(&mut self, path: &Path) -> Result<()> {
        // Probe readability up front so a bad path fails here, not in prepare.
        File::open(path).map_err(|e| Error::Source(format!("{}: {e}", path.display())))?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn prepare(&mut self) -> Result<()> {
        self.build_sink()
    }

    fn start(&mut self) {
        if self.sink.is_none() {
            return;
        }
        // A drained queue means the previous play-through completed; rebuild
        // so start() replays from the beginning, matching platform players.
        if self.sink.as_ref().is_some_and(|s| s.empty()) {
            if let Err(e) = self.build_sink() {
                warn!("failed to rebuild playback queue: {e}");
                return;
            }
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.arm_watcher();
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn reset(&mut self) {
        self.bump_generation();
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.duration_ms = 0;
        self.watcher_armed = false;
    }

    fn seek(&mut self, position_ms: u64) {
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.try_seek(Duration::from_millis(position_ms)) {
                debug!("seek to {position_ms} ms not supported: {e}");
            }
        }
    }

    fn position(&self) -> u64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_millis() as u64)
            .unwrap_or(0)
    }

    fn duration(&self) -> u64 {
        self.duration_ms
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.is_paused() && !s.empty())
            .unwrap_or(false)
    }

    fn set_completion_sender(&mut self, tx: CompletionSender) {
        self.completion_tx = Some(tx);
    }
}

impl Drop for RodioSource {
    fn drop(&mut self) {
        self.bump_generation();
    }
}
