//! Background conversion of difficulty payloads.
//!
//! Converting a large difficulty can take longer than a frame. [`spawn_conversion`] runs
//! the conversion on a worker thread and hands back a [`ConversionTask`], which the
//! caller polls once per frame with [`ConversionTask::try_take`]. The result arrives
//! through a channel; the caller never shares the difficulty being built.
//!
//! Cancelling a task makes it discard its result, whether the worker has finished or not.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use log::{debug, warn};
use thiserror::Error;

use crate::convert::{ConvertError, ConvertOutput, convert_auto};

/// Shared flag to abandon a conversion.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a new, not cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Errors of a background conversion.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The task was cancelled before its result was taken.
    #[error("conversion was cancelled")]
    Cancelled,
    /// The conversion itself failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// The worker stopped without sending a result.
    #[error("conversion worker stopped without a result")]
    WorkerLost,
}

/// Handle to a conversion running on a worker thread.
#[derive(Debug)]
#[must_use]
pub struct ConversionTask {
    token: CancellationToken,
    receiver: Receiver<Result<ConvertOutput, ConvertError>>,
    /// Set once the result was handed out.
    taken: bool,
}

impl ConversionTask {
    /// Requests cancellation. The result, if any, is discarded.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The token of this task, to cancel it from elsewhere.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Takes the result if it is ready, without blocking.
    ///
    /// Returns `None` while the conversion is running, and after the result was taken.
    pub fn try_take(&mut self) -> Option<Result<ConvertOutput, LoadError>> {
        if self.taken {
            return None;
        }
        if self.token.is_cancelled() {
            self.taken = true;
            return Some(Err(LoadError::Cancelled));
        }
        let received = match self.receiver.try_recv() {
            Ok(result) => result.map_err(LoadError::from),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::WorkerLost),
        };
        self.taken = true;
        Some(received)
    }

    /// Blocks until the result is ready.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Cancelled`] if the task was cancelled, the conversion error
    /// if it failed, or [`LoadError::WorkerLost`] if there is no result to wait for.
    pub fn wait(mut self) -> Result<ConvertOutput, LoadError> {
        if self.taken {
            return Err(LoadError::WorkerLost);
        }
        self.taken = true;
        if self.token.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        let received = self.receiver.recv();
        if self.token.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        received
            .map_err(|_| LoadError::WorkerLost)?
            .map_err(LoadError::from)
    }
}

/// Starts converting `payload` on a worker thread.
///
/// The schema version is read from the payload. When no thread can be spawned, the
/// conversion runs on the calling thread and the task is ready immediately.
pub fn spawn_conversion(payload: Vec<u8>) -> ConversionTask {
    let token = CancellationToken::new();
    let (sender, receiver) = bounded(1);
    let payload = Arc::new(payload);

    let worker_token = token.clone();
    let worker_sender = sender.clone();
    let worker_payload = Arc::clone(&payload);
    let spawned = thread::Builder::new()
        .name("beatmap-convert".to_string())
        .spawn(move || {
            if worker_token.is_cancelled() {
                debug!("conversion cancelled before it started");
                return;
            }
            let result = convert_auto(&worker_payload);
            if worker_token.is_cancelled() {
                debug!("conversion finished after cancellation, discarding result");
                return;
            }
            // The receiver is gone when the task handle was dropped.
            let _ = worker_sender.send(result);
        });
    if let Err(e) = spawned {
        warn!("failed to spawn conversion worker, converting inline: {e}");
        let _ = sender.send(convert_auto(&payload));
    }
    ConversionTask {
        token,
        receiver,
        taken: false,
    }
}
