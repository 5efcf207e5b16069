use std::sync::mpsc;
use std::thread::JoinHandle;

use anyhow::Context;

use crate::{
    encode::sink::FrameEncoder,
    export::controller::{
        CancelToken, ExportController, ExportOpts, ExportOutcome, ExportProgress, ExportStep,
    },
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
};

/// Handle to an export running on a worker thread.
#[derive(Debug)]
pub struct ExportHandle {
    cancel: CancelToken,
    progress: mpsc::Receiver<ExportProgress>,
    join: JoinHandle<DrillResult<ExportOutcome>>,
}

impl ExportHandle {
    /// Request cancellation; the worker stops at its next step boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Clone of the worker's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Progress reports, one per captured frame. The channel closes when the worker exits.
    pub fn progress(&self) -> &mpsc::Receiver<ExportProgress> {
        &self.progress
    }

    /// Return `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the worker and return its outcome.
    pub fn join(self) -> DrillResult<ExportOutcome> {
        self.join
            .join()
            .map_err(|_| DrillError::Other(anyhow::anyhow!("export worker panicked")))?
    }
}

/// Run an export on a background thread.
///
/// Parameters are checked before the thread starts, so [`DrillError::EmptyDocument`] and
/// [`DrillError::InvalidExport`] are reported here. The worker yields between frames and checks
/// the handle's [`CancelToken`] before every step.
pub fn spawn_export(
    doc: &DrillDocument,
    opts: ExportOpts,
    encoder: Box<dyn FrameEncoder>,
) -> DrillResult<ExportHandle> {
    if doc.is_empty() {
        return Err(DrillError::EmptyDocument);
    }
    opts.validate()?;

    let doc = doc.clone();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let (tx, progress) = mpsc::channel();

    let join = std::thread::Builder::new()
        .name("drillframe-export".to_owned())
        .spawn(move || -> DrillResult<ExportOutcome> {
            let mut controller = ExportController::new();
            controller.set_observer(move |p| {
                // The receiver may already be gone; progress is best effort.
                let _ = tx.send(p);
            });
            controller.start_export(&doc, opts, encoder)?;

            loop {
                if worker_cancel.is_cancelled() {
                    controller.cancel();
                    return Ok(ExportOutcome::Cancelled);
                }
                if let ExportStep::Finished(outcome) = controller.step()? {
                    return Ok(outcome);
                }
                std::thread::yield_now();
            }
        })
        .context("spawn export worker thread")?;

    Ok(ExportHandle {
        cancel,
        progress,
        join,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/worker.rs"]
mod tests;
