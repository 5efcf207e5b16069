use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    encode::sink::{EncoderConfig, FrameEncoder},
    foundation::core::Canvas,
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
    render::backend::{RasterBackend, RasterOpts},
    render::cpu::CpuRasterizer,
    render::renderer::{RenderOpts, render_with},
};

/// Options for one export run.
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Delay for frames without their own `durationMs`.
    pub frame_duration_ms: u32,
    /// Renderer options.
    pub render: RenderOpts,
    /// Rasterizer options.
    pub raster: RasterOpts,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            frame_duration_ms: 1000,
            render: RenderOpts::default(),
            raster: RasterOpts::default(),
        }
    }
}

impl ExportOpts {
    /// Options for a `width`x`height` export with `frame_duration_ms` per frame.
    pub fn new(width: u32, height: u32, frame_duration_ms: u32) -> Self {
        Self {
            width,
            height,
            frame_duration_ms,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> DrillResult<()> {
        Canvas::new(self.width, self.height)?;
        if self.frame_duration_ms == 0 {
            return Err(DrillError::invalid_export("frame duration must be > 0 ms"));
        }
        Ok(())
    }
}

/// Export lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportState {
    /// No capture in progress and no encoder held.
    Idle,
    /// Capturing the frame at `frame_index` next.
    Capturing {
        /// Index of the next frame to capture.
        frame_index: usize,
    },
    /// All frames submitted; the encoder is finalizing next.
    Encoding,
    /// The last export produced an artifact.
    Done,
    /// The last export was cancelled; no artifact.
    Cancelled,
    /// The last export failed.
    Failed {
        /// Display form of the error.
        error: String,
    },
}

impl ExportState {
    /// Return `true` while capturing or encoding.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Capturing { .. } | Self::Encoding)
    }
}

/// Capture progress after a frame has been submitted to the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportProgress {
    /// Frames captured so far.
    pub frames_captured: usize,
    /// Frames in the snapshotted document.
    pub total_frames: usize,
}

/// Encoded export output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Encoder format name (`"gif"`, ...).
    pub format: &'static str,
    /// Number of frames encoded.
    pub frame_count: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Sum of all frame delays.
    pub total_duration_ms: u64,
}

/// How an export run ended. Failures are reported as errors instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Encoding finished.
    Done(ExportArtifact),
    /// The run was cancelled; nothing was produced.
    Cancelled,
}

/// Result of a single [`ExportController::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStep {
    /// One more frame was captured.
    Captured(ExportProgress),
    /// The run reached a terminal state.
    Finished(ExportOutcome),
}

/// Shared cooperative cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Observed at the next step boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type ProgressObserver = Box<dyn FnMut(ExportProgress)>;

struct ExportJob {
    doc: DrillDocument,
    opts: ExportOpts,
    encoder: Box<dyn FrameEncoder>,
    rasterizer: CpuRasterizer,
    total_duration_ms: u64,
}

/// Drives frame capture and encoding one step at a time.
///
/// Each [`step`](Self::step) captures one frame or finalizes the encoder, so a host can
/// interleave export work with its own event loop. The document is snapshotted when the export
/// starts; later edits to the original do not affect a running export.
pub struct ExportController {
    state: ExportState,
    job: Option<ExportJob>,
    cancel: CancelToken,
    observer: Option<ProgressObserver>,
}

impl Default for ExportController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportController")
            .field("state", &self.state)
            .field("has_job", &self.job.is_some())
            .finish()
    }
}

impl ExportController {
    /// Idle controller.
    pub fn new() -> Self {
        Self {
            state: ExportState::Idle,
            job: None,
            cancel: CancelToken::new(),
            observer: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Cancellation token of the current export. Every `start_export` issues a fresh one.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Register a callback invoked after every captured frame.
    pub fn set_observer(&mut self, observer: impl FnMut(ExportProgress) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Snapshot `doc` and begin capturing into `encoder`.
    ///
    /// Fails with [`DrillError::EmptyDocument`] for a document without frames and
    /// [`DrillError::ExportInProgress`] while another export is running. Parameter and encoder
    /// `begin` errors are returned as well; in every case the state is unchanged.
    #[tracing::instrument(
        level = "debug",
        skip(self, doc, opts, encoder),
        fields(frames = doc.len(), w = opts.width, h = opts.height)
    )]
    pub fn start_export(
        &mut self,
        doc: &DrillDocument,
        opts: ExportOpts,
        mut encoder: Box<dyn FrameEncoder>,
    ) -> DrillResult<()> {
        if self.state.is_busy() {
            return Err(DrillError::ExportInProgress);
        }
        if doc.is_empty() {
            return Err(DrillError::EmptyDocument);
        }
        opts.validate()?;

        let cfg = EncoderConfig {
            width: opts.width,
            height: opts.height,
            frame_count: doc.len(),
        };
        encoder.begin(cfg)?;

        self.cancel = CancelToken::new();
        self.job = Some(ExportJob {
            doc: doc.clone(),
            rasterizer: CpuRasterizer::new(opts.raster.clone()),
            opts,
            encoder,
            total_duration_ms: 0,
        });
        self.state = ExportState::Capturing { frame_index: 0 };
        tracing::info!(frames = cfg.frame_count, "export started");
        Ok(())
    }

    /// Perform one unit of work: capture the next frame, or finalize the encoder.
    ///
    /// Cancellation requested through the [`CancelToken`] is honored here, before any work.
    /// Errors move the controller to [`ExportState::Failed`] and drop the encoder.
    #[tracing::instrument(level = "debug", skip(self), fields(state = ?self.state))]
    pub fn step(&mut self) -> DrillResult<ExportStep> {
        if !self.state.is_busy() {
            return Err(DrillError::invalid_export("no export in progress"));
        }
        if self.cancel.is_cancelled() {
            self.cancel();
            return Ok(ExportStep::Finished(ExportOutcome::Cancelled));
        }

        let res = match self.state {
            ExportState::Capturing { frame_index } => self.capture(frame_index),
            _ => self.encode(),
        };
        res.inspect_err(|e| self.fail(e))
    }

    /// Drive [`step`](Self::step) until the export finishes.
    pub fn run_to_completion(&mut self) -> DrillResult<ExportOutcome> {
        loop {
            if let ExportStep::Finished(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Cancel from Idle, Capturing or Encoding. The encoder is dropped and no artifact is
    /// produced. Returns `false` (and does nothing) in terminal states.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            ExportState::Idle | ExportState::Capturing { .. } | ExportState::Encoding => {
                self.job = None;
                self.cancel.cancel();
                self.state = ExportState::Cancelled;
                tracing::info!("export cancelled");
                true
            }
            _ => false,
        }
    }

    fn capture(&mut self, frame_index: usize) -> DrillResult<ExportStep> {
        let job = self.job_mut()?;
        let frame = job
            .doc
            .frame(frame_index)
            .ok_or_else(|| DrillError::frame_index(frame_index, job.doc.len()))?;

        let commands = render_with(frame, job.opts.width, job.opts.height, &job.opts.render);
        let bitmap = job
            .rasterizer
            .rasterize(&commands, job.opts.width, job.opts.height)?;
        let delay_ms = frame.effective_duration_ms(job.opts.frame_duration_ms);
        job.encoder.add_frame(&bitmap, delay_ms)?;
        job.total_duration_ms += u64::from(delay_ms);

        let total_frames = job.doc.len();
        let progress = ExportProgress {
            frames_captured: frame_index + 1,
            total_frames,
        };
        self.state = if progress.frames_captured == total_frames {
            ExportState::Encoding
        } else {
            ExportState::Capturing {
                frame_index: frame_index + 1,
            }
        };
        tracing::debug!(frame_index, delay_ms, "captured frame");
        if let Some(observer) = self.observer.as_mut() {
            observer(progress);
        }
        Ok(ExportStep::Captured(progress))
    }

    fn encode(&mut self) -> DrillResult<ExportStep> {
        let mut job = self
            .job
            .take()
            .ok_or_else(|| DrillError::invalid_export("no export in progress"))?;
        let bytes = job.encoder.finish()?;
        let artifact = ExportArtifact {
            format: job.encoder.format(),
            frame_count: job.doc.len(),
            width: job.opts.width,
            height: job.opts.height,
            total_duration_ms: job.total_duration_ms,
            bytes,
        };
        self.state = ExportState::Done;
        tracing::info!(
            bytes = artifact.bytes.len(),
            frames = artifact.frame_count,
            "export done"
        );
        Ok(ExportStep::Finished(ExportOutcome::Done(artifact)))
    }

    fn fail(&mut self, e: &DrillError) {
        self.job = None;
        self.state = ExportState::Failed {
            error: e.to_string(),
        };
        tracing::info!(error = %e, "export failed");
    }

    fn job_mut(&mut self) -> DrillResult<&mut ExportJob> {
        self.job
            .as_mut()
            .ok_or_else(|| DrillError::invalid_export("no export in progress"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/controller.rs"]
mod tests;
