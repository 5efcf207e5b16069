use super::*;
use crate::encode::gif::GifEncoder;
use crate::encode::sink::{EncoderConfig, InMemoryEncoder};
use crate::model::dsl::{DrillBuilder, FrameBuilder};
use crate::model::element::Element;
use crate::render::backend::FrameRGBA;

fn doc(frames: usize) -> DrillDocument {
    DrillBuilder::new()
        .repeat_frame(
            FrameBuilder::new().element(Element::player(0.5, 0.5).unwrap()),
            frames,
        )
        .build()
}

#[test]
fn background_export_reports_progress_and_finishes() {
    let handle = spawn_export(
        &doc(3),
        ExportOpts::new(32, 20, 200),
        Box::new(GifEncoder::default()),
    )
    .unwrap();

    let reports: Vec<_> = handle.progress().iter().collect();
    let outcome = handle.join().unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports.last(),
        Some(&ExportProgress {
            frames_captured: 3,
            total_frames: 3
        })
    );
    assert!(matches!(outcome, ExportOutcome::Done(a) if a.frame_count == 3));
}

/// Blocks in `add_frame` until the test drops its end of the gate.
struct GatedEncoder {
    gate: mpsc::Receiver<()>,
    inner: InMemoryEncoder,
}

impl FrameEncoder for GatedEncoder {
    fn format(&self) -> &'static str {
        "gated"
    }

    fn begin(&mut self, cfg: EncoderConfig) -> DrillResult<()> {
        self.inner.begin(cfg)
    }

    fn add_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> DrillResult<()> {
        let _ = self.gate.recv();
        self.inner.add_frame(frame, delay_ms)
    }

    fn finish(&mut self) -> DrillResult<Vec<u8>> {
        self.inner.finish()
    }
}

#[test]
fn cancel_stops_the_worker_without_an_artifact() {
    let (open, gate) = mpsc::channel();
    let handle = spawn_export(
        &doc(3),
        ExportOpts::new(32, 20, 100),
        Box::new(GatedEncoder {
            gate,
            inner: InMemoryEncoder::new(),
        }),
    )
    .unwrap();

    handle.cancel();
    drop(open);

    assert!(handle.cancel_token().is_cancelled());
    assert_eq!(handle.join().unwrap(), ExportOutcome::Cancelled);
}

#[test]
fn empty_document_fails_before_spawning() {
    let err = spawn_export(
        &DrillDocument::new(),
        ExportOpts::default(),
        Box::new(InMemoryEncoder::new()),
    )
    .unwrap_err();
    assert!(matches!(err, DrillError::EmptyDocument));
}
