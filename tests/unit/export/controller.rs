use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::encode::gif::GifEncoder;
use crate::encode::sink::InMemoryEncoder;
use crate::model::dsl::{DrillBuilder, FrameBuilder};
use crate::model::element::Element;
use crate::render::backend::FrameRGBA;

fn three_player_frames() -> DrillDocument {
    DrillBuilder::new()
        .repeat_frame(
            FrameBuilder::new().element(Element::player(0.5, 0.5).unwrap()),
            3,
        )
        .build()
}

fn small_opts() -> ExportOpts {
    ExportOpts::new(32, 20, 200)
}

struct FailingFinish;

impl FrameEncoder for FailingFinish {
    fn format(&self) -> &'static str {
        "broken"
    }

    fn begin(&mut self, _cfg: EncoderConfig) -> DrillResult<()> {
        Ok(())
    }

    fn add_frame(&mut self, _frame: &FrameRGBA, _delay_ms: u32) -> DrillResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> DrillResult<Vec<u8>> {
        Err(DrillError::encoding("disk full"))
    }
}

struct RejectingBegin;

impl FrameEncoder for RejectingBegin {
    fn format(&self) -> &'static str {
        "rejecting"
    }

    fn begin(&mut self, _cfg: EncoderConfig) -> DrillResult<()> {
        Err(DrillError::encoding("unsupported size"))
    }

    fn add_frame(&mut self, _frame: &FrameRGBA, _delay_ms: u32) -> DrillResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> DrillResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[test]
fn three_frames_produce_an_artifact_after_three_captures() {
    let progress = Rc::new(RefCell::new(Vec::new()));
    let seen = progress.clone();

    let mut c = ExportController::new();
    c.set_observer(move |p| seen.borrow_mut().push(p));
    c.start_export(
        &three_player_frames(),
        small_opts(),
        Box::new(GifEncoder::default()),
    )
    .unwrap();
    assert_eq!(c.state(), &ExportState::Capturing { frame_index: 0 });

    let outcome = c.run_to_completion().unwrap();
    let ExportOutcome::Done(artifact) = outcome else {
        panic!("expected an artifact");
    };

    assert_eq!(c.state(), &ExportState::Done);
    assert_eq!(artifact.format, "gif");
    assert_eq!(artifact.frame_count, 3);
    assert_eq!((artifact.width, artifact.height), (32, 20));
    assert_eq!(artifact.total_duration_ms, 600);
    assert_eq!(&artifact.bytes[..6], b"GIF89a");

    let progress = progress.borrow();
    assert_eq!(progress.len(), 3);
    assert_eq!(
        progress.last(),
        Some(&ExportProgress {
            frames_captured: 3,
            total_frames: 3
        })
    );
}

#[test]
fn steps_walk_through_the_state_machine() {
    let mut c = ExportController::new();
    c.start_export(
        &three_player_frames(),
        small_opts(),
        Box::new(InMemoryEncoder::new()),
    )
    .unwrap();

    for i in 1..=3 {
        let step = c.step().unwrap();
        assert_eq!(
            step,
            ExportStep::Captured(ExportProgress {
                frames_captured: i,
                total_frames: 3
            })
        );
    }
    assert_eq!(c.state(), &ExportState::Encoding);
    let ExportStep::Finished(ExportOutcome::Done(artifact)) = c.step().unwrap() else {
        panic!("expected done");
    };
    assert_eq!(artifact.bytes.len(), 3 * 32 * 20 * 4);
    assert!(c.step().is_err());
}

#[test]
fn cancel_after_first_frame_then_restart() {
    let doc = three_player_frames();
    let mut c = ExportController::new();
    c.start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap();
    c.step().unwrap();
    assert_eq!(c.state(), &ExportState::Capturing { frame_index: 1 });

    assert!(c.cancel());
    assert_eq!(c.state(), &ExportState::Cancelled);
    assert!(!c.cancel());
    assert!(c.step().is_err());

    c.start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap();
    assert!(matches!(
        c.run_to_completion().unwrap(),
        ExportOutcome::Done(_)
    ));
}

#[test]
fn cancel_token_is_observed_at_the_next_step() {
    let mut c = ExportController::new();
    c.start_export(
        &three_player_frames(),
        small_opts(),
        Box::new(InMemoryEncoder::new()),
    )
    .unwrap();
    c.step().unwrap();
    c.cancel_token().cancel();
    assert_eq!(
        c.step().unwrap(),
        ExportStep::Finished(ExportOutcome::Cancelled)
    );
    assert_eq!(c.state(), &ExportState::Cancelled);
}

#[test]
fn cancel_from_idle_is_allowed() {
    let mut c = ExportController::new();
    assert!(c.cancel());
    assert_eq!(c.state(), &ExportState::Cancelled);
}

#[test]
fn empty_document_is_rejected_without_state_change() {
    let mut c = ExportController::new();
    let err = c
        .start_export(
            &DrillDocument::new(),
            small_opts(),
            Box::new(InMemoryEncoder::new()),
        )
        .unwrap_err();
    assert!(matches!(err, DrillError::EmptyDocument));
    assert_eq!(c.state(), &ExportState::Idle);
}

#[test]
fn second_start_while_running_is_rejected() {
    let doc = three_player_frames();
    let mut c = ExportController::new();
    c.start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap();
    let err = c
        .start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap_err();
    assert!(matches!(err, DrillError::ExportInProgress));
    assert_eq!(c.state(), &ExportState::Capturing { frame_index: 0 });
}

#[test]
fn bad_parameters_are_invalid_export() {
    let doc = three_player_frames();
    let mut c = ExportController::new();
    for opts in [
        ExportOpts::new(0, 20, 200),
        ExportOpts::new(32, 0, 200),
        ExportOpts::new(32, 20, 0),
    ] {
        let err = c
            .start_export(&doc, opts, Box::new(InMemoryEncoder::new()))
            .unwrap_err();
        assert!(matches!(err, DrillError::InvalidExport(_)), "{err:?}");
    }
    assert_eq!(c.state(), &ExportState::Idle);
}

#[test]
fn encoder_failure_moves_to_failed() {
    let mut c = ExportController::new();
    c.start_export(&three_player_frames(), small_opts(), Box::new(FailingFinish))
        .unwrap();
    let err = c.run_to_completion().unwrap_err();
    assert!(matches!(err, DrillError::Encoding(_)));
    assert!(matches!(c.state(), ExportState::Failed { error } if error.contains("disk full")));

    c.start_export(
        &three_player_frames(),
        small_opts(),
        Box::new(InMemoryEncoder::new()),
    )
    .unwrap();
}

#[test]
fn frame_durations_override_the_default_delay() {
    let doc = DrillBuilder::new()
        .frame(FrameBuilder::new().duration_ms(50).unwrap())
        .frame(FrameBuilder::new())
        .build();
    let mut c = ExportController::new();
    c.start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap();
    let ExportOutcome::Done(artifact) = c.run_to_completion().unwrap() else {
        panic!("expected done");
    };
    assert_eq!(artifact.total_duration_ms, 250);
}

#[test]
fn document_is_snapshotted_at_start() {
    let mut doc = three_player_frames();
    let mut c = ExportController::new();
    c.start_export(&doc, small_opts(), Box::new(InMemoryEncoder::new()))
        .unwrap();
    doc.remove_frame(0).unwrap();
    doc.remove_frame(0).unwrap();
    let ExportOutcome::Done(artifact) = c.run_to_completion().unwrap() else {
        panic!("expected done");
    };
    assert_eq!(artifact.frame_count, 3);
}

#[test]
fn encoder_begin_failure_leaves_state_unchanged() {
    let mut c = ExportController::new();
    let err = c
        .start_export(&three_player_frames(), small_opts(), Box::new(RejectingBegin))
        .unwrap_err();
    assert!(matches!(err, DrillError::Encoding(_)));
    assert_eq!(c.state(), &ExportState::Idle);
    assert!(c.step().is_err());
}
