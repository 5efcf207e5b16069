use super::*;
use crate::foundation::core::Rgba8Premul;

fn cfg(w: u32, h: u32) -> EncoderConfig {
    EncoderConfig {
        width: w,
        height: h,
        frame_count: 2,
    }
}

#[test]
fn in_memory_encoder_keeps_frames_and_delays() {
    let mut enc = InMemoryEncoder::new();
    enc.begin(cfg(2, 1)).unwrap();
    enc.add_frame(&FrameRGBA::solid(2, 1, Rgba8Premul::black()), 200)
        .unwrap();
    enc.add_frame(&FrameRGBA::solid(2, 1, Rgba8Premul::transparent()), 500)
        .unwrap();
    let bytes = enc.finish().unwrap();

    assert!(enc.is_finished());
    assert_eq!(enc.config(), Some(cfg(2, 1)));
    assert_eq!(
        enc.frames().iter().map(|(_, d)| *d).collect::<Vec<_>>(),
        vec![200, 500]
    );
    assert_eq!(bytes.len(), 2 * 2 * 4);
    assert_eq!(&bytes[..4], &[0, 0, 0, 255]);
}

#[test]
fn frames_before_begin_are_rejected() {
    let mut enc = InMemoryEncoder::new();
    let err = enc
        .add_frame(&FrameRGBA::solid(1, 1, Rgba8Premul::black()), 10)
        .unwrap_err();
    assert!(matches!(err, DrillError::Encoding(_)));
    assert!(enc.finish().is_err());
}

#[test]
fn mismatched_frame_size_is_an_encoding_error() {
    let mut enc = InMemoryEncoder::new();
    enc.begin(cfg(4, 4)).unwrap();
    let err = enc
        .add_frame(&FrameRGBA::solid(2, 2, Rgba8Premul::black()), 10)
        .unwrap_err();
    assert!(matches!(err, DrillError::Encoding(_)));
}
