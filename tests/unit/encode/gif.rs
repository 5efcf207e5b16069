use super::*;
use crate::foundation::core::Rgba8Premul;

fn begin(enc: &mut GifEncoder, frames: usize) {
    enc.begin(EncoderConfig {
        width: 4,
        height: 3,
        frame_count: frames,
    })
    .unwrap();
}

#[test]
fn encodes_an_animated_gif() {
    let mut enc = GifEncoder::new(GifEncoderOpts::default()).unwrap();
    assert_eq!(enc.format(), "gif");
    begin(&mut enc, 3);
    for c in [[255u8, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]] {
        let frame = FrameRGBA::solid(4, 3, Rgba8Premul::from_straight_rgba(c[0], c[1], c[2], c[3]));
        enc.add_frame(&frame, 200).unwrap();
    }
    let bytes = enc.finish().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(bytes.last(), Some(&0x3b));

    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = image::AnimationDecoder::into_frames(decoder)
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 200);
}

#[test]
fn finishing_without_frames_fails() {
    let mut enc = GifEncoder::new(GifEncoderOpts::default()).unwrap();
    begin(&mut enc, 0);
    assert!(matches!(enc.finish(), Err(DrillError::Encoding(_))));
}

#[test]
fn rejects_out_of_range_speed() {
    let err = GifEncoder::new(GifEncoderOpts {
        speed: 0,
        ..GifEncoderOpts::default()
    })
    .unwrap_err();
    assert!(matches!(err, DrillError::InvalidExport(_)));
}

#[test]
fn rejects_frames_of_the_wrong_size() {
    let mut enc = GifEncoder::default();
    begin(&mut enc, 1);
    let err = enc
        .add_frame(&FrameRGBA::solid(2, 2, Rgba8Premul::black()), 100)
        .unwrap_err();
    assert!(matches!(err, DrillError::Encoding(_)));
}
