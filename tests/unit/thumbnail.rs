use super::*;
use crate::model::dsl::{DrillBuilder, FrameBuilder};
use crate::model::element::{Element, EquipmentKind};

fn two_element_doc() -> DrillDocument {
    DrillBuilder::new()
        .frame(
            FrameBuilder::new()
                .element(Element::player(0.25, 0.5).unwrap().with_color("#000000"))
                .element(Element::equipment(EquipmentKind::ConeBlue, 0.75, 0.5).unwrap()),
        )
        .frame(FrameBuilder::new().element(Element::player(0.5, 0.5).unwrap()))
        .build()
}

#[test]
fn first_element_mode_is_default_and_draws_one_command() {
    let doc = two_element_doc();
    let opts = ThumbnailOpts::default();
    assert_eq!(opts.mode, ThumbnailMode::FirstElement);
    assert_eq!((opts.width, opts.height), (160, 100));
    assert_eq!(thumbnail_commands(&doc, &opts).iter().count(), 1);
}

#[test]
fn full_frame_mode_draws_the_whole_first_frame() {
    let doc = two_element_doc();
    let opts = ThumbnailOpts {
        mode: ThumbnailMode::FullFrame,
        ..ThumbnailOpts::default()
    };
    let names: Vec<_> = thumbnail_commands(&doc, &opts)
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, vec!["circle", "polygon"]);
}

#[test]
fn empty_documents_yield_blank_thumbnails() {
    let opts = ThumbnailOpts::default();
    let empty = DrillDocument::new();
    assert!(thumbnail_commands(&empty, &opts).is_empty());

    let mut blank_frame = DrillDocument::new();
    blank_frame.insert_frame(0);
    let bmp = render_thumbnail(&blank_frame, &opts).unwrap();
    assert_eq!((bmp.width, bmp.height), (160, 100));
    assert!(bmp.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn first_element_is_rasterized() {
    let doc = two_element_doc();
    let bmp = render_thumbnail(&doc, &ThumbnailOpts::default()).unwrap();
    assert_eq!(bmp.pixel(40, 50), Some([0, 0, 0, 255]));
    assert_eq!(bmp.pixel(120, 50), Some([255, 255, 255, 255]));
}

#[test]
fn png_output_has_signature() {
    let png = thumbnail_png(&two_element_doc(), &ThumbnailOpts::default()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn zero_sized_thumbnail_is_rejected() {
    let opts = ThumbnailOpts {
        width: 0,
        ..ThumbnailOpts::default()
    };
    assert!(render_thumbnail(&two_element_doc(), &opts).is_err());
}

#[test]
fn mode_parses_cli_spellings() {
    assert_eq!(ThumbnailMode::parse("full-frame"), Some(ThumbnailMode::FullFrame));
    assert_eq!(ThumbnailMode::parse("First-Element"), Some(ThumbnailMode::FirstElement));
    assert_eq!(ThumbnailMode::parse("sideways"), None);
}
