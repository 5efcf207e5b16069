use super::*;
use crate::model::element::{EquipmentKind, MovementKind};

fn labelled(n: usize) -> DrillDocument {
    let mut doc = DrillDocument::new();
    for i in 0..n {
        let at = doc.insert_frame(i);
        doc.set_frame_label(at, Some(format!("f{i}"))).unwrap();
    }
    doc
}

fn labels(doc: &DrillDocument) -> Vec<String> {
    doc.frames()
        .iter()
        .map(|f| f.label().unwrap_or("-").to_owned())
        .collect()
}

#[test]
fn insert_frame_clamps_index() {
    let mut doc = labelled(2);
    assert_eq!(doc.insert_frame(99), 2);
    assert_eq!(doc.insert_frame(0), 0);
    assert_eq!(labels(&doc), ["-", "f0", "f1", "-"]);
}

#[test]
fn duplicate_frame_deep_copies_after_source() {
    let mut doc = labelled(2);
    doc.add_element(0, Element::player(0.1, 0.1).unwrap()).unwrap();

    assert_eq!(doc.duplicate_frame(0).unwrap(), 1);
    assert_eq!(labels(&doc), ["f0", "f0", "f1"]);

    doc.move_element(1, 0, 0.9, 0.9).unwrap();
    assert_eq!(doc.frames()[0].elements()[0].x(), 0.1);
    assert_eq!(doc.frames()[1].elements()[0].x(), 0.9);

    assert!(matches!(
        doc.duplicate_frame(3),
        Err(DrillError::IndexOutOfRange { what: "frame", .. })
    ));
}

#[test]
fn move_frame_preserves_relative_order() {
    let mut doc = labelled(4);
    doc.move_frame(0, 2).unwrap();
    assert_eq!(labels(&doc), ["f1", "f2", "f0", "f3"]);
    doc.move_frame(3, 0).unwrap();
    assert_eq!(labels(&doc), ["f3", "f1", "f2", "f0"]);
    assert!(doc.move_frame(4, 0).is_err());
    assert!(doc.move_frame(0, 4).is_err());
}

#[test]
fn insert_then_move_there_and_back_restores_order() {
    for i in 0..=3 {
        for j in 0..=3 {
            let mut doc = labelled(3);
            let at = doc.insert_frame(i);
            let before = labels(&doc);
            doc.move_frame(at, j).unwrap();
            doc.move_frame(j, at).unwrap();
            assert_eq!(labels(&doc), before, "i={i} j={j}");
        }
    }
}

#[test]
fn element_indices_are_checked() {
    let mut doc = labelled(1);
    assert!(matches!(
        doc.add_element(1, Element::player(0.5, 0.5).unwrap()),
        Err(DrillError::IndexOutOfRange { what: "frame", index: 1, len: 1 })
    ));
    assert!(matches!(
        doc.remove_element(0, 0),
        Err(DrillError::IndexOutOfRange { what: "element", index: 0, len: 0 })
    ));
    assert!(doc.update_element(0, 0, &ElementPatch::default()).is_err());
}

#[test]
fn add_and_remove_elements_keep_z_order() {
    let mut doc = labelled(1);
    let a = doc.add_element(0, Element::player(0.1, 0.1).unwrap()).unwrap();
    let b = doc
        .add_element(0, Element::equipment(EquipmentKind::Square, 0.2, 0.2).unwrap())
        .unwrap();
    let c = doc
        .add_element(0, Element::movement(MovementKind::Arrow, 0.3, 0.3).unwrap())
        .unwrap();
    assert_eq!((a, b, c), (0, 1, 2));

    let removed = doc.remove_element(0, 1).unwrap();
    assert_eq!(
        removed.element_type(),
        &crate::model::element::ElementType::Equipment(EquipmentKind::Square)
    );
    assert_eq!(doc.frames()[0].len(), 2);
    assert_eq!(doc.frames()[0].elements()[1].x(), 0.3);

    doc.reorder_element(0, 1, 0).unwrap();
    assert_eq!(doc.frames()[0].elements()[0].x(), 0.3);
}

#[test]
fn invalid_update_leaves_document_unchanged() {
    let mut doc = labelled(2);
    doc.add_element(1, Element::player(0.5, 0.5).unwrap()).unwrap();
    let before = doc.clone();

    let err = doc
        .update_element(
            1,
            0,
            &ElementPatch {
                x: Some(0.1),
                size: Some(-1.0),
                ..ElementPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, DrillError::InvalidElement(_)));
    assert_eq!(doc, before);
}

#[test]
fn frame_metadata_edits() {
    let mut doc = labelled(1);
    doc.set_frame_duration(0, Some(350)).unwrap();
    assert_eq!(doc.frames()[0].duration_ms(), Some(350));
    assert_eq!(doc.frames()[0].effective_duration_ms(200), 350);
    let err = doc.set_frame_duration(0, Some(0)).unwrap_err();
    assert!(matches!(err, DrillError::InvalidElement(_)));
    assert_eq!(doc.frames()[0].duration_ms(), Some(350));
    doc.set_frame_duration(0, None).unwrap();
    assert_eq!(doc.frames()[0].effective_duration_ms(200), 200);

    let removed = doc.remove_frame(0).unwrap();
    assert_eq!(removed.label(), Some("f0"));
    assert!(doc.is_empty());
    assert!(doc.remove_frame(0).is_err());
}
