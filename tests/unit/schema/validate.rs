use super::*;
use crate::schema::model::DocumentDef;

fn def(json: serde_json::Value) -> DocumentDef {
    serde_json::from_value(json).unwrap()
}

#[test]
fn errors_carry_json_paths() {
    let errs = validate_document(def(serde_json::json!({
        "frames": [
            { "elements": [] },
            { "durationMs": 0, "elements": [
                { "type": "player", "x": 0.5, "y": 0.5, "size": -1.0 },
                { "type": "player", "x": 0.5, "y": 0.5, "text": "nope" }
            ] }
        ]
    })))
    .unwrap_err();

    let msg = errs.to_string();
    assert_eq!(errs.errors.len(), 3);
    assert!(msg.contains("$.frames[1].durationMs"), "{msg}");
    assert!(msg.contains("$.frames[1].elements[0].size"), "{msg}");
    assert!(msg.contains("$.frames[1].elements[1].text"), "{msg}");
}

#[test]
fn positions_are_clamped() {
    let doc = validate_document(def(serde_json::json!({
        "frames": [{ "elements": [{ "type": "player", "x": 1.5, "y": -0.25 }] }]
    })))
    .unwrap();
    let el = &doc.frames()[0].elements()[0];
    assert_eq!((el.x(), el.y()), (1.0, 0.0));
}

#[test]
fn unrecognized_types_survive_and_may_carry_text() {
    let doc = validate_document(def(serde_json::json!({
        "frames": [{ "elements": [
            { "type": "goal", "subType": "large", "x": 0.1, "y": 0.2, "text": "G" }
        ] }]
    })))
    .unwrap();
    let el = &doc.frames()[0].elements()[0];
    assert!(!el.element_type().is_recognized());
    assert_eq!(el.element_type().to_string(), "goal/large");
    assert_eq!(el.raw_text(), Some("G"));
}

#[test]
fn document_to_def_restores_payload_keys() {
    let doc = validate_document(def(serde_json::json!({
        "frames": [{ "elements": [
            { "type": "equipment", "subType": "cone-blue", "x": 0.25, "y": 0.75, "color": "#00f" }
        ] }]
    })))
    .unwrap();
    let back = document_to_def(&doc);
    let el = &back.frames[0].elements[0];
    assert_eq!(el.kind, "equipment");
    assert_eq!(el.sub_kind.as_deref(), Some("cone-blue"));
    assert_eq!(el.color.as_deref(), Some("#00f"));
    assert_eq!(el.size, None);
}

#[test]
fn format_path_renders_fields_and_indices() {
    let path = [
        SchemaPathElem::Field("frames"),
        SchemaPathElem::Index(4),
        SchemaPathElem::Field("label"),
    ];
    assert_eq!(format_path(&path), "$.frames[4].label");
}
