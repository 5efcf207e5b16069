use super::*;

#[test]
fn create_element_accepts_closed_set() {
    let p = create_element("player", None, 0.5, 0.25, None, None, None).unwrap();
    assert_eq!(p.element_type(), &ElementType::Player);
    assert_eq!((p.x(), p.y()), (0.5, 0.25));
    assert_eq!(p.color(), Color::DEFAULT);
    assert_eq!(p.size(), 1.0);
    assert_eq!(p.raw_color(), None);

    let cone = create_element(
        "equipment",
        Some("cone-blue"),
        0.1,
        0.2,
        Some("#0000ff"),
        Some(2.0),
        None,
    )
    .unwrap();
    assert_eq!(
        cone.element_type(),
        &ElementType::Equipment(EquipmentKind::ConeBlue)
    );
    assert_eq!(cone.size(), 2.0);
    assert_eq!(cone.color(), Color::rgb(0, 0, 255));

    let t = create_element("text", None, 0.0, 0.0, None, None, Some("GK")).unwrap();
    assert_eq!(t.label(), "GK");
}

#[test]
fn create_element_rejects_bad_kinds() {
    for (kind, sub) in [
        ("ball", None),
        ("player", Some("arrow")),
        ("text", Some("circle")),
        ("equipment", None),
        ("equipment", Some("arrow")),
        ("movement", Some("cone-orange")),
        ("movement", None),
    ] {
        let err = create_element(kind, sub, 0.5, 0.5, None, None, None).unwrap_err();
        assert!(
            matches!(err, DrillError::InvalidElement(_)),
            "{kind}/{sub:?} should be invalid"
        );
    }
}

#[test]
fn create_element_rejects_bad_numbers() {
    assert!(create_element("player", None, f64::NAN, 0.5, None, None, None).is_err());
    assert!(create_element("player", None, 0.5, f64::INFINITY, None, None, None).is_err());
    assert!(create_element("player", None, 0.5, 0.5, None, Some(0.0), None).is_err());
    assert!(create_element("player", None, 0.5, 0.5, None, Some(-1.0), None).is_err());
    assert!(create_element("player", None, 0.5, 0.5, None, Some(f64::NAN), None).is_err());
}

#[test]
fn text_is_only_valid_on_text_elements() {
    let err = create_element("player", None, 0.5, 0.5, None, None, Some("A")).unwrap_err();
    assert!(matches!(err, DrillError::InvalidElement(_)));
}

#[test]
fn out_of_range_positions_are_clamped() {
    let p = create_element("player", None, -0.25, 1.5, None, None, None).unwrap();
    assert_eq!((p.x(), p.y()), (0.0, 1.0));
}

#[test]
fn clamp_to_canvas_is_pure_and_idempotent() {
    let mut raw = Element::player(0.5, 0.5).unwrap();
    raw.x = 4.0;
    raw.y = -3.0;
    let clamped = clamp_to_canvas(raw.clone());
    assert_eq!((clamped.x(), clamped.y()), (1.0, 0.0));
    assert_eq!(raw.x(), 4.0);
    assert_eq!(clamp_to_canvas(clamped.clone()), clamped);
}

#[test]
fn empty_text_draws_default_glyph() {
    let t = Element::text("", 0.5, 0.5).unwrap();
    assert_eq!(t.label(), DEFAULT_TEXT);
    let t = Element::new(ElementType::Text, 0.5, 0.5).unwrap();
    assert_eq!(t.label(), "T");
}

#[test]
fn classify_keeps_unknown_combinations() {
    let ty = ElementType::classify("ball", Some("size-5"));
    assert!(!ty.is_recognized());
    assert_eq!(ty.kind_str(), "ball");
    assert_eq!(ty.sub_kind_str(), Some("size-5"));
    assert_eq!(ty.to_string(), "ball/size-5");

    assert!(Element::new(ty, 0.5, 0.5).is_err());
}
