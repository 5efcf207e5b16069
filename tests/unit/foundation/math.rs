use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn clamp_unit_bounds() {
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(0.25), 0.25);
    assert_eq!(clamp_unit(3.0), 1.0);
}
