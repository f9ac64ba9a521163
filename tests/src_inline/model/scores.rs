use super::*;

#[test]
fn test_percent_clamps_high_and_low() {
    assert_eq!(to_percent(130.0), "100%");
    assert_eq!(to_percent(100.4), "100%");
    assert_eq!(to_percent(-30.0), "0%");
    assert_eq!(to_percent(-0.4), "0%");
}

#[test]
fn test_percent_rounds_half_up() {
    assert_eq!(to_percent(64.5), "65%");
    assert_eq!(to_percent(64.49), "64%");
    assert_eq!(to_percent(0.5), "1%");
    assert_eq!(clamp_percent(-0.5), 0);
}

#[test]
fn test_percent_nan_is_zero() {
    assert_eq!(clamp_percent(f64::NAN), 0);
}

#[test]
fn test_display_keeps_raw_values() {
    let s = ScoreSet {
        stability: 101.2,
        coordination: 72.6,
        hip_extension: -5.0,
    };
    let d = s.display();
    assert_eq!(d.stability, "100%");
    assert_eq!(d.coordination, "73%");
    assert_eq!(d.hip_extension, "0%");
    assert_eq!(s.stability, 101.2);
    assert_eq!(s.clamped(), [100, 73, 0]);
}
