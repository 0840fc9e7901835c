use devindex_math::{change_pct, improvement, mean, round_f64, safe_share};

#[test]
fn improvement_then_round_can_be_used_for_display() {
    let pct = improvement(1.5, 1.2, false).pct().unwrap();
    assert_eq!(round_f64(pct, 1), 25.0);
}

#[test]
fn change_pct_ignores_inverse_semantics() {
    assert_eq!(change_pct(50.0, 100.0), Some(-50.0));
    assert_eq!(change_pct(0.0, 0.0), Some(0.0));
    assert_eq!(change_pct(1.0, 0.0), None);
}

#[test]
fn mean_of_monthly_values_feeds_improvement() {
    let avg = mean(&[90.0, 110.0, 130.0]).unwrap();
    assert_eq!(avg, 110.0);
    let pct = improvement(avg, 100.0, false).pct().unwrap();
    assert!((pct - 10.0).abs() < 1e-9);
}

#[test]
fn share_of_total_is_bounded() {
    let total = 12.0;
    let shares: f64 = [3.0, 4.0, 5.0].iter().map(|v| safe_share(*v, total)).sum();
    assert!((shares - 1.0).abs() < 1e-12);
}

#[test]
fn improvement_is_deterministic_for_same_input() {
    let a = improvement(1234.5, 987.6, true);
    let b = improvement(1234.5, 987.6, true);
    assert_eq!(a, b);
}
