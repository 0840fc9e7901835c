//! Property tests for period keys and improvement payloads.

use devindex_types::{Improvement, NaReason, Period};
use proptest::prelude::*;

fn arb_month() -> impl Strategy<Value = Period> {
    (0u16..=9999, 1u8..=12).prop_map(|(year, month)| Period::Month { year, month })
}

fn arb_reason() -> impl Strategy<Value = NaReason> {
    prop_oneof![
        Just(NaReason::UndefinedBaseline),
        Just(NaReason::MissingCurrent),
        Just(NaReason::MissingBaseline),
    ]
}

fn arb_improvement() -> impl Strategy<Value = Improvement> {
    prop_oneof![
        (-8_000_000i32..8_000_000).prop_map(|eighths| Improvement::Measured {
            pct: f64::from(eighths) / 8.0
        }),
        arb_reason().prop_map(|reason| Improvement::NotApplicable { reason }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn month_key_parses_back(period in arb_month()) {
        let key = period.key();
        prop_assert_eq!(key.len(), 7);
        prop_assert_eq!(key.parse::<Period>().unwrap(), period);
    }

    #[test]
    fn key_order_matches_period_order(a in arb_month(), b in arb_month()) {
        prop_assert_eq!(a.key().cmp(&b.key()), a.cmp(&b));
        prop_assert!(Period::Baseline < a);
    }

    #[test]
    fn months_out_of_range_are_refused(year in 0u16..=9999, month in 13u8..=99) {
        prop_assert!(Period::month(year, month).is_none());
        let key = format!("{year:04}-{month:02}");
        prop_assert!(key.parse::<Period>().is_err());
    }

    #[test]
    fn period_json_round_trips(period in arb_month()) {
        let json = serde_json::to_string(&period).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", period.key()));
        let back: Period = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, period);
    }

    #[test]
    fn improvement_json_round_trips(improvement in arb_improvement()) {
        let json = serde_json::to_string(&improvement).unwrap();
        let back: Improvement = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, improvement);
        prop_assert_eq!(back.pct(), improvement.pct());
        prop_assert_eq!(back.is_measured(), improvement.pct().is_some());
    }
}
