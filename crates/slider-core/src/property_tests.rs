use proptest::prelude::*;

use crate::{Mode, ModelValue, RangeCoordinator, Scale, ValueModel};

fn scale_strategy() -> impl Strategy<Value = Scale> {
    (
        -500i32..500,
        0u32..2000,
        prop_oneof![
            Just(0.1),
            Just(0.25),
            Just(0.5),
            Just(1.0),
            Just(3.0),
            Just(10.0),
            Just(30.0),
        ],
    )
        .prop_map(|(floor, span, step)| {
            let floor = f64::from(floor);
            Scale::new(floor, floor + f64::from(span), step)
        })
}

proptest! {
    #[test]
    fn quantize_is_idempotent_and_bounded(s in scale_strategy(), raw in -5000.0f64..5000.0) {
        let q = s.quantize(raw);
        prop_assert!(q >= s.floor() && q <= s.ceil(), "{q} outside {s:?}");
        prop_assert_eq!(s.quantize(q), q);
    }
}

proptest! {
    #[test]
    fn proposals_keep_range_ordered(
        s in scale_strategy(),
        moves in prop::collection::vec((any::<bool>(), -5000.0f64..5000.0), 1..20),
    ) {
        let mut model = ValueModel::new(s, ModelValue::Range { low: s.floor(), high: s.ceil() });
        prop_assert_eq!(model.mode(), Mode::Range);
        for (low, v) in moves {
            let c = if low { model.set_low(v) } else { model.set_high(v) };
            let ModelValue::Range { low, high } = c.value else {
                return Err(TestCaseError::fail("range model produced a single value"));
            };
            prop_assert!(low <= high);
            prop_assert!(s.is_quantized(low) && s.is_quantized(high));
        }
    }
}

proptest! {
    #[test]
    fn coupled_moves_preserve_width(
        s in scale_strategy(),
        a in -5000.0f64..5000.0,
        b in -5000.0f64..5000.0,
        delta in -5000.0f64..5000.0,
    ) {
        let model = ValueModel::new(s, ModelValue::Range { low: a, high: b });
        let (low, high) = (model.value().low(), model.value().high().unwrap_or(s.ceil()));
        let u = RangeCoordinator::new(&s).propose_coupled(low, high, delta);
        prop_assert!((u.high - u.low - (high - low)).abs() < 1e-9);
        prop_assert!(u.low >= s.floor() && u.high <= s.ceil());
        prop_assert!(!u.swapped);
    }
}
