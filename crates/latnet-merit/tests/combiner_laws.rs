use latnet_core::{NetError, PointSetType};
use latnet_merit::{parse_combiner, parse_level_combiner, LevelCombiner};
use proptest::prelude::*;

#[test]
fn combiners_reduce_known_values() {
    let values = [2.0, 3.0, 5.0];
    assert_eq!(LevelCombiner::Sum.combine(&values).unwrap(), 10.0);
    assert_eq!(LevelCombiner::Max.combine(&values).unwrap(), 5.0);
    assert_eq!(LevelCombiner::LevelSelector(1).combine(&values).unwrap(), 3.0);
    assert_eq!(LevelCombiner::LevelSelector(2).combine(&values).unwrap(), 5.0);
}

#[test]
fn empty_inputs() {
    assert_eq!(LevelCombiner::Sum.combine(&[]).unwrap(), 0.0);
    let err = LevelCombiner::Max.combine(&[]).unwrap_err();
    assert_eq!(err.code(), "empty-merit-levels");
}

#[test]
fn selector_past_the_last_level_fails() {
    let err = LevelCombiner::LevelSelector(5).combine(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, NetError::OutOfRange(_)));
    assert_eq!(err.info().context["levels"], "2");
}

#[test]
fn parses_every_form() {
    assert_eq!(parse_combiner("sum", 10).unwrap(), LevelCombiner::Sum);
    assert_eq!(parse_combiner("max", 10).unwrap(), LevelCombiner::Max);
    assert_eq!(parse_combiner("level:3", 10).unwrap(), LevelCombiner::LevelSelector(3));
    assert_eq!(parse_combiner("level:10", 10).unwrap(), LevelCombiner::LevelSelector(10));
    assert_eq!(parse_combiner("level:max", 10).unwrap(), LevelCombiner::LevelSelector(10));
}

#[test]
fn rejects_malformed_strings() {
    for input in ["avg", "level:0", "level:11", "level:x", "level:1:2", "lvl:3", "", "Sum"] {
        let err = parse_combiner(input, 10).unwrap_err();
        assert!(matches!(err, NetError::Config(_)), "{input}");
        assert_eq!(err.code(), "bad-level-combiner");
        assert_eq!(err.info().context["input"], input);
    }
}

#[test]
fn unilevel_point_sets_ignore_the_combiner() {
    let combiner = parse_level_combiner(PointSetType::Unilevel, "not a combiner", 10).unwrap();
    assert_eq!(combiner, LevelCombiner::Sum);
    assert!(parse_level_combiner(PointSetType::Multilevel, "not a combiner", 10).is_err());
}

#[test]
fn combiner_serializes_with_its_level() {
    let json = serde_json::to_string(&LevelCombiner::LevelSelector(4)).unwrap();
    assert_eq!(json, r#"{"kind":"level_selector","level":4}"#);
    let back: LevelCombiner = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LevelCombiner::LevelSelector(4));
}

proptest! {
    #[test]
    fn display_parses_back(level in 1usize..64) {
        for combiner in [LevelCombiner::Sum, LevelCombiner::Max, LevelCombiner::LevelSelector(level)] {
            prop_assert_eq!(parse_combiner(&combiner.to_string(), 63).unwrap(), combiner);
        }
    }

    #[test]
    fn max_bounds_every_level(values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..32)) {
        let max = LevelCombiner::Max.combine(&values).unwrap();
        prop_assert!(values.iter().all(|&v| v <= max));
        prop_assert!(values.contains(&max));
    }

    #[test]
    fn selector_picks_its_level(values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..32), pick in any::<prop::sample::Index>()) {
        let level = pick.index(values.len());
        prop_assert_eq!(LevelCombiner::LevelSelector(level).combine(&values).unwrap(), values[level]);
    }
}
