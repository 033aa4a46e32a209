use latnet_core::{Compress, NetError};
use latnet_merit::{Bidn, MeritFunctor};
use proptest::prelude::*;

/// Value on `[2^-j, 2^(1-j))`, from integer dyadic arithmetic.
fn dyadic_reference(d: u32, j: u32) -> f64 {
    let half = 1u64 << (d - 1);
    let scale = half as f64 / (half - 1) as f64;
    let k = (d - 1) * j;
    let numerator = (1u64 << d) - 1;
    scale * (1.0 - numerator as f64 / 2f64.powi(k as i32))
}

#[test]
fn interlacing_factor_two() {
    let bidn = Bidn::new(2).unwrap();
    assert_eq!(bidn.scale(), 2.0);
    assert_eq!(bidn.evaluate(0.0, 0), 2.0);
    assert_eq!(bidn.evaluate(1.0e-17, 0), 2.0);
    assert_eq!(bidn.evaluate(0.5, 0), -1.0);
    assert_eq!(bidn.evaluate(0.75, 0), -1.0);
    assert_eq!(bidn.evaluate(0.25, 0), 0.5);
}

#[test]
fn interlacing_factor_three() {
    let bidn = Bidn::new(3).unwrap();
    assert!((bidn.scale() - 4.0 / 3.0).abs() < 1e-15);
    assert!((bidn.evaluate(0.5, 16) - -1.0).abs() < 1e-12);
}

#[test]
fn degenerate_factors_are_rejected() {
    for d in [0, 1, 64] {
        let err = Bidn::new(d).unwrap_err();
        assert!(matches!(err, NetError::InvalidArgument(_)));
        assert_eq!(err.info().context["interlacing_factor"], d.to_string());
    }
}

#[test]
fn metadata() {
    let bidn = Bidn::new(3).unwrap();
    assert_eq!(bidn.name(), "B-IDN-d3");
    assert_eq!(bidn.to_string(), "B-IDN-d3");
    assert_eq!(bidn.interlacing_factor(), 3);
    assert!(!bidn.symmetric());
    assert_eq!(bidn.suggested_compression(), Compress::None);
}

proptest! {
    #[test]
    fn matches_dyadic_reference(
        d in 2u32..12,
        j in 1u32..30,
        t in 0.0f64..0.99,
        n in any::<u64>(),
    ) {
        let bidn = Bidn::new(d).unwrap();
        let x = 2f64.powi(-(j as i32)) * (1.0 + t);
        prop_assert!((bidn.evaluate(x, n) - dyadic_reference(d, j)).abs() < 1e-12);
        let half = 1u64 << (d - 1);
        prop_assert_eq!(bidn.evaluate(0.0, n), half as f64 / (half - 1) as f64);
    }

    #[test]
    fn constant_on_dyadic_intervals(d in 2u32..8, j in 1i32..20, t in 0.0f64..0.99) {
        // Every x in [2^-j, 2^(1-j)) shares floor(log2(x)) = -j.
        let bidn = Bidn::new(d).unwrap();
        let low = 2f64.powi(-j);
        let x = low * (1.0 + t);
        prop_assert_eq!(bidn.evaluate(x, 0), bidn.evaluate(low, 0));
    }
}
