use latnet_core::NetError;
use latnet_merit::{combined_merit, level_merits, Bidn, LevelCombiner, MAX_EVAL_LEVEL};
use latnet_net::{DigitalNet, SobolNet};

#[test]
fn van_der_corput_levels() {
    // Points 0, 1/2, 1/4, 3/4 weigh 2, -1, 1/2, -1.
    let net = SobolNet::new(1, 2).unwrap();
    let bidn = Bidn::new(2).unwrap();
    let merits = level_merits(&net, 1, &bidn).unwrap();
    assert_eq!(merits, vec![2.0, 0.5, 0.125]);

    assert_eq!(combined_merit(&net, 1, &bidn, LevelCombiner::Sum).unwrap(), 2.625);
    assert_eq!(combined_merit(&net, 1, &bidn, LevelCombiner::Max).unwrap(), 2.0);
    assert_eq!(
        combined_merit(&net, 1, &bidn, LevelCombiner::LevelSelector(2)).unwrap(),
        0.125
    );
}

#[test]
fn one_entry_per_level() {
    let net = SobolNet::new(3, 8).unwrap();
    let bidn = Bidn::new(2).unwrap();
    for coord in 1..=3 {
        assert_eq!(level_merits(&net, coord, &bidn).unwrap().len(), net.num_columns() + 1);
    }
}

#[test]
fn selector_beyond_the_net_fails() {
    let net = SobolNet::new(1, 3).unwrap();
    let bidn = Bidn::new(2).unwrap();
    let err = combined_merit(&net, 1, &bidn, LevelCombiner::LevelSelector(4)).unwrap_err();
    assert!(matches!(err, NetError::OutOfRange(_)));
}

#[test]
fn errors_propagate() {
    let bidn = Bidn::new(2).unwrap();
    let net = SobolNet::new(2, 4).unwrap();
    assert!(matches!(level_merits(&net, 3, &bidn), Err(NetError::OutOfRange(_))));

    let large = SobolNet::new(1, MAX_EVAL_LEVEL + 1).unwrap();
    let err = level_merits(&large, 1, &bidn).unwrap_err();
    assert_eq!(err.code(), "too-many-levels");
}
