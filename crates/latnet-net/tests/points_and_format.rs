use latnet_core::{NetError, OutputFormat};
use latnet_net::{
    coordinate_value, coordinate_values, points, DigitalNet, ExplicitNet, ExplicitShape,
    GeneratingMatrix, Polynomial, PolynomialNet, SobolNet, MAX_POINT_COLUMNS,
};

#[test]
fn first_sobol_points_are_known() {
    let net = SobolNet::new(2, 2).unwrap();
    assert_eq!(coordinate_values(&net, 1, 4).unwrap(), vec![0.0, 0.5, 0.25, 0.75]);
    assert_eq!(coordinate_values(&net, 2, 4).unwrap(), vec![0.0, 0.5, 0.75, 0.25]);

    let all = points(&net).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[2], vec![0.25, 0.75]);
}

#[test]
fn digital_net_points_are_stratified() {
    let net = SobolNet::new(4, 6).unwrap();
    for coord in 1..=4 {
        let mut values = coordinate_values(&net, coord, net.num_points()).unwrap();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (i, value) in values.iter().enumerate() {
            assert_eq!(*value, i as f64 / 64.0);
        }
    }
}

#[test]
fn coordinate_value_weights_rows() {
    let matrix = GeneratingMatrix::from_row_strings(&["11", "10", "01"]).unwrap();
    assert_eq!(coordinate_value(&matrix, 0), 0.0);
    assert_eq!(coordinate_value(&matrix, 1), 0.75);
    assert_eq!(coordinate_value(&matrix, 2), 0.625);
}

#[test]
fn asking_for_too_many_points_fails() {
    let net = SobolNet::new(1, 2).unwrap();
    let err = coordinate_values(&net, 1, 5).unwrap_err();
    assert!(matches!(err, NetError::OutOfRange(_)));
}

#[test]
fn large_nets_refuse_to_materialise_points() {
    let net = SobolNet::new(1, 40).unwrap();
    match points(&net).unwrap_err() {
        NetError::OutOfRange(info) => {
            assert_eq!(info.code, "too-many-points");
            assert_eq!(info.context.get("num_columns").map(String::as_str), Some("40"));
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }

    let err = coordinate_values(&net, 1, net.num_points()).unwrap_err();
    assert!(matches!(err, NetError::OutOfRange(_)));

    let prefix = coordinate_values(&net, 1, 8).unwrap();
    assert_eq!(prefix, vec![0.0, 0.5, 0.25, 0.75, 0.125, 0.625, 0.375, 0.875]);
}

#[test]
fn points_are_available_up_to_the_column_limit() {
    let net = SobolNet::new(1, MAX_POINT_COLUMNS).unwrap();
    let err = coordinate_values(&net, 1, net.num_points() + 1).unwrap_err();
    assert!(matches!(err, NetError::OutOfRange(_)));
    assert_eq!(coordinate_values(&net, 1, 2).unwrap(), vec![0.0, 0.5]);
}

#[test]
fn sobol_formats_direction_numbers() {
    let net = SobolNet::new(3, 3).unwrap();
    let text = net.format(OutputFormat::Cli);
    assert_eq!(
        text,
        "# Sobol digital net\n# m = 3\n# coordinate: direction numbers\n1:\n2: 1\n3: 1 3"
    );
}

#[test]
fn gui_format_appends_matrices() {
    let net = SobolNet::new(2, 3).unwrap();
    let text = net.format(OutputFormat::Gui);
    assert!(text.starts_with("# Sobol digital net"));
    assert!(text.contains("\n\n//dim = 1\n1 0 0\n0 1 0\n0 0 1\n"));
    assert!(text.contains("//dim = 2\n1 1 1\n0 1 0\n0 0 1\n"));
    assert!(!net.format(OutputFormat::Cli).contains("//dim"));
}

#[test]
fn polynomial_format_lists_generators() {
    let modulus = Polynomial::from_bits(0b111);
    let net = PolynomialNet::new(2, modulus).unwrap();
    assert_eq!(
        net.format(OutputFormat::Cli),
        "# Polynomial lattice rule\n# modulus = [1 1 1]\n# generating vector\n1: [1]\n2: [0 1]"
    );
}

#[test]
fn explicit_cli_format_dumps_matrices_once() {
    let net = ExplicitNet::new(1, ExplicitShape::new(2, 2)).unwrap();
    assert_eq!(
        net.format(OutputFormat::Cli),
        "# Explicit digital net\n# shape = 2x2\n# coordinate 1\n1 0\n0 1"
    );
    let gui = net.format(OutputFormat::Gui);
    assert!(!gui.contains("# coordinate 1"));
    assert!(gui.contains("//dim = 1\n1 0\n0 1\n"));
}
