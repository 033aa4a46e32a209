use std::fs;

use latnet_cli::commands::net::{render, resolve_config, NetArgs};
use latnet_cli::{ConstructionKind, GenValueConfig, NetConfig};
use latnet_core::{NetError, OutputFormat, PointSetType, RunProvenance};
use latnet_net::{canonical_net_hash, from_json, to_json, Sobol, SobolNet};
use tempfile::tempdir;

#[test]
fn defaults_fill_missing_fields() {
    let config = NetConfig::from_yaml("construction: polynomial\n").unwrap();
    assert_eq!(config.construction, ConstructionKind::Polynomial);
    assert_eq!(config.dimension, 1);
    assert_eq!(config.interlacing, 2);
    assert_eq!(config.output_format, OutputFormat::Cli);
    assert_eq!(config.point_set_type, PointSetType::Unilevel);
    assert!(config.gen_values.is_empty());
}

#[test]
fn full_configuration_parses() {
    let yaml = r#"
construction: sobol
dimension: 3
design:
  m: 4
gen_values:
  - []
  - [1]
  - [1, 3]
output_format: gui
extend_size: 6
combiner: "level:max"
point_set_type: multilevel
interlacing: 3
"#;
    let config = NetConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.design.m, Some(4));
    assert_eq!(config.gen_values[2], GenValueConfig::Numbers(vec![1, 3]));
    assert_eq!(config.extend_size, Some(6));
    assert_eq!(config.point_set_type, PointSetType::Multilevel);
    assert_eq!(NetConfig::from_yaml(&config.to_yaml().unwrap()).unwrap(), config);
}

#[test]
fn unknown_construction_is_a_config_error() {
    let err = NetConfig::from_yaml("construction: halton\n").unwrap_err();
    assert!(matches!(err, NetError::Config(_)));
}

#[test]
fn flags_override_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("net.yaml");
    fs::write(&path, "construction: sobol\ndimension: 2\ndesign:\n  m: 5\n").unwrap();

    let args = NetArgs {
        config: Some(path),
        dimension: Some(4),
        output_format: Some(OutputFormat::Gui),
        multilevel: true,
        ..NetArgs::default()
    };
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.dimension, 4);
    assert_eq!(config.design.m, Some(5));
    assert_eq!(config.output_format, OutputFormat::Gui);
    assert_eq!(config.point_set_type, PointSetType::Multilevel);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let args = NetArgs {
        config: Some(dir.path().join("absent.yaml")),
        ..NetArgs::default()
    };
    let err = resolve_config(&args).unwrap_err();
    assert_eq!(err.code(), "config-read");
}

#[test]
fn renders_the_configured_net() {
    let config = NetConfig {
        dimension: 2,
        design: latnet_cli::DesignConfig {
            m: Some(3),
            ..Default::default()
        },
        ..NetConfig::default()
    };
    assert_eq!(
        render(&config).unwrap(),
        "# Sobol digital net\n# m = 3\n# coordinate: direction numbers\n1:\n2: 1"
    );
}

#[test]
fn size_extension_applies_before_rendering() {
    let config = NetConfig {
        dimension: 1,
        design: latnet_cli::DesignConfig {
            m: Some(2),
            ..Default::default()
        },
        extend_size: Some(3),
        output_format: OutputFormat::Gui,
        ..NetConfig::default()
    };
    let text = render(&config).unwrap();
    assert!(text.contains("//dim = 1\n1 0 0\n0 1 0\n0 0 1\n"));
}

#[test]
fn polynomial_nets_reject_size_extension() {
    let config = NetConfig {
        construction: ConstructionKind::Polynomial,
        extend_size: Some(12),
        ..NetConfig::default()
    };
    assert!(matches!(render(&config), Err(NetError::Unsupported(_))));
}

#[test]
fn explicit_gen_values_come_from_yaml() {
    let yaml = r#"
construction: explicit
dimension: 1
design: { rows: 2, cols: 2 }
gen_values:
  - ["11", "01"]
points: true
"#;
    let config = NetConfig::from_yaml(yaml).unwrap();
    let text = render(&config).unwrap();
    assert!(text.contains("# coordinate 1\n1 1\n0 1"));
    assert!(text.ends_with("# points\n0\n0.5\n0.75\n0.25"));
}

#[test]
fn polynomial_gen_values_come_from_yaml() {
    let yaml = r#"
construction: polynomial
dimension: 2
design: { modulus: "1 1 1" }
gen_values: ["1", "0 1"]
"#;
    let text = render(&NetConfig::from_yaml(yaml).unwrap()).unwrap();
    assert!(text.ends_with("1: [1]\n2: [0 1]"));
}

#[test]
fn mismatched_gen_value_kind_is_rejected() {
    let config = NetConfig {
        construction: ConstructionKind::Polynomial,
        gen_values: vec![GenValueConfig::Numbers(vec![1])],
        ..NetConfig::default()
    };
    let err = render(&config).unwrap_err();
    assert_eq!(err.code(), "gen-value-kind");
}

#[test]
fn merits_are_reported_per_coordinate() {
    let config = NetConfig {
        dimension: 1,
        design: latnet_cli::DesignConfig {
            m: Some(2),
            ..Default::default()
        },
        combiner: Some("sum".into()),
        point_set_type: PointSetType::Multilevel,
        ..NetConfig::default()
    };
    let text = render(&config).unwrap();
    assert!(text.ends_with("# merit B-IDN-d2, combiner sum\n1: 2.625"));

    let unilevel = NetConfig {
        point_set_type: PointSetType::Unilevel,
        combiner: Some("ignored".into()),
        ..config
    };
    assert!(render(&unilevel).unwrap().ends_with("\n1: 0.125"));
}

#[test]
fn seeded_random_nets_are_reproducible() {
    let config = NetConfig {
        construction: ConstructionKind::Polynomial,
        dimension: 5,
        seed: Some(42),
        ..NetConfig::default()
    };
    let first = render(&config).unwrap();
    assert_eq!(first, render(&config).unwrap());
    let other = NetConfig {
        seed: Some(43),
        ..config
    };
    assert_ne!(first, render(&other).unwrap());
}

#[test]
fn saved_nets_load_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("net.json");
    let config = NetConfig {
        dimension: 3,
        design: latnet_cli::DesignConfig {
            m: Some(6),
            ..Default::default()
        },
        save: Some(path.clone()),
        ..NetConfig::default()
    };
    render(&config).unwrap();

    let (net, provenance) = from_json::<Sobol>(&fs::read_to_string(&path).unwrap()).unwrap();
    let expected = SobolNet::new(3, 6).unwrap();
    assert_eq!(canonical_net_hash(&net), canonical_net_hash(&expected));
    assert!(provenance.tool_versions.contains_key("latnet-cli"));
    assert!(to_json(&net, &RunProvenance::default()).is_ok());
}

#[test]
fn unquoted_polynomial_is_rejected_with_a_hint() {
    let yaml = r#"
construction: polynomial
design: { modulus: "1 1 1" }
gen_values:
  - 11
"#;
    match NetConfig::from_yaml(yaml).unwrap_err() {
        NetError::Config(info) => {
            assert_eq!(info.code, "yaml-deserialize");
            assert!(info.message.contains("must be quoted"), "{}", info.message);
        }
        other => panic!("expected Config, got {other:?}"),
    }

    let quoted = NetConfig::from_yaml(&yaml.replace("- 11", "- \"11\"")).unwrap();
    assert_eq!(quoted.gen_values, vec![GenValueConfig::Polynomial("11".into())]);
}

#[test]
fn points_of_a_large_net_are_refused() {
    let config = NetConfig {
        construction: ConstructionKind::Sobol,
        design: latnet_cli::DesignConfig {
            m: Some(40),
            ..Default::default()
        },
        points: true,
        ..NetConfig::default()
    };
    assert!(matches!(render(&config), Err(NetError::OutOfRange(_))));
}
