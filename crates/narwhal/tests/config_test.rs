use narwhal::config::{CrossingMinimizer, CycleRemoval, Layering};
use narwhal::{Error, LayoutConfig};

#[test]
fn config_defaults_match_the_documented_values() {
    let config = LayoutConfig::default();
    assert_eq!(config.layering, Layering::TopDown);
    assert_eq!(config.cycle_removal, CycleRemoval::Greedy);
    assert_eq!(config.crossing_minimizer, CrossingMinimizer::Classic);
    assert_eq!(config.max_level_cross, 23);
    assert!(config.transpose);
    assert!(config.straighten_edges);
    assert!(config.post_straighten);
    assert!(config.multi_component);
    assert_eq!(config.horizontal_offset, 50.0);
    assert_eq!(config.vertical_offset, 50.0);
    assert_eq!(config.margin, 0.0);
    config.validate().expect("defaults are valid");
}

#[test]
fn config_from_json_fills_missing_fields_with_defaults() {
    let config = LayoutConfig::from_json(
        r#"{
            "layering": "network-simplex",
            "crossing-minimizer": "eiglsperger",
            "horizontal-offset": 20,
            "stop-at-zero-crossings": true
        }"#,
    )
    .expect("valid json");
    assert_eq!(config.layering, Layering::NetworkSimplex);
    assert_eq!(config.crossing_minimizer, CrossingMinimizer::Eiglsperger);
    assert_eq!(config.horizontal_offset, 20.0);
    assert!(config.stop_at_zero_crossings);
    assert_eq!(config.vertical_offset, 50.0);
    assert_eq!(config.cycle_removal, CycleRemoval::Greedy);
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = LayoutConfig {
        layering: Layering::CoffmanGraham,
        cycle_removal: CycleRemoval::Constructive,
        coffman_graham_width: 3,
        margin: 12.5,
        ..LayoutConfig::default()
    };
    let json = config.to_json().expect("serialized");
    assert!(json.contains("\"coffman-graham\""));
    assert_eq!(LayoutConfig::from_json(&json).expect("parsed"), config);
}

#[test]
fn config_rejects_negative_or_non_finite_spacing() {
    let err = LayoutConfig::from_json(r#"{ "margin": -1 }"#).expect_err("negative margin");
    assert!(matches!(err, Error::InvalidConfig { .. }));

    let config = LayoutConfig {
        horizontal_offset: f64::INFINITY,
        ..LayoutConfig::default()
    };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
}

#[test]
fn config_rejects_a_zero_coffman_graham_width() {
    let config = LayoutConfig {
        layering: Layering::CoffmanGraham,
        coffman_graham_width: 0,
        ..LayoutConfig::default()
    };
    let err = config.validate().expect_err("zero width");
    assert!(err.to_string().contains("coffman-graham-width"));
}

#[test]
fn config_reports_malformed_json() {
    assert!(matches!(
        LayoutConfig::from_json("{ not json"),
        Err(Error::ConfigParse(_))
    ));
    assert!(matches!(
        LayoutConfig::from_json(r#"{ "layering": "sideways" }"#),
        Err(Error::ConfigParse(_))
    ));
}
