use chart_engine::data_types::{
    AxisConfig, AxisFormat, AxisKind, AxisOrientation, AxisSide, ChartConfig, SeriesConfig,
    SeriesKind, Thickness, TimeUnit,
};
use chart_engine::event_bus::Component;
use chart_engine::Chart;

#[test]
fn test_load_chart_config_with_defaults() {
    let json = r#"{
        "padding": { "left": 4.0, "top": 4.0, "right": 4.0, "bottom": 4.0 },
        "axes": [
            { "name": "time", "kind": "Value", "orientation": "Horizontal",
              "format": { "Time": "Milliseconds" } },
            { "name": "price", "kind": "Value", "orientation": "Vertical",
              "side": "Right", "limit_minimum": 0.0, "size": 48.0 }
        ],
        "gridlines": { "name": "grid", "axis": "price" }
    }"#;
    let config = ChartConfig::from_json(json).unwrap();

    assert_eq!(config.padding, Thickness::uniform(4.0));
    assert_eq!(config.layout_quota, 0.2);
    assert_eq!(config.axes.len(), 2);

    let time = &config.axes[0];
    assert_eq!(time.format, AxisFormat::Time(TimeUnit::Milliseconds));
    assert_eq!(time.effective_side(), AxisSide::Bottom);
    assert_eq!(time.size, 30.0);
    assert_eq!(time.tick_count, 5);

    let price = &config.axes[1];
    assert_eq!(price.effective_side(), AxisSide::Right);
    assert_eq!(price.limit_minimum, Some(0.0));
    assert_eq!(price.limit_maximum, None);
    assert!(!price.reversed);

    assert_eq!(config.gridlines.as_ref().map(|g| g.tick_count), Some(5));
}

#[test]
fn test_quota_out_of_range_is_rejected() {
    let err = ChartConfig::from_json(r#"{ "layout_quota": 1.5 }"#).unwrap_err();
    assert!(err.to_string().contains("layout_quota"));
}

#[test]
fn test_malformed_json_is_reported_with_context() {
    let err = ChartConfig::from_json("{ axes: ").unwrap_err();
    assert!(err.to_string().contains("invalid chart configuration"));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = ChartConfig {
        axes: vec![
            AxisConfig::new("x", AxisKind::Category, AxisOrientation::Horizontal).reversed(true),
            AxisConfig::new("y", AxisKind::Value, AxisOrientation::Vertical)
                .with_side(AxisSide::Right)
                .with_limits(None, Some(100.0)),
        ],
        ..ChartConfig::default()
    };
    let json = config.to_json().unwrap();
    assert_eq!(ChartConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_series_config_defaults_to_markers() {
    let series: SeriesConfig = serde_json::from_str(
        r#"{ "name": "s", "data_source": "d", "category_axis": "x", "value_axis": "y" }"#,
    )
    .unwrap();
    assert_eq!(series.kind, SeriesKind::Markers);
}

#[test]
fn test_chart_from_config_registers_axes_and_gridlines() {
    let json = r#"{
        "axes": [
            { "name": "x", "kind": "Category", "orientation": "Horizontal" },
            { "name": "y", "kind": "Value", "orientation": "Vertical" }
        ],
        "gridlines": { "name": "grid", "axis": "y", "tick_count": 4 }
    }"#;
    let chart = Chart::from_config(ChartConfig::from_json(json).unwrap()).unwrap();
    let names: Vec<&str> = chart.bus().components().map(|c| c.name()).collect();
    assert_eq!(names, vec!["x", "y", "grid"]);
}

#[test]
fn test_chart_from_config_rejects_duplicate_axis_names() {
    let config = ChartConfig {
        axes: vec![
            AxisConfig::new("x", AxisKind::Category, AxisOrientation::Horizontal),
            AxisConfig::new("x", AxisKind::Value, AxisOrientation::Vertical),
        ],
        ..ChartConfig::default()
    };
    assert!(Chart::from_config(config).is_err());
}
