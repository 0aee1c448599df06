use std::path::Path;

use approx::assert_relative_eq;
use assessment_widgets::plane::LinearScale;
use assessment_widgets::{generate, generate_descriptor};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Every widget that plots a list of data, with a fixture and the name of
/// its data field.
const DATA_WIDGETS: &[(&str, &str)] = &[
    ("barChart/favorite_fruit.json", "data"),
    ("histogram/test_scores.json", "data"),
    ("populationBarChart/city_growth.json", "data"),
    ("lineGraph/temperatures.json", "series"),
    ("areaGraph/water_use.json", "data"),
    ("scatterPlot/study_hours.json", "points"),
    ("dotPlot/pets.json", "data"),
    ("distanceTimeGraph/walk_to_school.json", "segments"),
];

fn fixture(relative: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative);
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn number_line(min: f64, max: f64, interval: f64, value: f64) -> Value {
    json!({
        "width": 480,
        "height": 90,
        "min": min,
        "max": max,
        "tickInterval": interval,
        "value": value,
        "highlightColor": "#e53935",
        "showTickLabels": true
    })
}

fn bar_chart(height: f64, y_min: f64, y_max: f64) -> Value {
    json!({
        "width": 400,
        "height": height,
        "title": "Sales",
        "xAxisLabel": "Month",
        "yAxis": {
            "label": "Units",
            "min": y_min,
            "max": y_max,
            "ticks": 2,
            "showGridLines": true,
            "tickFormat": "plain"
        },
        "data": [{"label": "Jan", "value": y_min, "state": "normal"}],
        "barColor": "#4472c4",
        "highlightColor": "#ed7d31"
    })
}

proptest! {
    #[test]
    fn generation_is_deterministic(
        min in -100.0f64..0.0,
        span in 1.0f64..100.0,
        interval in 0.5f64..20.0,
        t in 0.0f64..=1.0,
    ) {
        let max = min + span;
        let props = number_line(min, max, interval, min + t * span);
        let first = generate("numberLine", &props).unwrap();
        let second = generate("numberLine", &props).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn inverted_or_empty_range_is_invalid_range(
        min in -1000.0f64..1000.0,
        shrink in 0.0f64..500.0,
    ) {
        let max = min - shrink;
        let err = generate("numberLine", &number_line(min, max, 1.0, min)).unwrap_err();
        prop_assert_eq!(err.kind(), "ErrInvalidRange");
    }

    #[test]
    fn degenerate_range_wins_over_a_tiny_canvas(
        width in 0.0f64..60.0,
        height in 0.0f64..80.0,
        min in -100.0f64..100.0,
        shrink in 0.0f64..50.0,
    ) {
        let max = min - shrink;
        let line = json!({
            "width": width,
            "height": height,
            "min": min,
            "max": max,
            "tickInterval": 1,
            "value": min,
            "highlightColor": "#e53935",
            "showTickLabels": true
        });
        let err = generate("numberLine", &line).unwrap_err();
        prop_assert_eq!(err.kind(), "ErrInvalidRange");

        let err = generate("barChart", &bar_chart(height, min, max)).unwrap_err();
        prop_assert_eq!(err.kind(), "ErrInvalidRange");
    }

    #[test]
    fn empty_data_is_invalid_dimensions(
        widget in 0..DATA_WIDGETS.len(),
        width in 0.0f64..4000.0,
        height in 0.0f64..4000.0,
    ) {
        let (relative, field) = DATA_WIDGETS[widget];
        let mut descriptor = fixture(relative);
        descriptor["width"] = json!(width);
        descriptor["height"] = json!(height);
        descriptor[field] = json!([]);
        let err = generate_descriptor(&descriptor).unwrap_err();
        prop_assert_eq!(err.kind(), "ErrInvalidDimensions", "{}", relative);
    }

    #[test]
    fn scales_are_monotonic(
        min in -1e6f64..1e6,
        span in 1e-3f64..1e6,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let max = min + span;
        let scale = LinearScale::new("prop", min, max, 60.0, 460.0).unwrap();
        assert_relative_eq!(scale.map(min), 60.0, epsilon = 1e-6);
        assert_relative_eq!(scale.map(max), 460.0, epsilon = 1e-6);

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (x_lo, x_hi) = (min + lo * span, min + hi * span);
        prop_assert!(scale.map(x_lo) <= scale.map(x_hi));

        // Inverted pixel range, as used by vertical axes.
        let inverted = LinearScale::new("prop", min, max, 300.0, 20.0).unwrap();
        prop_assert!(inverted.map(x_lo) >= inverted.map(x_hi));
    }
}
