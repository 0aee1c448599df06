//! Registry-wide checks: every widget has fixtures, no schema has optional
//! fields, and the typed and JSON-Schema views accept the same inputs.

use std::fs;
use std::path::{Path, PathBuf};

use assessment_widgets::registry::entries;
use assessment_widgets::schema::integrity::check_registry;
use assessment_widgets::{Schema, json_schemas, typed_schemas};
use serde_json::{Number, Value};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Fixture descriptors are `.json`; rendered expectations sit beside them.
fn is_descriptor(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// (type tag, props) for every fixture, with the tag split off.
fn fixture_props() -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for entry in entries() {
        let dir = fixtures_dir().join(entry.type_name);
        let Ok(files) = fs::read_dir(&dir) else {
            continue;
        };
        let mut paths: Vec<PathBuf> = files
            .filter_map(|f| f.ok())
            .map(|f| f.path())
            .filter(|p| is_descriptor(p))
            .collect();
        paths.sort();
        for path in paths {
            let text = fs::read_to_string(&path).unwrap();
            let mut descriptor: Value = serde_json::from_str(&text).unwrap();
            descriptor.as_object_mut().unwrap().remove("type");
            out.push((entry.type_name.to_string(), descriptor));
        }
    }
    out
}

#[test]
fn every_registered_type_has_a_fixture() {
    let missing: Vec<&str> = entries()
        .iter()
        .map(|e| e.type_name)
        .filter(|t| {
            fs::read_dir(fixtures_dir().join(t))
                .map(|files| !files.filter_map(|f| f.ok()).any(|f| is_descriptor(&f.path())))
                .unwrap_or(true)
        })
        .collect();
    assert!(missing.is_empty(), "types without fixtures: {missing:?}");
}

#[test]
fn schemas_have_no_optional_fields_and_round_trip() {
    let issues = check_registry();
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn fixtures_validate_identically_under_both_views() {
    let typed = typed_schemas();
    let exported = json_schemas();
    for (widget_type, props) in fixture_props() {
        let from_json = Schema::from_json_schema(&exported[widget_type.as_str()]).unwrap();
        let direct = typed[widget_type.as_str()].validate(&props);
        assert!(direct.is_empty(), "{widget_type}: {direct:?}");
        assert_eq!(direct, from_json.validate(&props), "{widget_type}");
    }
}

#[test]
fn broken_fixtures_fail_identically_under_both_views() {
    let typed = typed_schemas();
    let exported = json_schemas();
    for (widget_type, mut props) in fixture_props() {
        let fields = props.as_object_mut().unwrap();
        let first = fields.keys().next().cloned().unwrap();
        fields.remove(&first);
        fields.insert("unexpectedKey".to_string(), Value::Bool(true));

        let from_json = Schema::from_json_schema(&exported[widget_type.as_str()]).unwrap();
        let direct = typed[widget_type.as_str()].validate(&props);
        let paths: Vec<&str> = direct.iter().map(|i| i.path.as_str()).collect();
        assert!(paths.contains(&first.as_str()), "{widget_type}: {paths:?}");
        assert!(paths.contains(&"unexpectedKey"), "{widget_type}: {paths:?}");
        assert_eq!(direct, from_json.validate(&props), "{widget_type}");
    }
}

/// Apply `f` to every number inside `value`.
fn map_numbers(value: &Value, f: &dyn Fn(&Number) -> Value) -> Value {
    match value {
        Value::Number(n) => f(n),
        Value::Array(items) => Value::Array(items.iter().map(|v| map_numbers(v, f)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), map_numbers(v, f)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[test]
fn exported_schemas_agree_with_an_independent_validator() {
    let typed = typed_schemas();
    let exported = json_schemas();
    let as_float = |n: &Number| Value::from(n.as_f64().unwrap());
    let off_by_half = |n: &Number| Value::from(n.as_f64().unwrap() + 0.5);

    for (widget_type, props) in fixture_props() {
        let validator = jsonschema::validator_for(&exported[widget_type.as_str()]).unwrap();
        let schema = &typed[widget_type.as_str()];

        let mut broken = props.clone();
        if let Some(fields) = broken.as_object_mut() {
            fields.insert("unexpectedKey".to_string(), Value::Bool(true));
        }
        let variants = [
            ("as written", props.clone()),
            ("integers as floats", map_numbers(&props, &as_float)),
            ("numbers off by half", map_numbers(&props, &off_by_half)),
            ("stray key", broken),
        ];
        for (label, candidate) in variants {
            let direct = schema.validate(&candidate);
            assert_eq!(
                direct.is_empty(),
                validator.is_valid(&candidate),
                "{widget_type} ({label}): direct issues {direct:?}"
            );
        }
    }
}
