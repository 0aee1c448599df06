use std::fs;
use std::process;

use assessment_widgets::registry::{entries, lookup};
use assessment_widgets::render::escape;
use assessment_widgets::schema::integrity::check_registry;
use assessment_widgets::{descriptor_json_schema, generate_descriptor, json_schemas};
use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use rayon::prelude::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["schemas", out_dir] => schemas(Utf8Path::new(out_dir)),
        ["gallery", fixtures, out_file] => gallery(Utf8Path::new(fixtures), Utf8Path::new(out_file)),
        ["check", fixtures] => check(Utf8Path::new(fixtures)),
        _ => {
            eprintln!("Usage: cargo xtask <command>");
            eprintln!("Commands:");
            eprintln!("  schemas <out-dir>                 Write props and descriptor JSON Schemas");
            eprintln!("  gallery <fixtures-dir> <out-file> Render every fixture into one HTML page");
            eprintln!("  check <fixtures-dir>              Registry and fixture integrity check");
            process::exit(1);
        }
    }
}

/// One descriptor file under `<fixtures-dir>/<type>/`
struct Fixture {
    path: Utf8PathBuf,
    widget_type: String,
    descriptor: Value,
}

fn collect_fixtures(root: &Utf8Path) -> Result<Vec<Fixture>> {
    let mut dirs: Vec<Utf8PathBuf> = root
        .read_dir_utf8()
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {root}"))?
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut fixtures = Vec::new();
    for dir in dirs {
        let widget_type = dir.file_name().unwrap_or_default().to_string();
        let mut files: Vec<Utf8PathBuf> = dir
            .read_dir_utf8()
            .into_diagnostic()?
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.extension() == Some("json"))
            .collect();
        files.sort();
        for path in files {
            let text = fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {path}"))?;
            let descriptor: Value = serde_json::from_str(&text)
                .into_diagnostic()
                .wrap_err_with(|| format!("parsing {path}"))?;
            fixtures.push(Fixture {
                path,
                widget_type: widget_type.clone(),
                descriptor,
            });
        }
    }
    Ok(fixtures)
}

fn write_json(path: &Utf8Path, value: &Value) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).into_diagnostic()?;
    text.push('\n');
    fs::write(path, text)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {path}"))
}

fn schemas(out_dir: &Utf8Path) -> Result<()> {
    fs::create_dir_all(out_dir).into_diagnostic()?;
    for (widget_type, schema) in json_schemas() {
        write_json(&out_dir.join(format!("{widget_type}.schema.json")), &schema)?;
        let descriptor = descriptor_json_schema(widget_type)?;
        write_json(
            &out_dir.join(format!("{widget_type}.descriptor.schema.json")),
            &descriptor,
        )?;
    }
    eprintln!("Wrote {} schema pairs to {out_dir}", entries().len());
    Ok(())
}

fn gallery(fixtures_dir: &Utf8Path, out_file: &Utf8Path) -> Result<()> {
    let fixtures = collect_fixtures(fixtures_dir)?;
    let rendered: Vec<(&Fixture, Result<String, String>)> = fixtures
        .par_iter()
        .map(|f| {
            let out = generate_descriptor(&f.descriptor).map_err(|e| format!("{} ({})", e, e.kind()));
            (f, out)
        })
        .collect();

    let failed = rendered.iter().filter(|(_, r)| r.is_err()).count();
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Widget gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 24px; background: #f4f4f4; color: #333; }
        section { background: #fff; border-radius: 6px; padding: 16px; margin-bottom: 16px; }
        h2 { font-size: 14px; font-weight: 600; margin: 0 0 12px; }
        pre.error { color: #b00020; white-space: pre-wrap; }
        table { border-collapse: collapse; }
        th, td { border: 1px solid #ccc; padding: 4px 8px; }
    </style>
</head>
<body>
"#,
    );
    html.push_str(&format!(
        "<h1>{} fixtures, {} failed</h1>\n",
        rendered.len(),
        failed
    ));
    for (fixture, result) in &rendered {
        html.push_str("<section>\n");
        html.push_str(&format!(
            "<h2>{} <small>{}</small></h2>\n",
            escape(&fixture.widget_type),
            escape(fixture.path.as_str())
        ));
        match result {
            Ok(fragment) => html.push_str(fragment),
            Err(message) => html.push_str(&format!("<pre class=\"error\">{}</pre>", escape(message))),
        }
        html.push_str("\n</section>\n");
    }
    html.push_str("</body>\n</html>\n");

    fs::write(out_file, html)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {out_file}"))?;
    eprintln!("Wrote {out_file} ({} fixtures, {failed} failed)", rendered.len());
    Ok(())
}

fn check(fixtures_dir: &Utf8Path) -> Result<()> {
    let fixtures = collect_fixtures(fixtures_dir)?;
    let mut problems: Vec<String> = check_registry()
        .into_iter()
        .map(|i| format!("{}: {}", i.widget_type, i.message))
        .collect();

    for entry in entries() {
        if !fixtures.iter().any(|f| f.widget_type == entry.type_name) {
            problems.push(format!("{}: no fixtures", entry.type_name));
        }
    }

    let fixture_problems: Vec<String> = fixtures
        .par_iter()
        .filter_map(|f| {
            let declared = f.descriptor.get("type").and_then(Value::as_str);
            if declared != Some(f.widget_type.as_str()) {
                return Some(format!("{}: filed under `{}/` but declares {declared:?}", f.path, f.widget_type));
            }
            let mut props = f.descriptor.clone();
            if let Some(fields) = props.as_object_mut() {
                fields.remove("type");
            }
            let entry = match lookup(&f.widget_type) {
                Ok(entry) => entry,
                Err(e) => return Some(format!("{}: {e}", f.path)),
            };
            entry.validate(&props).err().map(|e| format!("{}: {e}", f.path))
        })
        .collect();
    problems.extend(fixture_problems);

    if problems.is_empty() {
        eprintln!(
            "{} widget types, {} fixtures: ok",
            entries().len(),
            fixtures.len()
        );
        return Ok(());
    }
    for p in &problems {
        eprintln!("  - {p}");
    }
    Err(miette!("{} integrity problem(s)", problems.len()))
}
