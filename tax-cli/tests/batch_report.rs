//! Batch comparison from an on-disk CSV through to the rendered table.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tax_cli::config::AppConfig;
use tax_cli::report::BatchReport;
use tax_core::Regime;
use tax_data::ProfileLoader;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn batch_fixture_renders_one_row_per_profile() {
    let engine = AppConfig::default().build_engine().unwrap();
    let profiles = ProfileLoader::load_from_file(&fixture_path("batch.csv")).unwrap();

    let rows: Vec<_> = profiles
        .into_iter()
        .map(|p| (p.label, engine.compare_regimes(&p.profile).unwrap()))
        .collect();

    let recommended: Vec<_> = rows.iter().map(|(_, c)| c.recommended).collect();
    assert_eq!(recommended, vec![Regime::Old, Regime::New, Regime::Old]);

    let text = BatchReport(&rows).to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Profile"));
    assert!(lines[2].starts_with("mid-career"));
    assert!(lines[2].contains("₹65,000"), "got: {}", lines[2]);
    assert!(lines[2].contains("₹28,600"), "got: {}", lines[2]);
    assert!(lines[2].ends_with("new (saves ₹36,400)"), "got: {}", lines[2]);
}
