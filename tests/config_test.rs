//! Tests for layered settings loading

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use xmlmodel::config::Settings;
use xmlmodel::infrastructure::InfraError;

fn write_toml(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_files_when_loading_then_defaults() {
    let settings = Settings::load_from(None, None).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_global_file_when_loading_then_defaults() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("absent.toml");

    let settings = Settings::load_from(Some(&global), None).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_file_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let global = write_toml(&temp, "global.toml", "indent_width = 4\n");

    let settings = Settings::load_from(Some(&global), None).unwrap();

    assert_eq!(settings.indent_width, 4);
    assert_eq!(settings.output, PathBuf::from("output.xml"));
}

#[test]
fn given_explicit_file_when_loading_then_wins_over_global() {
    let temp = TempDir::new().unwrap();
    let global = write_toml(&temp, "global.toml", "indent_width = 4\noutput = \"a.xml\"\n");
    let explicit = write_toml(&temp, "explicit.toml", "output = \"b.xml\"\n");

    let settings = Settings::load_from(Some(&global), Some(&explicit)).unwrap();

    assert_eq!(settings.indent_width, 4);
    assert_eq!(settings.output, PathBuf::from("b.xml"));
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("absent.toml");

    let result = Settings::load_from(None, Some(&explicit));

    assert!(matches!(result, Err(InfraError::Config { .. })));
}

#[test]
fn given_malformed_value_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let explicit = write_toml(&temp, "bad.toml", "indent_width = \"wide\"\n");

    let result = Settings::load_from(None, Some(&explicit));

    assert!(matches!(result, Err(InfraError::Config { .. })));
}

#[test]
fn given_empty_output_when_loading_then_rejected() {
    let temp = TempDir::new().unwrap();
    let explicit = write_toml(&temp, "empty.toml", "output = \"\"\n");

    let result = Settings::load_from(None, Some(&explicit));

    assert!(matches!(result, Err(InfraError::Config { ref message }) if message.contains("output")));
}

#[test]
fn given_settings_when_building_renderer_then_indent_width_used() {
    let settings = Settings {
        indent_width: 3,
        ..Settings::default()
    };
    let document = {
        let mut document = xmlmodel::domain::Document::new("plano").unwrap();
        let root = document.root();
        document.tree_mut().append_child(root, "curso").unwrap();
        document
    };

    assert_eq!(
        document.render_with(&settings.renderer()),
        "<plano >\n   <curso />\n</plano>"
    );
}
