use pretty_assertions::assert_eq;
use reposync_fs::{ConfigStore, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Roots {
    build_root: String,
    exclude: Vec<String>,
}

fn sample() -> Roots {
    Roots {
        build_root: "/srv/build".into(),
        exclude: vec![".git".into(), ".vscode".into()],
    }
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(
        &file_path,
        "build_root = \"/srv/build\"\nexclude = [\".git\", \".vscode\"]\n",
    )
    .unwrap();

    let loaded: Roots = ConfigStore::new().load(&file_path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(
        &file_path,
        r#"{"build_root": "/srv/build", "exclude": [".git", ".vscode"]}"#,
    )
    .unwrap();

    let loaded: Roots = ConfigStore::new().load(&file_path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yml");
    fs::write(
        &file_path,
        "build_root: /srv/build\nexclude:\n  - .git\n  - .vscode\n",
    )
    .unwrap();

    let loaded: Roots = ConfigStore::new().load(&file_path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_parse_error_names_format_and_path() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "build_root = [unterminated").unwrap();

    let err = ConfigStore::new().load::<Roots>(&file_path).unwrap_err();
    match err {
        Error::ConfigParse { path, format, .. } => {
            assert_eq!(path, file_path);
            assert_eq!(format, "TOML");
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_unsupported_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.xml");
    fs::write(&file_path, "<manifest/>").unwrap();

    let result: reposync_fs::Result<Roots> = ConfigStore::new().load(&file_path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_roundtrip_toml_creates_parent() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nested").join("config.toml");

    let store = ConfigStore::new();
    store.save(&file_path, &sample()).unwrap();
    let loaded: Roots = store.load(&file_path).unwrap();

    assert_eq!(loaded, sample());
}
