use std::path::PathBuf;

use pp_core::ports::PreferencesPort;
use pp_core::{MonitorPreference, UserPreferences};
use pp_infra::FilePreferencesRepository;

#[tokio::test]
async fn missing_file_loads_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = FilePreferencesRepository::new(tmp.path().join("user-preferences.json"));

    assert_eq!(repo.load().await.unwrap(), UserPreferences::default());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("user-preferences.json");
    let repo = FilePreferencesRepository::new(&path);

    let prefs = UserPreferences {
        background_image_path: Some(PathBuf::from("/pictures/stage.png")),
        monitor_preference: MonitorPreference::Secondary,
    };
    repo.save(&prefs).await.unwrap();

    assert_eq!(repo.load().await.unwrap(), prefs);
    // A fresh repository over the same file sees the same data.
    assert_eq!(FilePreferencesRepository::new(&path).load().await.unwrap(), prefs);
}

#[tokio::test]
async fn saved_document_is_pretty_printed_camel_case() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("user-preferences.json");
    let repo = FilePreferencesRepository::new(&path);

    repo.save(&UserPreferences::default()).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains('\n'), "expected pretty JSON: {content}");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value["backgroundImagePath"].is_null());
    assert_eq!(value["monitorPreference"], "Automatic");
}

#[tokio::test]
async fn corrupt_file_loads_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("user-preferences.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let repo = FilePreferencesRepository::new(&path);
    assert_eq!(repo.load().await.unwrap(), UserPreferences::default());
}

#[tokio::test]
async fn unknown_enum_value_loads_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("user-preferences.json");
    std::fs::write(&path, r#"{"monitorPreference":"Tertiary"}"#).unwrap();

    let repo = FilePreferencesRepository::new(&path);
    assert_eq!(repo.load().await.unwrap(), UserPreferences::default());
}

#[tokio::test]
async fn concurrent_saves_leave_a_complete_document() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("user-preferences.json");
    let repo = std::sync::Arc::new(FilePreferencesRepository::new(&path));

    let mut handles = Vec::new();
    for pref in [
        MonitorPreference::Primary,
        MonitorPreference::Secondary,
        MonitorPreference::Automatic,
    ] {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.save(&UserPreferences {
                background_image_path: None,
                monitor_preference: pref,
            })
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let loaded = repo.load().await.unwrap();
    assert!(MonitorPreference::all().contains(&loaded.monitor_preference));
    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
