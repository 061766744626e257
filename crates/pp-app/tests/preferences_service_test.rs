mod support;

use std::path::PathBuf;
use std::sync::Arc;

use pp_app::PreferencesService;
use pp_core::{MonitorPreference, UserPreferences};
use pp_infra::FilePreferencesRepository;
use support::InMemoryPreferences;

#[tokio::test]
async fn load_replaces_defaults_with_stored_preferences() {
    let stored = UserPreferences {
        background_image_path: Some(PathBuf::from("/img/bg.png")),
        monitor_preference: MonitorPreference::Primary,
    };
    let service = PreferencesService::new(InMemoryPreferences::with(stored.clone()));
    assert_eq!(service.current(), UserPreferences::default());

    assert_eq!(service.load().await, stored);
    assert_eq!(service.current(), stored);
}

#[tokio::test]
async fn load_failure_falls_back_to_defaults() {
    let port = Arc::new(InMemoryPreferences {
        fail_load: true,
        ..InMemoryPreferences::default()
    });
    let service = PreferencesService::new(port);
    assert_eq!(service.load().await, UserPreferences::default());
}

#[tokio::test]
async fn update_applies_immediately_and_saves_in_background() {
    let port = Arc::new(InMemoryPreferences::default());
    let service = PreferencesService::new(port.clone());

    let save = service.update(|p| p.monitor_preference = MonitorPreference::Secondary);
    assert_eq!(service.current().monitor_preference, MonitorPreference::Secondary);

    save.await.unwrap();
    assert_eq!(port.stored().unwrap().monitor_preference, MonitorPreference::Secondary);
}

#[tokio::test]
async fn save_failure_keeps_the_in_memory_value() {
    let port = Arc::new(InMemoryPreferences {
        fail_save: true,
        ..InMemoryPreferences::default()
    });
    let service = PreferencesService::new(port.clone());

    service
        .update(|p| p.background_image_path = Some(PathBuf::from("/img/a.png")))
        .await
        .unwrap();
    assert_eq!(port.saves(), 1);
    assert_eq!(
        service.current().background_image_path,
        Some(PathBuf::from("/img/a.png"))
    );

    let err = service
        .update_and_save(|p| p.monitor_preference = MonitorPreference::Primary)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("read-only"));
    assert_eq!(service.current().monitor_preference, MonitorPreference::Primary);
}

#[tokio::test]
async fn last_update_wins_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("user-preferences.json");
    let service = PreferencesService::new(Arc::new(FilePreferencesRepository::new(file.clone())));

    let saves: Vec<_> = [
        MonitorPreference::Primary,
        MonitorPreference::Secondary,
        MonitorPreference::Automatic,
        MonitorPreference::Primary,
    ]
    .into_iter()
    .map(|preference| service.update(move |p| p.monitor_preference = preference))
    .collect();
    for save in saves {
        save.await.unwrap();
    }

    let reloaded = PreferencesService::new(Arc::new(FilePreferencesRepository::new(file)));
    assert_eq!(reloaded.load().await.monitor_preference, MonitorPreference::Primary);
}
