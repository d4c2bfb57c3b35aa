use std::sync::Arc;

use woohoo_client::config::ServiceDelays;
use woohoo_client::services::MockBackend;
use woohoo_client::storage::{FileStore, KeyValueStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
use woohoo_client::woohoo_protocol::{ProtoType, User};
use woohoo_client::{ClientConfig, Route, WoohooApp, WoohooEvent};

fn instant_config() -> ClientConfig {
    ClientConfig {
        delays: ServiceDelays::none(),
        scan_success_rate: 1.0,
        ..Default::default()
    }
}

fn routes(events: &[WoohooEvent]) -> Vec<Route> {
    events
        .iter()
        .filter_map(|event| match event {
            WoohooEvent::Navigate(route) => Some(*route),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_full_onboarding_then_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
    let mut app = WoohooApp::with_parts(instant_config(), storage.clone(), Arc::new(MockBackend::instant()));
    assert_eq!(app.route(), Route::Phone);

    app.submit_phone("5551234567").await.unwrap();
    assert!(app.submit_code("123").await.is_err());
    app.submit_code("123456").await.unwrap();
    assert_eq!(app.auth().token(), Some("mock-auth-token"));
    assert!(!app.auth().is_authenticated());

    app.submit_name("Sam").unwrap();
    assert!(app.submit_username("sam smith").is_err());
    app.submit_username("sam_smith").unwrap();
    app.submit_profile_pic(Some("file:///photos/me.jpg"));

    app.picker_mut().toggle("8");
    app.picker_mut().toggle("9");
    assert_eq!(app.submit_friends().await, 2);
    app.finish_onboarding();

    assert!(app.auth().is_authenticated());
    assert_eq!(app.friends().friends.len(), 2);
    assert_eq!(
        routes(&app.pump()),
        vec![
            Route::Code,
            Route::Name,
            Route::Username,
            Route::ProfilePic,
            Route::AddFriends,
            Route::FriendsInfo,
            Route::FeedTab,
        ]
    );

    let stored = storage.get(USER_DATA_KEY).unwrap().unwrap();
    let user = User::from_json_str(&stored).unwrap();
    assert_eq!(user.name.as_deref(), Some("Sam"));
    assert_eq!(user.username.as_deref(), Some("sam_smith"));
    assert_eq!(user.profile_pic.as_deref(), Some("file:///photos/me.jpg"));

    // a second launch picks up the stored session from disk
    let restored = WoohooApp::new(ClientConfig {
        storage_path: Some(path.clone()),
        ..instant_config()
    });
    assert!(restored.auth().is_authenticated());
    assert_eq!(restored.route(), Route::FeedTab);
    assert_eq!(restored.auth().user(), Some(&user));

    let mut restored = restored;
    restored.logout().await;
    assert!(!restored.auth().is_authenticated());
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(reopened.get(USER_DATA_KEY).unwrap(), None);
    assert!(restored.pump().contains(&WoohooEvent::LoggedOut));
}

#[tokio::test]
async fn test_tap_lands_on_top_of_feed() {
    let mut app = WoohooApp::new(instant_config());
    app.submit_name("Sam").unwrap();
    app.finish_onboarding();
    app.pump();

    let seeded = app.feed();
    assert_eq!(seeded.len(), 7);

    let record = app.tap_phones().await.unwrap();
    assert_eq!(record.user1.name, "Sam");
    assert_eq!(record.user2.name, "Alexis");
    assert_eq!(record.location, "Pine Crest School");

    let feed = app.refresh_feed().await;
    assert_eq!(feed.len(), 8);
    assert_eq!(feed[0].id, record.id);

    let events = app.pump();
    assert_eq!(routes(&events), vec![Route::Loading, Route::FeedTab]);
    assert!(events.contains(&WoohooEvent::WoohooCreated(record.clone())));

    app.delete_woohoo(&record.id).await.unwrap();
    assert_eq!(app.feed(), seeded);
}

#[tokio::test]
async fn test_damaged_storage_starts_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"@Woohoo:auth_token": "mock-auth-tok"#).unwrap();

    let mut app = WoohooApp::new(ClientConfig {
        storage_path: Some(path.clone()),
        ..instant_config()
    });
    assert!(!app.auth().is_authenticated());
    assert_eq!(app.route(), Route::Phone);

    // onboarding again replaces the damaged file
    app.submit_phone("5551234567").await.unwrap();
    app.submit_code("123456").await.unwrap();
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("mock-auth-token"));
}

#[tokio::test]
async fn test_unreadable_storage_starts_signed_out() {
    let dir = tempfile::tempdir().unwrap();

    let app = WoohooApp::new(ClientConfig {
        storage_path: Some(dir.path().to_path_buf()),
        ..instant_config()
    });
    assert!(!app.auth().is_authenticated());
    assert_eq!(app.route(), Route::Phone);
}
