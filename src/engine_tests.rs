use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::actions::{
    ChannelPreferences, InstalledPackages, MethodData, StaticPermissions, SIGNAL_PACKAGE,
    WHATSAPP_PACKAGE,
};
use crate::config::RecentConfig;
use crate::customization::{MemoryPreferenceStore, PreferenceChange};
use crate::domains::{
    AppEntry, AppShortcutEntry, DeviceSettingEntry, FileEntry, PhoneNumber,
};

struct Fixture {
    kit: SearchKit,
    store: Arc<MemoryPreferenceStore>,
    _temp: TempDir,
}

fn fixture_with(preferences: Preferences, call_permission: bool) -> Fixture {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(MemoryPreferenceStore::with_preferences(preferences));
    let platform = Platform {
        preferences: store.clone(),
        packages: Arc::new(InstalledPackages::new([WHATSAPP_PACKAGE, SIGNAL_PACKAGE])),
        permissions: Arc::new(StaticPermissions {
            call_phone: call_permission,
            read_contacts: true,
        }),
    };
    let recent = RecentLedger::with_path(temp.path().join("recent.json"), &RecentConfig::default());
    let mut config = Config::default();
    config.files.excluded_extensions = vec!["log".to_string()];
    let kit = SearchKit::new(&config, platform, recent);

    kit.apps().replace_candidates(vec![
        AppEntry::new("com.android.camera", "Camera"),
        AppEntry::new("com.instagram.android", "Instagram"),
        AppEntry::new("com.google.android.apps.maps", "Maps")
            .with_description("Navigation and transit"),
    ]);

    let mut john = ContactEntry::new(1, "John Smith");
    john.phone_numbers = vec![PhoneNumber {
        number: "+14155550123".to_string(),
        label: Some("mobile".to_string()),
        row_ids: vec![10, 11],
    }];
    john.methods = vec![
        ContactMethod::Phone(MethodData::new("+14155550123", Some(10))),
        ContactMethod::Sms(MethodData::new("+14155550123", Some(10))),
        ContactMethod::WhatsAppCall(MethodData::new("14155550123@s.whatsapp.net", Some(11))),
    ];
    kit.contacts().replace_candidates(vec![
        john,
        ContactEntry::new(2, "Workman Bakery"),
        ContactEntry::new(3, "Camille"),
    ]);

    kit.settings().replace_candidates(vec![
        DeviceSettingEntry::new("wifi", "Wi-Fi", "android.settings.WIFI_SETTINGS"),
        DeviceSettingEntry::new("camera_perm", "Camera permissions", "android.settings.APP"),
    ]);
    kit.shortcuts().replace_candidates(vec![AppShortcutEntry::new(
        "com.android.camera",
        "selfie",
        "Take selfie",
        "Camera",
    )]);
    kit.files().replace_candidates(vec![
        FileEntry::new("content://media/1", "camera_roll.zip", "Download/camera_roll.zip"),
        FileEntry::new("content://media/2", "camera.log", "Download/camera.log"),
    ]);

    Fixture {
        kit,
        store,
        _temp: temp,
    }
}

fn fixture() -> Fixture {
    fixture_with(Preferences::default(), false)
}

fn names(entities: &[SearchableEntity]) -> Vec<&str> {
    entities.iter().map(SearchableEntity::display_name).collect()
}

#[test]
fn test_camera_starts_with_and_instagram_excluded() {
    let f = fixture();
    let results = f.kit.search(Domain::Apps, "cam");
    assert_eq!(names(&results), vec!["Camera"]);
}

#[test]
fn test_search_all_order_and_domain_rules() {
    let f = fixture();
    let sections = f.kit.search_all("cam");
    let domains: Vec<Domain> = sections.iter().map(|s| s.domain).collect();
    assert_eq!(
        domains,
        vec![
            Domain::Apps,
            Domain::Shortcuts,
            Domain::Contacts,
            Domain::Settings,
            Domain::Files
        ]
    );
    // camera.log is excluded by extension
    let files = &sections[4].results;
    assert_eq!(names(files), vec!["camera_roll.zip"]);
}

#[test]
fn test_nickname_outranks_starts_with() {
    let f = fixture();
    f.kit
        .set_nickname(Domain::Contacts, &IdentityKey::contact(1), Some("work phone"))
        .unwrap();
    let results = f.kit.search(Domain::Contacts, "work");
    assert_eq!(names(&results), vec!["John Smith", "Workman Bakery"]);
}

#[test]
fn test_exclude_hides_and_lists_for_restore() {
    let f = fixture();
    let camera = IdentityKey::new("com.android.camera");
    f.kit.pin(Domain::Apps, &camera).unwrap();
    f.kit
        .pin(Domain::Apps, &IdentityKey::new("com.google.android.apps.maps"))
        .unwrap();
    f.kit.exclude(Domain::Apps, &camera).unwrap();

    assert!(f.kit.search(Domain::Apps, "cam").is_empty());
    let (pinned, excluded) = f.kit.pinned_and_excluded(Domain::Apps);
    assert_eq!(names(&pinned), vec!["Maps"]);
    assert_eq!(names(&excluded), vec!["Camera"]);

    assert_eq!(
        f.kit.pin(Domain::Apps, &camera).unwrap(),
        MutationOutcome::Rejected(crate::customization::RejectReason::ExcludedKey)
    );
    f.kit.include(Domain::Apps, &camera).unwrap();
    assert_eq!(names(&f.kit.search(Domain::Apps, "cam")), vec!["Camera"]);
    assert!(f
        .store
        .changes()
        .contains(&PreferenceChange::Included {
            domain: Domain::Apps,
            key: camera
        }));
}

#[test]
fn test_short_query_returns_nothing() {
    let f = fixture();
    assert!(f.kit.search_all("c").is_empty());
    assert!(f.kit.search_all("   ").is_empty());
}

#[test]
fn test_disabled_settings_at_runtime() {
    let f = fixture();
    assert_eq!(names(&f.kit.search(Domain::Settings, "wi")), vec!["Wi-Fi"]);
    f.kit.set_disabled_settings(vec!["wifi".to_string()]);
    assert!(f.kit.search(Domain::Settings, "wi").is_empty());
}

#[test]
fn test_preferences_restored_from_store() {
    let mut prefs = Preferences::default();
    prefs.apply(&PreferenceChange::Excluded {
        domain: Domain::Apps,
        key: IdentityKey::new("com.android.camera"),
    });
    prefs.apply(&PreferenceChange::MessagingApp {
        app: MessagingApp::WhatsApp,
    });
    let f = fixture_with(prefs, false);
    assert!(f.kit.search(Domain::Apps, "cam").is_empty());
    assert_eq!(f.kit.channels().messaging_app(), MessagingApp::WhatsApp);
}

#[test]
fn test_message_intent_falls_back_to_sms() {
    let mut prefs = Preferences::default();
    prefs.channels = ChannelPreferences {
        messaging_app: MessagingApp::WhatsApp,
        ..ChannelPreferences::default()
    };
    let f = fixture_with(prefs, false);
    let john = f.kit.contacts().get(&IdentityKey::contact(1)).unwrap();

    // John has WhatsApp calling but no WhatsApp messaging row
    assert_eq!(f.kit.resolve_messaging_channel(&john), MessagingApp::Messages);
    let intent = f.kit.message_intent(&john).unwrap();
    assert_eq!(intent.uri, "smsto:+14155550123");
}

#[test]
fn test_app_call_parks_until_permission() {
    let f = fixture();
    let john = f.kit.contacts().get(&IdentityKey::contact(1)).unwrap();

    let launch = f
        .kit
        .app_call(&john, CallingApp::WhatsApp, Some("4155550123"), false)
        .unwrap();
    assert_eq!(launch, CallLaunch::AwaitingPermission(Permission::CallPhone));

    let intent = f.kit.on_call_permission_result(true).unwrap();
    assert_eq!(intent.uri, "content://com.android.contacts/data/11");
    assert_eq!(
        f.kit.on_call_permission_result(true),
        Err(ActionFailure::NoPendingAction)
    );
}

#[test]
fn test_app_call_launches_directly_with_permission() {
    let f = fixture_with(Preferences::default(), true);
    let john = f.kit.contacts().get(&IdentityKey::contact(1)).unwrap();
    let launch = f
        .kit
        .app_call(&john, CallingApp::WhatsApp, None, false)
        .unwrap();
    assert!(matches!(launch, CallLaunch::Launch(intent) if intent.package.as_deref() == Some(WHATSAPP_PACKAGE)));
}

#[test]
fn test_recent_round_trip_through_engine() {
    let f = fixture();
    f.kit.record_recent(RecentEntry::query("camera"));
    let contact = f.kit.search(Domain::Contacts, "john");
    let entry = RecentEntry::from_entity(&contact[0]).unwrap();
    f.kit.record_recent(entry.clone());

    assert_eq!(f.kit.recent(), vec![entry.clone(), RecentEntry::query("camera")]);
    assert!(f.kit.delete_recent(&entry));
    assert_eq!(f.kit.recent(), vec![RecentEntry::query("camera")]);
    assert!(f._temp.path().join("recent.json").exists());
}

#[test]
fn test_start_call_single_number_prompts_first() {
    let f = fixture();
    let john = f.kit.contacts().get(&IdentityKey::contact(1)).unwrap();
    let mut flow = f.kit.start_call(&john);
    assert_eq!(
        flow.start().unwrap(),
        crate::actions::CallFlowStep::PromptDirectDial {
            number: "+14155550123".to_string()
        }
    );
}

#[test]
fn test_replace_candidates_from_mixed_list() {
    let f = fixture();
    let mixed = vec![
        SearchableEntity::App(AppEntry::new("com.spotify.music", "Spotify")),
        SearchableEntity::Contact(ContactEntry::new(9, "Spot Welder")),
    ];
    assert!(f.kit.replace_candidates(Domain::Apps, mixed));
    assert_eq!(names(&f.kit.search(Domain::Apps, "spo")), vec!["Spotify"]);
    assert!(f.kit.search(Domain::Apps, "cam").is_empty());
}
