use std::sync::{Arc, Barrier};
use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::customization::{CustomizationOverlay, MemoryPreferenceStore};
use crate::search::{priority_with_tokens, MatchPriority};

fn overlay() -> Arc<CustomizationOverlay> {
    Arc::new(CustomizationOverlay::empty(Arc::new(MemoryPreferenceStore::new())))
}

fn apps_handler(overlay: Arc<CustomizationOverlay>) -> AppSearchHandler {
    let handler = AppSearchHandler::new(overlay, AppFilter, 2, None);
    handler.replace_candidates(vec![
        AppEntry::new("com.android.camera", "Camera"),
        AppEntry::new("com.instagram.android", "Instagram"),
        AppEntry::new("com.example.camscanner", "CamScanner"),
        AppEntry::new("com.example.cc", "Cloud Camera"),
        AppEntry::new("com.example.notes", "Notes").with_description("Capture ideas with camera"),
    ]);
    handler
}

fn labels(items: &[Arc<AppEntry>]) -> Vec<&str> {
    items.iter().map(|a| a.label.as_str()).collect()
}

#[test]
fn test_results_ordered_by_tier_then_name() {
    let handler = apps_handler(overlay());
    let ranked = handler.search_ranked("cam");
    let pairs: Vec<(&str, MatchPriority)> = ranked
        .iter()
        .map(|m| (m.item.label.as_str(), m.priority))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Camera", MatchPriority::StartsWith),
            ("CamScanner", MatchPriority::StartsWith),
            ("Cloud Camera", MatchPriority::SecondWordStartsWith),
        ]
    );
}

#[test]
fn test_exact_match_beats_prefix() {
    let handler = apps_handler(overlay());
    assert_eq!(labels(&handler.search("camera")), vec!["Camera", "Cloud Camera"]);
}

#[test]
fn test_token_aware_multi_word_query() {
    let handler = apps_handler(overlay());
    // Neither a prefix nor a second-word prefix, but every word is present
    assert_eq!(labels(&handler.search("ideas capture")), vec!["Notes"]);
}

#[test]
fn test_empty_cache_returns_empty() {
    let handler = AppSearchHandler::new(overlay(), AppFilter, 2, None);
    assert!(!handler.is_loaded());
    assert!(handler.search("camera").is_empty());
    let state = handler.state("camera");
    assert!(state.pinned.is_empty() && state.excluded.is_empty() && state.results.is_empty());
}

#[test]
fn test_state_lists_are_alphabetic() {
    let overlay = overlay();
    let handler = apps_handler(overlay.clone());
    for key in ["com.instagram.android", "com.android.camera", "com.example.cc"] {
        overlay.pin(Domain::Apps, &IdentityKey::new(key)).unwrap();
    }
    overlay
        .set_nickname(Domain::Apps, &IdentityKey::new("com.example.cc"), Some("aaa"))
        .unwrap();
    overlay
        .exclude(Domain::Apps, &IdentityKey::new("com.example.notes"))
        .unwrap();

    let state = handler.state("ca");
    assert_eq!(labels(&state.pinned), vec!["Camera", "Cloud Camera", "Instagram"]);
    assert_eq!(labels(&state.excluded), vec!["Notes"]);
    assert!(!labels(&state.results).contains(&"Notes"));
}

#[test]
fn test_limit_truncates() {
    let handler = AppSearchHandler::new(overlay(), AppFilter, 2, Some(2));
    handler.replace_candidates(
        (0..10)
            .map(|i| AppEntry::new(format!("pkg.{}", i), format!("Cam {}", i)))
            .collect(),
    );
    assert_eq!(labels(&handler.search("cam")), vec!["Cam 0", "Cam 1"]);
}

#[test]
fn test_settings_match_keywords_and_respect_disabled_ids() {
    let handler = SettingSearchHandler::new(overlay(), SettingFilter::default(), 2, Some(6));
    let mut bluetooth = DeviceSettingEntry::new("bt", "Bluetooth", "android.settings.BLUETOOTH");
    bluetooth.keywords = vec!["pairing".to_string()];
    handler.replace_candidates(vec![bluetooth]);

    assert_eq!(handler.search("pair").len(), 1);
    handler.update_filter(|f| f.set_disabled_ids(["bt"]));
    assert!(handler.search("pair").is_empty());
}

#[test]
fn test_shortcut_disabled_by_composite_key() {
    let handler = ShortcutSearchHandler::new(
        overlay(),
        ShortcutFilter::new(["com.maps/home"]),
        2,
        Some(6),
    );
    handler.replace_candidates(vec![
        AppShortcutEntry::new("com.maps", "home", "Navigate home", "Maps"),
        AppShortcutEntry::new("com.maps", "work", "Navigate to work", "Maps"),
    ]);
    let results = handler.search("navigate");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].shortcut_id, "work");
}

#[test]
fn test_files_match_stem_exactly() {
    let handler = FileSearchHandler::new(overlay(), FileFilter::default(), 2, Some(6));
    handler.replace_candidates(vec![
        FileEntry::new("content://1", "invoice.pdf", "Download/invoice.pdf"),
        FileEntry::new("content://2", "invoice_2023.pdf", "Download/invoice_2023.pdf"),
    ]);
    let ranked = handler.search_ranked("invoice");
    assert_eq!(ranked[0].item.name, "invoice.pdf");
    assert_eq!(ranked[0].priority, MatchPriority::ExactMatch);
    assert_eq!(ranked[1].priority, MatchPriority::StartsWith);
}

#[test]
fn test_get_by_identity() {
    let handler = apps_handler(overlay());
    let camera = handler.get(&IdentityKey::new("com.android.camera")).unwrap();
    assert_eq!(camera.label, "Camera");
    assert!(handler.get(&IdentityKey::new("missing")).is_none());
}

// ============================================
// Refresh ordering
// ============================================

#[test]
fn test_stale_refresh_is_discarded() {
    let handler = apps_handler(overlay());
    let older = handler.begin_refresh();
    let newer = handler.begin_refresh();

    assert!(handler.commit_refresh(newer, vec![AppEntry::new("new.pkg", "Newest")]));
    assert!(!handler.commit_refresh(older, vec![AppEntry::new("old.pkg", "Stale")]));
    assert_eq!(labels(&handler.search("newest")), vec!["Newest"]);
    assert!(handler.search("stale").is_empty());
}

struct SlowSource {
    gate: Arc<Barrier>,
    label: &'static str,
}

impl CandidateSource<AppEntry> for SlowSource {
    fn load_candidates(&self) -> anyhow::Result<Vec<AppEntry>> {
        self.gate.wait();
        Ok(vec![AppEntry::new("pkg.slow", self.label)])
    }
}

#[test]
fn test_background_refresh_ordered_by_issue() {
    let handler = apps_handler(overlay());
    let gate = Arc::new(Barrier::new(2));
    let slow = handler.refresh_in_background(Arc::new(SlowSource {
        gate: gate.clone(),
        label: "Slow result",
    }));

    // Issued later, completes first
    let fast = || -> anyhow::Result<Vec<AppEntry>> {
        Ok(vec![AppEntry::new("pkg.fast", "Fast result")])
    };
    assert!(handler.refresh_from(&fast));
    gate.wait();
    assert!(!slow.join().unwrap());

    assert_eq!(labels(&handler.search("fast")), vec!["Fast result"]);
    assert!(handler.search("slow").is_empty());
}

#[test]
fn test_failed_refresh_keeps_previous_list() {
    let handler = apps_handler(overlay());
    let failed = handler.refresh_from(&|| -> anyhow::Result<Vec<AppEntry>> {
        anyhow::bail!("package manager unavailable")
    });
    assert!(!failed);
    assert_eq!(handler.candidate_count(), 5);
}

#[test]
fn test_readers_see_whole_snapshots_during_refresh() {
    let handler = Arc::new(apps_handler(overlay()));
    let writer = {
        let handler = handler.clone();
        std::thread::spawn(move || {
            for round in 0..20 {
                let items = (0..50)
                    .map(|i| AppEntry::new(format!("p.{}.{}", round, i), format!("Cam {}", i)))
                    .collect();
                handler.replace_candidates(items);
                std::thread::sleep(Duration::from_millis(1));
            }
        })
    };
    for _ in 0..50 {
        let n = handler.search("cam").len();
        assert!(n == 3 || n == 50, "partial snapshot of {} items", n);
    }
    writer.join().unwrap();
}

// ============================================
// Properties
// ============================================

proptest! {
    #[test]
    fn prop_other_never_in_results(
        names in proptest::collection::vec("[a-c ]{1,8}", 1..12),
        query in "[a-c ]{0,4}",
    ) {
        let handler = AppSearchHandler::new(overlay(), AppFilter, 2, None);
        handler.replace_candidates(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| AppEntry::new(format!("pkg.{}", i), name.clone()))
                .collect(),
        );
        for app in handler.search(&query) {
            let tier = priority_with_tokens(&[app.label.as_str()], None, &query);
            prop_assert_ne!(tier, MatchPriority::Other);
        }
    }

    #[test]
    fn prop_results_sorted_by_priority(
        names in proptest::collection::vec("[a-c]{1,3}( [a-c]{1,3})?", 1..12),
        query in "[a-c]{2,3}",
    ) {
        let handler = AppSearchHandler::new(overlay(), AppFilter, 2, None);
        handler.replace_candidates(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| AppEntry::new(format!("pkg.{}", i), name.clone()))
                .collect(),
        );
        let ranked = handler.search_ranked(&query);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
        }
    }
}
