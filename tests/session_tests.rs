//! Integration tests for the two-tier session store.

use pwvault::session::{
    FileTier, MemoryTier, SessionRecord, SessionStore, StorageTier, TierKind, SESSION_KEY,
};
use tempfile::TempDir;

/// Helper: a store over a fresh memory tab tier and a file tier in `dir`.
fn store_in(dir: &TempDir) -> (SessionStore, MemoryTier, FileTier) {
    let tab = MemoryTier::new();
    let disk = FileTier::new(dir.path());
    let store = SessionStore::new(tab.clone(), disk.clone());
    (store, tab, disk)
}

fn write_record(tier: &impl StorageTier, password: &str) {
    let json = SessionRecord::new(password).to_json().unwrap();
    tier.write(SESSION_KEY, &json).unwrap();
}

fn stored_password(tier: &impl StorageTier) -> Option<String> {
    tier.read(SESSION_KEY)
        .unwrap()
        .map(|raw| SessionRecord::from_json(&raw).unwrap().master_password().to_string())
}

// ---------------------------------------------------------------------------
// Tier precedence
// ---------------------------------------------------------------------------

#[test]
fn tab_record_wins_when_both_tiers_hold_one() {
    let dir = TempDir::new().unwrap();
    let (store, tab, disk) = store_in(&dir);
    write_record(&tab, "from-tab");
    write_record(&disk, "from-disk");

    let record = store.get().unwrap().expect("record present");
    assert_eq!(record.master_password(), "from-tab");

    // Both tiers are still readable and unchanged afterwards.
    assert_eq!(stored_password(&tab).as_deref(), Some("from-tab"));
    assert_eq!(stored_password(&disk).as_deref(), Some("from-disk"));
    assert_eq!(store.get().unwrap().unwrap().master_password(), "from-tab");
}

#[test]
fn persistent_record_is_promoted_into_tab() {
    let dir = TempDir::new().unwrap();
    let (store, tab, disk) = store_in(&dir);
    write_record(&disk, "remembered");

    assert_eq!(store.holder().unwrap(), Some(TierKind::Persistent));
    let record = store.get().unwrap().unwrap();
    assert_eq!(record.master_password(), "remembered");
    assert_eq!(stored_password(&tab).as_deref(), Some("remembered"));
    assert_eq!(store.holder().unwrap(), Some(TierKind::Tab));

    // Clearing persistent storage externally does not end this tab's session.
    disk.remove(SESSION_KEY).unwrap();
    assert!(store.is_authenticated());
}

// ---------------------------------------------------------------------------
// Remember semantics
// ---------------------------------------------------------------------------

#[test]
fn unremembered_session_does_not_survive_tab_close() {
    let dir = TempDir::new().unwrap();
    {
        let (store, _tab, disk) = store_in(&dir);
        store.save("short-lived", false).unwrap();
        assert!(store.is_authenticated());
        assert!(disk.read(SESSION_KEY).unwrap().is_none());
    }

    // New tab: fresh memory tier, same persistent directory.
    let (store, _tab, disk) = store_in(&dir);
    assert!(disk.read(SESSION_KEY).unwrap().is_none());
    assert!(store.get().unwrap().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn remembered_session_survives_tab_close() {
    let dir = TempDir::new().unwrap();
    {
        let (store, tab, _disk) = store_in(&dir);
        store.save("long-lived", true).unwrap();
        assert!(tab.read(SESSION_KEY).unwrap().is_none());
    }

    let (store, _tab, _disk) = store_in(&dir);
    assert_eq!(
        store.get().unwrap().unwrap().master_password(),
        "long-lived"
    );
}

#[test]
fn session_file_matches_browser_format() {
    let dir = TempDir::new().unwrap();
    let (store, _tab, _disk) = store_in(&dir);
    store.save("admin123", true).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(format!("{SESSION_KEY}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["masterPassword"], "admin123");
    assert!(value["timestamp"].is_i64());
}

// ---------------------------------------------------------------------------
// Logout is total
// ---------------------------------------------------------------------------

#[test]
fn clear_removes_record_from_whichever_tier_holds_it() {
    for (in_tab, in_disk) in [(true, false), (false, true), (true, true)] {
        let dir = TempDir::new().unwrap();
        let (store, tab, disk) = store_in(&dir);
        if in_tab {
            write_record(&tab, "pw");
        }
        if in_disk {
            write_record(&disk, "pw");
        }
        assert!(store.is_authenticated());

        store.clear().unwrap();

        assert!(!store.is_authenticated(), "tab={in_tab} disk={in_disk}");
        assert!(tab.read(SESSION_KEY).unwrap().is_none());
        assert!(disk.read(SESSION_KEY).unwrap().is_none());
        assert_eq!(store.holder().unwrap(), None);
    }
}

#[test]
fn clear_on_empty_store_is_fine() {
    let dir = TempDir::new().unwrap();
    let (store, _tab, _disk) = store_in(&dir);
    store.clear().unwrap();
    assert!(!store.is_authenticated());
}
