//! `SessionStore`: one session record across two storage tiers.
//!
//! Writes go to exactly one tier (chosen by "remember me"), clears hit
//! both, and reads prefer the tab tier, promoting a persistent record
//! into it on first sight.

use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::Result;

use super::record::SessionRecord;
use super::tier::StorageTier;

/// The single well-known key the record lives under in either tier.
pub const SESSION_KEY: &str = "password_manager_auth";

/// Which tier a record was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    Tab,
    Persistent,
}

/// Outcome of the tier precedence rule.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The tab tier holds a record; use it as-is.
    FromTab(Zeroizing<String>),
    /// Only the persistent tier holds a record; copy it into the tab tier.
    Promote(Zeroizing<String>),
    Empty,
}

/// Tier precedence: the tab record wins; otherwise the persistent record
/// is promoted; otherwise there is nothing.
pub fn resolve_tiers(
    tab: Option<Zeroizing<String>>,
    persistent: Option<Zeroizing<String>>,
) -> Resolution {
    match (tab, persistent) {
        (Some(raw), _) => Resolution::FromTab(raw),
        (None, Some(raw)) => Resolution::Promote(raw),
        (None, None) => Resolution::Empty,
    }
}

pub struct SessionStore {
    tab: Box<dyn StorageTier>,
    persistent: Box<dyn StorageTier>,
}

impl SessionStore {
    pub fn new(tab: impl StorageTier + 'static, persistent: impl StorageTier + 'static) -> Self {
        Self {
            tab: Box::new(tab),
            persistent: Box::new(persistent),
        }
    }

    /// Save a fresh record to the persistent tier if `remember`, otherwise
    /// to the tab tier. Never writes both.
    pub fn save(&self, master_password: &str, remember: bool) -> Result<()> {
        let record = SessionRecord::new(master_password);
        let json = Zeroizing::new(record.to_json()?);

        let tier = if remember {
            &self.persistent
        } else {
            &self.tab
        };
        tier.write(SESSION_KEY, &json)?;
        debug!(tier = tier.name(), "session saved");
        Ok(())
    }

    /// Remove the record from both tiers, whichever holds it.
    ///
    /// Both removals are attempted even if the first one fails.
    pub fn clear(&self) -> Result<()> {
        let tab = self.tab.remove(SESSION_KEY);
        let persistent = self.persistent.remove(SESSION_KEY);
        debug!("session cleared");
        tab.and(persistent)
    }

    /// Look up the current record, promoting a persistent one into the
    /// tab tier.
    pub fn get(&self) -> Result<Option<SessionRecord>> {
        let tab = self.tab.read(SESSION_KEY)?;
        let persistent = if tab.is_none() {
            self.persistent.read(SESSION_KEY)?
        } else {
            None
        };

        match resolve_tiers(tab, persistent) {
            Resolution::FromTab(raw) => SessionRecord::from_json(&raw).map(Some),
            Resolution::Promote(raw) => {
                let record = SessionRecord::from_json(&raw)?;
                self.tab.write(SESSION_KEY, &raw)?;
                debug!(from = self.persistent.name(), "persistent session promoted");
                Ok(Some(record))
            }
            Resolution::Empty => Ok(None),
        }
    }

    /// Presence check only: says nothing about server-side validity.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }

    /// Which tier currently holds a record, without promoting anything.
    pub fn holder(&self) -> Result<Option<TierKind>> {
        if self.tab.read(SESSION_KEY)?.is_some() {
            return Ok(Some(TierKind::Tab));
        }
        if self.persistent.read(SESSION_KEY)?.is_some() {
            return Ok(Some(TierKind::Persistent));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tier::MemoryTier;

    fn raw(s: &str) -> Option<Zeroizing<String>> {
        Some(Zeroizing::new(s.to_string()))
    }

    #[test]
    fn resolve_prefers_tab() {
        assert_eq!(
            resolve_tiers(raw("tab"), raw("disk")),
            Resolution::FromTab(Zeroizing::new("tab".to_string()))
        );
    }

    #[test]
    fn resolve_promotes_persistent() {
        assert_eq!(
            resolve_tiers(None, raw("disk")),
            Resolution::Promote(Zeroizing::new("disk".to_string()))
        );
    }

    #[test]
    fn resolve_empty() {
        assert_eq!(resolve_tiers(None, None), Resolution::Empty);
    }

    #[test]
    fn save_without_remember_stays_in_tab() {
        let tab = MemoryTier::new();
        let disk = MemoryTier::new();
        let store = SessionStore::new(tab.clone(), disk.clone());

        store.save("pw", false).unwrap();

        assert!(tab.read(SESSION_KEY).unwrap().is_some());
        assert!(disk.read(SESSION_KEY).unwrap().is_none());
        assert_eq!(store.holder().unwrap(), Some(TierKind::Tab));
    }

    #[test]
    fn get_promotes_into_tab() {
        let tab = MemoryTier::new();
        let disk = MemoryTier::new();
        let store = SessionStore::new(tab.clone(), disk.clone());

        store.save("pw", true).unwrap();
        assert!(tab.read(SESSION_KEY).unwrap().is_none());

        let record = store.get().unwrap().unwrap();
        assert_eq!(record.master_password(), "pw");
        assert!(tab.read(SESSION_KEY).unwrap().is_some());

        // Survives the persistent copy disappearing externally.
        disk.remove(SESSION_KEY).unwrap();
        assert!(store.is_authenticated());
    }

    #[test]
    fn corrupt_record_is_not_authenticated() {
        let tab = MemoryTier::new();
        tab.write(SESSION_KEY, "{garbage").unwrap();
        let store = SessionStore::new(tab, MemoryTier::new());

        assert!(store.get().is_err());
        assert!(!store.is_authenticated());
    }
}
