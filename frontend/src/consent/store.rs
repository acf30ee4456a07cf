use crate::config;
use crate::storage::backend::{TieredStore, Ttl};
use crate::storage::cookie::CookieJarBackend;
use crate::storage::local::LocalStorageBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Consent,
    PromptShown,
    EntryRecorded,
    VisitorId,
    EntryPage,
    EntryTime,
}

impl StorageKey {
    #[cfg(test)]
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Consent,
        StorageKey::PromptShown,
        StorageKey::EntryRecorded,
        StorageKey::VisitorId,
        StorageKey::EntryPage,
        StorageKey::EntryTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Consent => config::CONSENT_KEY,
            StorageKey::PromptShown => config::PROMPT_SHOWN_KEY,
            StorageKey::EntryRecorded => config::ENTRY_RECORDED_KEY,
            StorageKey::VisitorId => config::VISITOR_ID_KEY,
            StorageKey::EntryPage => config::ENTRY_PAGE_KEY,
            StorageKey::EntryTime => config::ENTRY_TIME_KEY,
        }
    }

    pub fn ttl(&self) -> Ttl {
        match self {
            StorageKey::Consent | StorageKey::PromptShown => Ttl::days(config::CONSENT_TTL_DAYS),
            _ => Ttl::days(config::VISITOR_TTL_DAYS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Accepted,
    Declined,
}

impl ConsentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentDecision::Accepted => "accepted",
            ConsentDecision::Declined => "declined",
        }
    }

    /// Anything but the two literals counts as no decision.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(ConsentDecision::Accepted),
            "declined" => Some(ConsentDecision::Declined),
            _ => None,
        }
    }
}

/// Typed access to the consent and visitor flags. Reads and writes never
/// fail; a value that cannot be read is simply absent.
pub struct ConsentStore {
    tiers: TieredStore,
}

impl ConsentStore {
    pub fn new(tiers: TieredStore) -> Self {
        ConsentStore { tiers }
    }

    /// Local storage first, cookies as the copy that always gets written.
    pub fn browser() -> Self {
        Self::new(
            TieredStore::new()
                .with_backend(LocalStorageBackend)
                .with_backend(CookieJarBackend::browser()),
        )
    }

    pub fn get(&self, key: StorageKey) -> Option<String> {
        self.tiers.get(key.as_str())
    }

    pub fn set(&self, key: StorageKey, value: &str) {
        self.tiers.set(key.as_str(), value, key.ttl());
    }

    fn flag(&self, key: StorageKey) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    pub fn consent(&self) -> Option<ConsentDecision> {
        self.get(StorageKey::Consent)
            .and_then(|value| ConsentDecision::parse(&value))
    }

    pub fn set_consent(&self, decision: ConsentDecision) {
        self.set(StorageKey::Consent, decision.as_str());
    }

    pub fn prompt_shown(&self) -> bool {
        self.flag(StorageKey::PromptShown)
    }

    pub fn mark_prompt_shown(&self) {
        self.set(StorageKey::PromptShown, "true");
    }

    pub fn entry_recorded(&self) -> bool {
        self.flag(StorageKey::EntryRecorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryBackend;

    fn store_with(durable: &MemoryBackend, cookies: &MemoryBackend) -> ConsentStore {
        ConsentStore::new(
            TieredStore::new()
                .with_backend(durable.clone())
                .with_backend(cookies.clone()),
        )
    }

    #[test]
    fn test_key_names_are_stable() {
        let names: Vec<_> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "jsparks_cookie_consent",
                "jsparks_cookie_prompt_shown",
                "jsparks_entry_recorded",
                "jsparks_visitor_id",
                "jsparks_entry_page",
                "jsparks_entry_time",
            ]
        );
    }

    #[test]
    fn test_key_ttls() {
        assert_eq!(StorageKey::Consent.ttl(), Ttl::days(365));
        assert_eq!(StorageKey::PromptShown.ttl(), Ttl::days(365));
        for key in [
            StorageKey::EntryRecorded,
            StorageKey::VisitorId,
            StorageKey::EntryPage,
            StorageKey::EntryTime,
        ] {
            assert_eq!(key.ttl(), Ttl::days(180));
        }
    }

    #[test]
    fn test_set_consent_writes_both_backends() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        let store = store_with(&durable, &cookies);

        assert_eq!(store.consent(), None);
        store.set_consent(ConsentDecision::Declined);

        assert_eq!(store.consent(), Some(ConsentDecision::Declined));
        assert_eq!(durable.value("jsparks_cookie_consent").as_deref(), Some("declined"));
        assert_eq!(cookies.value("jsparks_cookie_consent").as_deref(), Some("declined"));
        assert_eq!(cookies.ttl("jsparks_cookie_consent"), Some(Ttl::days(365)));
    }

    #[test]
    fn test_malformed_values_read_as_unset() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        durable.insert("jsparks_cookie_consent", "maybe");
        durable.insert("jsparks_cookie_prompt_shown", "TRUE");
        durable.insert("jsparks_entry_recorded", "1");
        let store = store_with(&durable, &cookies);

        assert_eq!(store.consent(), None);
        assert!(!store.prompt_shown());
        assert!(!store.entry_recorded());
    }

    #[test]
    fn test_cookie_copy_used_when_durable_missing() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        cookies.insert("jsparks_cookie_prompt_shown", "true");
        let store = store_with(&durable, &cookies);

        assert!(store.prompt_shown());
    }
}
