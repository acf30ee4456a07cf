use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use serde::Serialize;
use web_sys::window;

use super::store::{ConsentStore, StorageKey};

/// Where the recording procedure gets time, randomness and the current page.
pub trait VisitContext {
    fn now(&self) -> DateTime<Utc>;
    /// Uniform in `[0, 1)`.
    fn random(&self) -> f64;
    fn current_path(&self) -> String;
}

pub struct BrowserContext;

impl VisitContext for BrowserContext {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn random(&self) -> f64 {
        js_sys::Math::random()
    }

    fn current_path(&self) -> String {
        window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorEntry {
    pub visitor_id: String,
    pub entry_page: String,
    pub entry_time: String,
    pub one_time_entry_recorded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Recorded(VisitorEntry),
    /// Nothing was written. Carries what the earlier visit stored, if all of it
    /// is still readable.
    AlreadyRecorded(Option<VisitorEntry>),
}

impl TrackOutcome {
    pub fn entry(&self) -> Option<&VisitorEntry> {
        match self {
            TrackOutcome::Recorded(entry) => Some(entry),
            TrackOutcome::AlreadyRecorded(prior) => prior.as_ref(),
        }
    }
}

const RANDOM_SUFFIX_LEN: u32 = 8;

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// `v_<millis in base 36>_<8 random base-36 chars>`. Unique enough to tell
/// browsers apart, not a secret.
pub fn random_id(now: DateTime<Utc>, random: f64) -> String {
    let space = 36u64.pow(RANDOM_SUFFIX_LEN);
    let suffix = ((random.clamp(0.0, 1.0) * space as f64) as u64).min(space - 1);
    format!(
        "v_{}_{:0>width$}",
        to_base36(now.timestamp_millis().max(0) as u64),
        to_base36(suffix),
        width = RANDOM_SUFFIX_LEN as usize
    )
}

/// Same shape as JavaScript's `Date.prototype.toISOString`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn stored_entry(store: &ConsentStore) -> Option<VisitorEntry> {
    Some(VisitorEntry {
        visitor_id: store.get(StorageKey::VisitorId)?,
        entry_page: store.get(StorageKey::EntryPage)?,
        entry_time: store.get(StorageKey::EntryTime)?,
        one_time_entry_recorded: true,
    })
}

/// Records the first tracked visit of this browser. Once the entry flag is
/// set this never writes again.
pub fn track_visitor(store: &ConsentStore, context: &dyn VisitContext) -> TrackOutcome {
    if store.entry_recorded() {
        debug!("Entry already recorded, skipping");
        return TrackOutcome::AlreadyRecorded(stored_entry(store));
    }

    let visitor_id = match store.get(StorageKey::VisitorId).filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            let id = random_id(context.now(), context.random());
            store.set(StorageKey::VisitorId, &id);
            id
        }
    };

    let entry_page = context.current_path();
    let entry_time = iso_timestamp(context.now());
    store.set(StorageKey::EntryPage, &entry_page);
    store.set(StorageKey::EntryTime, &entry_time);
    // Flag goes last so an interrupted sequence is simply redone next time.
    store.set(StorageKey::EntryRecorded, "true");

    info!("Recorded entry for {} on {}", visitor_id, entry_page);
    TrackOutcome::Recorded(VisitorEntry {
        visitor_id,
        entry_page,
        entry_time,
        one_time_entry_recorded: true,
    })
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::testing::FixedContext;
    use super::*;
    use crate::storage::backend::{TieredStore, Ttl};
    use crate::storage::memory::MemoryBackend;

    fn is_visitor_id(id: &str) -> bool {
        let Some(rest) = id.strip_prefix("v_") else {
            return false;
        };
        let Some((stamp, suffix)) = rest.split_once('_') else {
            return false;
        };
        let base36 = |s: &str| s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase());
        !stamp.is_empty() && base36(stamp) && suffix.len() == 8 && base36(suffix)
    }

    fn store_over(durable: &MemoryBackend, cookies: &MemoryBackend) -> ConsentStore {
        ConsentStore::new(
            TieredStore::new()
                .with_backend(durable.clone())
                .with_backend(cookies.clone()),
        )
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_714_557_600_123), "lvnnbr7f");
    }

    #[test]
    fn test_random_id_shape() {
        let now = Utc.timestamp_millis_opt(1_714_557_600_123).unwrap();
        for random in [0.0, 0.000001, 0.5, 0.999999999] {
            let id = random_id(now, random);
            assert!(is_visitor_id(&id), "bad id {}", id);
            assert!(id.starts_with("v_lvnnbr7f_"));
        }
        assert_eq!(random_id(now, 0.0), "v_lvnnbr7f_00000000");
    }

    #[test]
    fn test_iso_timestamp_matches_js_format() {
        let now = Utc.timestamp_millis_opt(1_714_557_600_123).unwrap();
        assert_eq!(iso_timestamp(now), "2024-05-01T10:00:00.123Z");
    }

    #[test]
    fn test_first_visit_records_everything() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        let store = store_over(&durable, &cookies);
        let context = FixedContext::new("/services/seo.html");

        let outcome = track_visitor(&store, &context);
        let TrackOutcome::Recorded(entry) = outcome else {
            panic!("expected a fresh recording");
        };

        assert!(is_visitor_id(&entry.visitor_id));
        assert_eq!(entry.entry_page, "/services/seo.html");
        assert_eq!(entry.entry_time, "2024-05-01T10:00:00.123Z");
        assert!(entry.one_time_entry_recorded);

        for backend in [&durable, &cookies] {
            assert_eq!(backend.value("jsparks_visitor_id"), Some(entry.visitor_id.clone()));
            assert_eq!(backend.value("jsparks_entry_page").as_deref(), Some("/services/seo.html"));
            assert_eq!(backend.value("jsparks_entry_recorded").as_deref(), Some("true"));
        }
        assert_eq!(cookies.ttl("jsparks_entry_time"), Some(Ttl::days(180)));
    }

    #[test]
    fn test_second_call_writes_nothing() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        let store = store_over(&durable, &cookies);
        let context = FixedContext::new("/index.html");

        let first = track_visitor(&store, &context);
        let before = durable.snapshot();
        let writes = durable.writes() + cookies.writes();

        context.advance(60_000);
        let second = track_visitor(&store, &context);

        assert_eq!(durable.snapshot(), before);
        assert_eq!(durable.writes() + cookies.writes(), writes);
        assert_eq!(second, TrackOutcome::AlreadyRecorded(first.entry().cloned()));
    }

    #[test]
    fn test_existing_visitor_id_is_kept() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        cookies.insert("jsparks_visitor_id", "v_existing_abcdefgh");
        let store = store_over(&durable, &cookies);

        let outcome = track_visitor(&store, &FixedContext::new("/about.html"));

        assert_eq!(outcome.entry().unwrap().visitor_id, "v_existing_abcdefgh");
        // The id was read, not rewritten.
        assert_eq!(durable.value("jsparks_visitor_id"), None);
    }

    #[test]
    fn test_interrupted_recording_is_redone() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        durable.insert("jsparks_visitor_id", "v_old_00000001");
        durable.insert("jsparks_entry_page", "/stale.html");
        let store = store_over(&durable, &cookies);

        let outcome = track_visitor(&store, &FixedContext::new("/contact.html"));

        let entry = outcome.entry().unwrap();
        assert_eq!(entry.visitor_id, "v_old_00000001");
        assert_eq!(entry.entry_page, "/contact.html");
        assert!(store.entry_recorded());
    }

    #[test]
    fn test_already_recorded_without_details() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        durable.insert("jsparks_entry_recorded", "true");
        let store = store_over(&durable, &cookies);

        let outcome = track_visitor(&store, &FixedContext::new("/"));

        assert_eq!(outcome, TrackOutcome::AlreadyRecorded(None));
        assert_eq!(durable.writes() + cookies.writes(), 0);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = VisitorEntry {
            visitor_id: "v_a_00000000".to_string(),
            entry_page: "/".to_string(),
            entry_time: "2024-05-01T10:00:00.123Z".to_string(),
            one_time_entry_recorded: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["visitorId"], "v_a_00000000");
        assert_eq!(json["entryPage"], "/");
        assert_eq!(json["entryTime"], "2024-05-01T10:00:00.123Z");
        assert_eq!(json["oneTimeEntryRecorded"], true);
    }
}
