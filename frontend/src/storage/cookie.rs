use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use super::backend::{StorageBackend, StorageError, Ttl};

/// Raw access to a `document.cookie`-style jar: reads return every visible
/// cookie as `a=1; b=2`, writes take a single `Set-Cookie`-like string.
pub trait CookieDocument {
    fn read_all(&self) -> Result<String, StorageError>;
    fn write(&self, raw: &str) -> Result<(), StorageError>;
}

pub struct BrowserCookies;

impl BrowserCookies {
    fn document(&self) -> Result<HtmlDocument, StorageError> {
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or_else(|| StorageError::Cookie("no html document".to_string()))
    }
}

impl CookieDocument for BrowserCookies {
    fn read_all(&self) -> Result<String, StorageError> {
        self.document()?
            .cookie()
            .map_err(|e| StorageError::Cookie(format!("{:?}", e)))
    }

    fn write(&self, raw: &str) -> Result<(), StorageError> {
        self.document()?
            .set_cookie(raw)
            .map_err(|e| StorageError::Cookie(format!("{:?}", e)))
    }
}

pub fn format_cookie(name: &str, value: &str, ttl: Ttl) -> String {
    format!(
        "{}={}; max-age={}; path=/; SameSite=Lax",
        urlencoding::encode(name),
        urlencoding::encode(value),
        ttl.max_age_secs()
    )
}

/// Finds `name` in a `document.cookie` string. Values that don't decode are
/// treated as missing.
pub fn find_cookie(all: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", urlencoding::encode(name));
    all.split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(prefix.as_str()))
        .and_then(|raw| urlencoding::decode(raw).ok())
        .map(|value| value.into_owned())
}

pub struct CookieJarBackend<D = BrowserCookies> {
    document: D,
}

impl CookieJarBackend<BrowserCookies> {
    pub fn browser() -> Self {
        CookieJarBackend { document: BrowserCookies }
    }
}

impl<D: CookieDocument> CookieJarBackend<D> {
    pub fn new(document: D) -> Self {
        CookieJarBackend { document }
    }
}

impl<D: CookieDocument> StorageBackend for CookieJarBackend<D> {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(find_cookie(&self.document.read_all()?, key))
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StorageError> {
        self.document.write(&format_cookie(key, value, ttl))
    }
}
