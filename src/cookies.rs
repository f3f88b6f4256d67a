//! Session cookie persistence.
//!
//! YoBit sits behind an anti-bot front that hands out clearance cookies.
//! Keeping them across restarts avoids repeating the challenge on every
//! start, so the client's cookie store can be snapshotted into [`Storage`].

use std::collections::BTreeMap;
use std::sync::Mutex;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use url::Url;

use crate::error::YobitError;
use crate::storage::Storage;

/// Storage key holding the cookie snapshot.
pub const COOKIES_KEY: &str = "cookies";

/// Snapshot layout: origin -> raw `Set-Cookie` values.
type Snapshot = BTreeMap<String, Vec<String>>;

/// A cookie store that can be saved to and restored from [`Storage`].
///
/// Cookie matching is delegated to [`reqwest::cookie::Jar`]; this type only
/// remembers the latest raw `Set-Cookie` value per origin and cookie name so
/// the jar can be rebuilt later.
#[derive(Debug, Default)]
pub struct PersistentCookieJar {
    jar: Jar,
    raw: Mutex<BTreeMap<String, BTreeMap<String, String>>>,
}

impl PersistentCookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore cookies saved by [`save`](Self::save).
    ///
    /// A missing snapshot leaves the jar untouched. Returns the number of
    /// cookies loaded.
    pub fn load(&self, storage: &dyn Storage) -> Result<usize, YobitError> {
        let Some(bytes) = storage.get(COOKIES_KEY)? else {
            return Ok(0);
        };
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

        let mut loaded = 0;
        for (origin, cookies) in snapshot {
            let url = Url::parse(&origin)?;
            for cookie in cookies {
                self.jar.add_cookie_str(&cookie, &url);
                self.remember(&url, &cookie);
                loaded += 1;
            }
        }
        tracing::debug!(count = loaded, "loaded cookies");
        Ok(loaded)
    }

    /// Persist the current cookies.
    pub fn save(&self, storage: &dyn Storage) -> Result<(), YobitError> {
        let snapshot = self.snapshot();
        let bytes = serde_json::to_vec(&snapshot)?;
        storage.put(COOKIES_KEY, &bytes)?;
        tracing::debug!(origins = snapshot.len(), "saved cookies");
        Ok(())
    }

    /// Add a raw `Set-Cookie` value as if `url` had returned it.
    pub fn add_cookie_str(&self, cookie: &str, url: &Url) {
        self.jar.add_cookie_str(cookie, url);
        self.remember(url, cookie);
    }

    fn snapshot(&self) -> Snapshot {
        let raw = self.raw.lock().unwrap_or_else(|e| e.into_inner());
        raw.iter()
            .map(|(origin, cookies)| (origin.clone(), cookies.values().cloned().collect()))
            .collect()
    }

    fn remember(&self, url: &Url, cookie: &str) {
        let Some(name) = cookie_name(cookie) else {
            return;
        };
        let origin = url.origin().ascii_serialization();
        let mut raw = self.raw.lock().unwrap_or_else(|e| e.into_inner());
        raw.entry(origin)
            .or_default()
            .insert(name.to_string(), cookie.to_string());
    }
}

impl CookieStore for PersistentCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        for header in &headers {
            if let Ok(cookie) = header.to_str() {
                self.remember(url, cookie);
            }
        }
        self.jar.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

fn cookie_name(cookie: &str) -> Option<&str> {
    let pair = cookie.split(';').next()?;
    let (name, _) = pair.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn site() -> Url {
        Url::parse("https://yobit.net/api/3/info").unwrap()
    }

    fn cookie_header(jar: &PersistentCookieJar) -> String {
        jar.cookies(&site())
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_cookie_name() {
        assert_eq!(cookie_name("cf_clearance=abc; Path=/"), Some("cf_clearance"));
        assert_eq!(cookie_name(" a = b"), Some("a"));
        assert_eq!(cookie_name("garbage"), None);
        assert_eq!(cookie_name("=x"), None);
    }

    #[test]
    fn test_set_cookies_records_raw_values() {
        let jar = PersistentCookieJar::new();
        let headers = [
            HeaderValue::from_static("cf_clearance=one; Path=/"),
            HeaderValue::from_static("session=s1; Path=/"),
        ];
        jar.set_cookies(&mut headers.iter(), &site());

        let header = cookie_header(&jar);
        assert!(header.contains("cf_clearance=one"));
        assert!(header.contains("session=s1"));

        let snapshot = jar.snapshot();
        assert_eq!(snapshot["https://yobit.net"].len(), 2);
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let jar = PersistentCookieJar::new();
        jar.add_cookie_str("session=old; Path=/", &site());
        jar.add_cookie_str("session=new; Path=/", &site());
        assert_eq!(jar.snapshot()["https://yobit.net"], vec!["session=new; Path=/"]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let storage = MemoryStorage::new();
        let jar = PersistentCookieJar::new();
        jar.add_cookie_str("cf_clearance=token; Path=/", &site());
        jar.save(&storage).unwrap();

        let restored = PersistentCookieJar::new();
        assert_eq!(restored.load(&storage).unwrap(), 1);
        assert!(cookie_header(&restored).contains("cf_clearance=token"));
    }

    #[test]
    fn test_load_without_snapshot() {
        let storage = MemoryStorage::new();
        let jar = PersistentCookieJar::new();
        assert_eq!(jar.load(&storage).unwrap(), 0);
        assert!(jar.cookies(&site()).is_none());
    }

    #[test]
    fn test_load_corrupt_snapshot() {
        let storage = MemoryStorage::new();
        storage.put(COOKIES_KEY, b"not json").unwrap();
        let err = PersistentCookieJar::new().load(&storage).unwrap_err();
        assert!(matches!(err, YobitError::Json(_)));
    }
}
