//! YoBit REST API client implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware};
use reqwest_tracing::TracingMiddleware;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::auth::{
    CredentialsProvider, KEY_HEADER, NonceProvider, PersistentNonce, SIGN_HEADER,
    build_authenticated_call,
};
use crate::cookies::PersistentCookieJar;
use crate::error::YobitError;
use crate::rest::endpoints::{TRADE_API, YOBIT_BASE_URL};
use crate::rest::public::{InfoResponse, PairInfo};
use crate::rest::response::{decode, decode_private_optional};
use crate::storage::Storage;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The YoBit REST API client.
///
/// Covers the public market data API and the authenticated trade API.
/// Cloning is cheap and clones share the nonce counter, cookie jar and pair
/// cache.
///
/// # Example
///
/// ```rust,no_run
/// use yobit_api_client::rest::YobitClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = YobitClient::new();
///     let tickers = client.ticker(&["ltc_btc"]).await?;
///     println!("LTC/BTC last: {}", tickers["ltc_btc"].last);
///     Ok(())
/// }
/// ```
///
/// For the trade API, provide credentials and durable storage for the nonce:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use yobit_api_client::auth::StaticCredentials;
/// use yobit_api_client::rest::YobitClient;
/// use yobit_api_client::storage::FileStorage;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = YobitClient::builder()
///         .credentials(Arc::new(StaticCredentials::new("api_key", "api_secret")))
///         .storage(Arc::new(FileStorage::open("data")?))
///         .build();
///
///     client.handshake().await?;
///     let info = client.get_info().await?;
///     println!("Funds: {:?}", info.funds);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct YobitClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    storage: Option<Arc<dyn Storage>>,
    cookies: Arc<PersistentCookieJar>,
    pairs: Arc<RwLock<HashMap<String, PairInfo>>>,
}

impl YobitClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`YobitClient::builder()`] to configure credentials for the trade API.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> YobitClientBuilder {
        YobitClientBuilder::new()
    }

    /// The cookie jar used by this client.
    pub fn cookie_jar(&self) -> &Arc<PersistentCookieJar> {
        &self.cookies
    }

    /// Load persisted cookies, fetch `info` and persist the resulting cookies.
    ///
    /// The first request is where an anti-bot front (handled by a middleware
    /// passed to [`YobitClientBuilder::with_middleware`]) issues its
    /// clearance cookies. Without configured storage only `info` is fetched.
    pub async fn handshake(&self) -> Result<InfoResponse, YobitError> {
        if let Some(storage) = &self.storage {
            self.cookies.load(storage.as_ref())?;
        }
        let info = self.info().await?;
        self.save_cookies()?;
        Ok(info)
    }

    /// Persist the cookie jar, if storage is configured.
    pub fn save_cookies(&self) -> Result<(), YobitError> {
        match &self.storage {
            Some(storage) => self.cookies.save(storage.as_ref()),
            None => Ok(()),
        }
    }

    /// Whether the last `info` call listed `pair`.
    pub fn is_market_exists(&self, pair: &str) -> bool {
        self.read_pairs().contains_key(pair)
    }

    /// Taker fee of `pair` in percent, from the last `info` call.
    pub fn fee(&self, pair: &str) -> Option<Decimal> {
        self.read_pairs().get(pair).map(|p| p.fee)
    }

    pub(crate) fn cache_pairs(&self, pairs: &HashMap<String, PairInfo>) {
        let mut cached = self.pairs.write().unwrap_or_else(|e| e.into_inner());
        cached.clone_from(pairs);
    }

    fn read_pairs(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, PairInfo>> {
        self.pairs.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Make a public GET request.
    pub(crate) async fn public_get<T>(&self, path: &str) -> Result<T, YobitError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let response = self.http_client.get(&url).send().await?;
        let body = Self::read_body(&url, response).await?;
        tracing::debug!(%url, elapsed = ?started.elapsed(), "public call");
        decode(&body)
    }

    /// Make an authenticated trade API call.
    ///
    /// Returns `None` when the server reports success without a payload.
    pub(crate) async fn private_post<T>(
        &self,
        method: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<Option<T>, YobitError>
    where
        T: DeserializeOwned,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(YobitError::MissingCredentials)?;
        let nonce_provider = self.nonce_provider.as_ref().ok_or_else(|| {
            YobitError::Config(
                "trade API needs a nonce provider: configure storage or nonce_provider".to_string(),
            )
        })?;

        // The nonce is consumed here, before any network I/O.
        let signed = build_authenticated_call(
            credentials.get_credentials(),
            nonce_provider.as_ref(),
            method,
            params,
        )?;

        let url = format!("{}{}", self.base_url, TRADE_API);
        let started = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header(KEY_HEADER, &signed.api_key)
            .header(SIGN_HEADER, &signed.signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(signed.body)
            .send()
            .await?;
        let body = Self::read_body(&url, response).await?;
        tracing::debug!(method, nonce = signed.nonce, elapsed = ?started.elapsed(), "trade call");
        decode_private_optional(&body)
    }

    /// Read the body, rejecting non-OK statuses.
    async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>, YobitError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(YobitError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }
}

impl Default for YobitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for YobitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YobitClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}

/// Builder for [`YobitClient`].
pub struct YobitClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    storage: Option<Arc<dyn Storage>>,
    middleware: Vec<Arc<dyn Middleware>>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl YobitClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: YOBIT_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            storage: None,
            middleware: Vec::new(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Without one, a [`PersistentNonce`] keyed by the API key is created
    /// over the configured [`storage`](Self::storage). Build one client per
    /// credential and clone it: two independently built clients would each
    /// lock their own counter over the same stored value.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set durable storage for the nonce counter and cookie snapshots.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Add a transport middleware.
    ///
    /// This is where an anti-bot challenge solver plugs in: it must resolve
    /// the challenge transparently and hand back the eventual normal response.
    pub fn with_middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> YobitClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("yobit-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("yobit-api-client"));
        headers.insert(USER_AGENT, header_value);

        let cookies = Arc::new(PersistentCookieJar::new());

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "HTTP client setup failed, retrying with defaults");
                fallback_http_client(&cookies, self.timeout)
            });

        let mut client = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        for middleware in self.middleware {
            client = client.with_arc(middleware);
        }

        let nonce_provider = self.nonce_provider.or_else(|| {
            let storage = self.storage.clone()?;
            let credentials = self.credentials.as_ref()?;
            let nonce: Arc<dyn NonceProvider> = Arc::new(PersistentNonce::for_credentials(
                storage,
                credentials.get_credentials(),
            ));
            Some(nonce)
        });

        YobitClient {
            http_client: client.build(),
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
            storage: self.storage,
            cookies,
            pairs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Client used when the configured one cannot be built. Keeps the cookie
/// store and timeout so session persistence still works.
fn fallback_http_client(cookies: &Arc<PersistentCookieJar>, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_provider(cookies.clone())
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                "HTTP client setup failed again, cookies and timeout are not applied"
            );
            reqwest::Client::new()
        })
}

impl Default for YobitClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_client_keeps_cookie_store() {
        let cookies = Arc::new(PersistentCookieJar::new());
        let _client = fallback_http_client(&cookies, DEFAULT_TIMEOUT);
        assert_eq!(Arc::strong_count(&cookies), 2);
    }

    #[test]
    fn test_builder_shares_cookie_jar_with_http_client() {
        let client = YobitClient::builder().timeout(Duration::from_secs(1)).build();
        assert!(Arc::strong_count(client.cookie_jar()) >= 2);
    }
}
