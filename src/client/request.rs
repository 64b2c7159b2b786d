//! Per-call request options and cache keys

use serde_json::Value;

/// HTTP methods the commerce API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// True for methods that change server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Options for a single API call.
///
/// Defaults: GET, no body, no extra headers, uncached, client default TTL.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Extra headers; a name matching a default header replaces it
    pub headers: Vec<(String, String)>,
    /// Consult and fill the cache (GET only)
    pub cache: bool,
    /// Cache lifetime in seconds; `None` falls back to the client's default
    pub cache_ttl: Option<u64>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            body: None,
            headers: Vec::new(),
            cache: false,
            cache_ttl: None,
        }
    }
}

impl RequestOptions {
    /// Uncached GET.
    pub fn get() -> Self {
        Self::default()
    }

    /// GET memoized for `ttl_seconds`.
    pub fn cached(ttl_seconds: u64) -> Self {
        Self {
            cache: true,
            cache_ttl: Some(ttl_seconds),
            ..Self::default()
        }
    }

    /// GET memoized for the client's configured default TTL.
    pub fn cached_default() -> Self {
        Self {
            cache: true,
            ..Self::default()
        }
    }

    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: Method::Post,
            body,
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::Put,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether this call reads from and writes to the cache.
    pub fn uses_cache(&self) -> bool {
        self.cache && self.method == Method::Get
    }
}

/// Builds the cache key `METHOD:endpoint:body`, with `null` for no body.
pub fn cache_key(method: Method, endpoint: &str, body: Option<&Value>) -> String {
    let body = body.map_or_else(|| "null".to_string(), Value::to_string);
    format!("{}:{}:{}", method.as_str(), endpoint, body)
}

/// Key prefix covering every cached GET whose endpoint starts with `endpoint`.
pub fn get_prefix(endpoint: &str) -> String {
    format!("{}:{}", Method::Get.as_str(), endpoint)
}
