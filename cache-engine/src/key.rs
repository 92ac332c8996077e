use std::sync::Arc;

/// Caller-supplied key derivation. Returning `None` (or an empty string)
/// falls back to [`default_key`].
pub type KeyFn = Arc<dyn Fn(&RequestDescriptor) -> Option<String> + Send + Sync>;

/// Typed view of an inbound read request, independent of any HTTP framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: String,
    pub path: String,
    /// Query pairs, sorted by name then value.
    pub query: Vec<(String, String)>,
    /// Matched route parameters, in route order.
    pub params: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: impl AsRef<str>, path: &str, raw_query: Option<&str>) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            path: normalize_path(path),
            query: parse_query(raw_query.unwrap_or_default()),
            params: Vec::new(),
        }
    }

    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// `"<METHOD>:<path>"`, followed by `?<sorted query>` when a query is present.
pub fn default_key(descriptor: &RequestDescriptor) -> String {
    let mut key = format!("{}:{}", descriptor.method, descriptor.path);

    if !descriptor.query.is_empty() {
        let query = descriptor
            .query
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        key.push('?');
        key.push_str(&query);
    }

    key
}

/// Resolve the key for a request, falling back to the default scheme when
/// the custom function declines or yields nothing usable.
pub fn resolve_key(descriptor: &RequestDescriptor, key_fn: Option<&KeyFn>) -> String {
    key_fn
        .and_then(|f| f(descriptor))
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| default_key(descriptor))
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return "/".to_string();
    }

    let collapsed = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    format!("/{}", collapsed)
}

fn parse_query(raw: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = raw
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .filter(|(k, _)| !k.is_empty())
        .collect();

    pairs.sort();
    pairs
}
