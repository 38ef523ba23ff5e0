//! Request building blocks
//!
//! Endpoint descriptors and the deterministic query-string encoding shared by
//! every adapter. The encoded string is built once and used both for the
//! signature and for the transmitted URL, so the two can never diverge.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// HTTP verb used for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an endpoint needs the nonce/key/signature treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Private,
}

/// One row of an exchange's endpoint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path relative to the exchange base URL (e.g. "public/getticker")
    pub path: &'static str,
    pub access: Access,
    pub method: HttpMethod,
}

impl Endpoint {
    pub const fn public(path: &'static str) -> Self {
        Self {
            path,
            access: Access::Public,
            method: HttpMethod::Get,
        }
    }

    pub const fn private(path: &'static str) -> Self {
        Self {
            path,
            access: Access::Private,
            method: HttpMethod::Post,
        }
    }

    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Logical query-parameter map.
///
/// Names are unique (a later `insert` replaces the earlier value) and the
/// encoding is ordered by name, so the same map always encodes to the same
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Canonical `application/x-www-form-urlencoded` encoding, sorted by name
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Join base URL, endpoint path and encoded query into the exact request URI.
pub fn build_url(base_url: &str, path: &str, params: &QueryParams) -> String {
    let mut url = String::with_capacity(base_url.len() + path.len() + 64);
    url.push_str(base_url);
    url.push_str(path);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.to_query_string());
    }
    url
}
