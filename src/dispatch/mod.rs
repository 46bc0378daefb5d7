//! Request classification.
//!
//! # Responsibilities
//! - Decide, per URL shape, whether a request is a command for the control
//!   service, a static asset, or unrecognized
//! - Map asset categories to their fixed content types
//!
//! # Design Decisions
//! - A non-empty `command` query parameter wins outright; the UI's asset
//!   URLs never carry one, so commands and assets cannot overlap
//! - Asset shapes are an ordered first-match-wins cascade over a closed set
//! - Unrecognized requests still get HTTP 200, with a textual `NACK`
//!   marker: the browser-side script treats any non-2xx as a dead server
//! - No directory listing, no content negotiation; a plain lookup

use url::form_urlencoded;

/// Content types for the fixed asset categories.
pub mod content_type {
    pub const HTML: &str = "text/html";
    pub const CSS: &str = "text/css";
    pub const JS: &str = "application/javascript";
    pub const ICON: &str = "image/vnd.microsoft.icon";
    pub const PNG: &str = "image/png";
    pub const JPG: &str = "image/jpg";
    pub const PLAIN: &str = "text/plain";
    /// Fallback for files under /images with an unknown extension.
    pub const IMAGE: &str = "image";
}

/// A static file to serve: doc-root-relative path plus content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub rel_path: String,
    pub content_type: &'static str,
    /// Images get a short Cache-Control so polling browsers reuse them.
    pub cacheable: bool,
}

impl AssetDescriptor {
    fn new(rel_path: impl Into<String>, content_type: &'static str) -> Self {
        Self {
            rel_path: rel_path.into(),
            content_type,
            cacheable: false,
        }
    }

    fn cacheable(mut self) -> Self {
        self.cacheable = true;
        self
    }
}

/// The three request classes the gateway recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestClass {
    Asset(AssetDescriptor),
    Command(String),
    Unrecognized,
}

/// Classify a request by its URL path and raw query string.
///
/// A non-empty `?command=` query relays, whatever the path: the UI sends
/// commands on the root path, which would otherwise match the index rule.
/// Asset shapes then match first-wins in the order the reference UI relies
/// on: index family, manifest, stylesheets, the main script, favicons,
/// images. Everything else is unrecognized.
pub fn classify(path: &str, query: Option<&str>) -> RequestClass {
    if let Some(query) = query {
        if let Some(phrase) = command_param(query) {
            return RequestClass::Command(phrase);
        }
    }

    // Index family; index_big.html is the landscape-tablet layout.
    if path == "/" || path == "/index.html" {
        return RequestClass::Asset(AssetDescriptor::new("index.html", content_type::HTML));
    }
    if path == "/index_big.html" {
        return RequestClass::Asset(AssetDescriptor::new("index_big.html", content_type::HTML));
    }

    if path.contains("site.webmanifest") {
        return RequestClass::Asset(AssetDescriptor::new(rel(path), content_type::PLAIN));
    }

    if path.ends_with(".css") {
        return RequestClass::Asset(AssetDescriptor::new(rel(path), content_type::CSS));
    }

    if path == "/js/main.js" {
        return RequestClass::Asset(AssetDescriptor::new(rel(path), content_type::JS));
    }

    if path.starts_with("/favicon") {
        return RequestClass::Asset(AssetDescriptor::new(rel(path), content_type::ICON));
    }

    if path.contains("/images") {
        // The client script stamps image URLs (e.g. eq.png?554766166) to
        // defeat stale caches; the stamp arrives as the query string and
        // plays no part in resolving the file.
        let ctype = if path.ends_with(".png") {
            content_type::PNG
        } else if path.ends_with(".jpg") {
            content_type::JPG
        } else {
            content_type::IMAGE
        };
        return RequestClass::Asset(AssetDescriptor::new(rel(path), ctype).cacheable());
    }

    RequestClass::Unrecognized
}

/// Extract a non-empty `command` parameter from a raw query string.
fn command_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "command" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Doc-root-relative form of a URL path.
fn rel(path: &str) -> &str {
    path.trim_start_matches('/')
}
