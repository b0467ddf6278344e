//! Script Loader Gate
//!
//! The fetch-and-execute mechanism for the editing runtime is an external
//! collaborator; this module owns only the URL composition and the trait the
//! controller gates on. The controller guarantees at most one load attempt
//! per instance.

use url::Url;

/// External script fetch-and-execute collaborator
///
/// `on_load` must be invoked exactly once, after the fetched resource has
/// executed (which is expected to register the runtime in the global
/// namespace). Retry policy, caching, and deduplication across controller
/// instances are the loader's own business.
pub trait ScriptLoader {
    fn load(&self, url: &str, on_load: Box<dyn FnOnce()>);
}

/// Channel used when the `channel` attribute is absent
pub const DEFAULT_CHANNEL: &str = "stable";

/// API key used when the `api-key` attribute is absent
pub const FALLBACK_API_KEY: &str = "no-api-key";

const CDN_BASE: &str = "https://cdn.inkstone.cloud/1";

/// Compose the runtime script URL
///
/// An explicit `src` wins outright; otherwise the CDN URL is built from the
/// API key and release channel, each falling back to its documented default.
pub fn script_url(
    src: Option<&str>,
    api_key: Option<&str>,
    channel: Option<&str>,
) -> Result<Url, url::ParseError> {
    if let Some(src) = src {
        return Url::parse(src);
    }
    let composed = format!(
        "{}/{}/ink/{}/ink.min.js",
        CDN_BASE,
        api_key.unwrap_or(FALLBACK_API_KEY),
        channel.unwrap_or(DEFAULT_CHANNEL),
    );
    Url::parse(&composed)
}
