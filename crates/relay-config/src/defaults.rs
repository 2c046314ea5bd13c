use camino::Utf8PathBuf;
use url::Url;

use crate::store::DocumentSource;

/// Login-with-Amazon profile endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://api.amazon.com/user/profile";

/// Default discovery document store, relative to the working directory.
pub const DEFAULT_DOCUMENT_STORE: &str = "discovery-store";

/// Manufacturer name advertised when none is configured.
pub const DEFAULT_MANUFACTURER_NAME: &str = "relay";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Parsed form of [`DEFAULT_PROFILE_URL`].
pub fn default_profile_url() -> Url {
    #[allow(clippy::expect_used, reason = "the default is a constant, valid URL")]
    Url::parse(DEFAULT_PROFILE_URL).expect("default profile URL parses")
}

/// Directory store rooted at [`DEFAULT_DOCUMENT_STORE`].
pub fn default_document_store() -> DocumentSource {
    DocumentSource::directory(Utf8PathBuf::from(DEFAULT_DOCUMENT_STORE))
}
