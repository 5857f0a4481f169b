//! Configuration model: transport options, proxies and methods.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CurlyError, Result};

/// Environment variable that overrides the default user agent.
pub const USER_AGENT_ENV: &str = "HTTP_USER_AGENT";

/// Environment flag that disables automatic redirect-following,
/// for sandboxed environments that forbid it.
pub const NO_FOLLOW_ENV: &str = "CURLY_NO_FOLLOW";

/// Default bound on redirects followed within one logical request.
pub const DEFAULT_MAX_REDIRECTS: u32 = 15;

/// The set of transport options this client recognizes.
///
/// Option names are accepted with or without a `CURLOPT_` prefix and in
/// any case; unknown names are rejected rather than silently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransportOption {
    Url,
    Referer,
    UserAgent,
    FollowLocation,
    MaxRedirs,
    ReturnTransfer,
    Timeout,
    ConnectTimeout,
    CookieFile,
    CookieJar,
    SslVerifyPeer,
    SslVerifyHost,
    CaInfo,
    CaPath,
}

impl TransportOption {
    /// Canonical uppercase name, matching the curl option vocabulary.
    pub fn name(&self) -> &'static str {
        match self {
            TransportOption::Url => "URL",
            TransportOption::Referer => "REFERER",
            TransportOption::UserAgent => "USERAGENT",
            TransportOption::FollowLocation => "FOLLOWLOCATION",
            TransportOption::MaxRedirs => "MAXREDIRS",
            TransportOption::ReturnTransfer => "RETURNTRANSFER",
            TransportOption::Timeout => "TIMEOUT",
            TransportOption::ConnectTimeout => "CONNECTTIMEOUT",
            TransportOption::CookieFile => "COOKIEFILE",
            TransportOption::CookieJar => "COOKIEJAR",
            TransportOption::SslVerifyPeer => "SSL_VERIFYPEER",
            TransportOption::SslVerifyHost => "SSL_VERIFYHOST",
            TransportOption::CaInfo => "CAINFO",
            TransportOption::CaPath => "CAPATH",
        }
    }
}

impl fmt::Display for TransportOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TransportOption {
    type Err = CurlyError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_uppercase();
        let name = normalized
            .strip_prefix("CURLOPT_")
            .unwrap_or(normalized.as_str());

        match name {
            "URL" => Ok(TransportOption::Url),
            "REFERER" => Ok(TransportOption::Referer),
            "USERAGENT" => Ok(TransportOption::UserAgent),
            "FOLLOWLOCATION" => Ok(TransportOption::FollowLocation),
            "MAXREDIRS" => Ok(TransportOption::MaxRedirs),
            "RETURNTRANSFER" => Ok(TransportOption::ReturnTransfer),
            "TIMEOUT" => Ok(TransportOption::Timeout),
            "CONNECTTIMEOUT" => Ok(TransportOption::ConnectTimeout),
            "COOKIEFILE" => Ok(TransportOption::CookieFile),
            "COOKIEJAR" => Ok(TransportOption::CookieJar),
            "SSL_VERIFYPEER" => Ok(TransportOption::SslVerifyPeer),
            "SSL_VERIFYHOST" => Ok(TransportOption::SslVerifyHost),
            "CAINFO" => Ok(TransportOption::CaInfo),
            "CAPATH" => Ok(TransportOption::CaPath),
            _ => Err(CurlyError::Config(format!(
                "unknown transport option '{}'",
                s
            ))),
        }
    }
}

/// A transport option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Path(PathBuf),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            OptionValue::Int(value) => Some(*value != 0),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            OptionValue::Bool(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            OptionValue::Path(value) => value.to_str(),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            OptionValue::Path(value) => Some(value),
            OptionValue::Str(value) => Some(Path::new(value)),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<PathBuf> for OptionValue {
    fn from(value: PathBuf) -> Self {
        OptionValue::Path(value)
    }
}

impl From<&Path> for OptionValue {
    fn from(value: &Path) -> Self {
        OptionValue::Path(value.to_path_buf())
    }
}

/// Stored transport options, keyed by the enumerated option set.
///
/// Keys are deduplicated case-insensitively by construction: every
/// spelling of an option name parses to the same enum variant.
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: BTreeMap<TransportOption, OptionValue>,
}

impl Options {
    pub fn set(&mut self, option: TransportOption, value: impl Into<OptionValue>) {
        self.values.insert(option, value.into());
    }

    pub fn get(&self, option: TransportOption) -> Option<&OptionValue> {
        self.values.get(&option)
    }

    pub fn unset(&mut self, option: TransportOption) {
        self.values.remove(&option);
    }

    pub fn bool_or(&self, option: TransportOption, default: bool) -> bool {
        self.get(option).and_then(OptionValue::as_bool).unwrap_or(default)
    }

    pub fn int(&self, option: TransportOption) -> Option<i64> {
        self.get(option).and_then(OptionValue::as_int)
    }

    pub fn str(&self, option: TransportOption) -> Option<&str> {
        self.get(option).and_then(OptionValue::as_str)
    }

    pub fn path(&self, option: TransportOption) -> Option<&Path> {
        self.get(option).and_then(OptionValue::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TransportOption, &OptionValue)> {
        self.values.iter()
    }
}

/// A proxy candidate, tried once in insertion order when the previous
/// attempt failed to connect.
#[derive(Debug, Clone)]
pub struct Proxy {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Proxy {
    /// The proxy endpoint in URL form, as the transport engine expects it.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// HTTP method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Download,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Download => "DOWNLOAD",
        };
        write!(f, "{}", method)
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "DOWNLOAD" => Ok(HttpMethod::Download),
            _ => Err(()),
        }
    }
}

/// Status codes treated as failures rather than successful responses.
pub fn default_bad_status_codes() -> HashSet<u16> {
    let mut codes: HashSet<u16> = (400..=418).collect();
    codes.extend(422..=426);
    codes.insert(449);
    codes.insert(450);
    codes.extend(500..=507);
    codes.insert(509);
    codes.insert(510);
    codes
}

/// The user agent announced when the caller never set one.
pub fn default_user_agent() -> String {
    std::env::var(USER_AGENT_ENV)
        .unwrap_or_else(|_| format!("curly/{} (+https://github.com/curly-rs/curly)", crate::VERSION))
}

/// Whether redirect-following should be enabled by default.
pub fn follow_redirects_allowed() -> bool {
    std::env::var_os(NO_FOLLOW_ENV).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_names_normalize_case_insensitively() {
        let plain: TransportOption = "useragent".parse().expect("plain name");
        let prefixed: TransportOption = "CURLOPT_UserAgent".parse().expect("prefixed name");
        assert_eq!(plain, TransportOption::UserAgent);
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = "CURLOPT_FTPPORT".parse::<TransportOption>().unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
    }

    #[test]
    fn options_deduplicate_spellings() {
        let mut options = Options::default();
        options.set("maxredirs".parse().unwrap(), 5u32);
        options.set("CURLOPT_MAXREDIRS".parse().unwrap(), 9u32);
        assert_eq!(options.int(TransportOption::MaxRedirs), Some(9));
    }

    #[test]
    fn option_value_coercions() {
        assert_eq!(OptionValue::Int(1).as_bool(), Some(true));
        assert_eq!(OptionValue::Bool(true).as_int(), Some(1));
        assert_eq!(OptionValue::Str("x".into()).as_path(), Some(Path::new("x")));
        assert_eq!(OptionValue::Bool(false).as_str(), None);
    }

    #[test]
    fn method_round_trip() {
        for name in ["GET", "POST", "PUT", "DELETE", "HEAD", "DOWNLOAD"] {
            let method: HttpMethod = name.parse().expect("known method");
            assert_eq!(method.to_string(), name);
        }
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn bad_status_defaults_cover_client_and_server_errors() {
        let codes = default_bad_status_codes();
        assert!(codes.contains(&404));
        assert!(codes.contains(&500));
        assert!(!codes.contains(&302));
        assert!(!codes.contains(&200));
    }
}
