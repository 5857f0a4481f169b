//! Request configuration and the send loop.
//!
//! A `Request` owns the per-client state: headers, transport options,
//! proxy candidates, cookie file, download folder and redirect policy.
//! Every verb funnels into `send_request`, which rotates proxies on
//! connection failure and follows redirects up to the configured bound.

use std::collections::{HashMap, HashSet};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use url::Url;

use crate::config::{
    default_bad_status_codes, default_user_agent, follow_redirects_allowed, HttpMethod,
    OptionValue, Options, Proxy, TransportOption, DEFAULT_MAX_REDIRECTS,
};
use crate::error::{CurlyError, Result};
use crate::http::response::Response;
use crate::http::transport::{self, ExchangeBody, Transport};
use crate::utils;

type RedirectPredicate = Box<dyn FnMut(&Response) -> bool>;

/// A configurable blocking HTTP client.
pub struct Request {
    url: Option<String>,
    method: HttpMethod,
    headers: HashMap<String, String>,
    options: Options,
    proxies: Vec<Proxy>,
    max_redirects: u32,
    bad_status_codes: HashSet<u16>,
    download_folder: Option<PathBuf>,
    download_path: Option<PathBuf>,
    redirect_confirm: Option<RedirectPredicate>,
    transport: Transport,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("options", &self.options)
            .field("proxies", &self.proxies)
            .field("max_redirects", &self.max_redirects)
            .field("bad_status_codes", &self.bad_status_codes)
            .field("download_folder", &self.download_folder)
            .field("download_path", &self.download_path)
            .finish_non_exhaustive()
    }
}

impl Request {
    pub fn new() -> Self {
        let mut options = Options::default();
        options.set(TransportOption::UserAgent, default_user_agent());
        options.set(TransportOption::ReturnTransfer, true);
        options.set(TransportOption::FollowLocation, follow_redirects_allowed());
        options.set(TransportOption::MaxRedirs, DEFAULT_MAX_REDIRECTS);

        Self {
            url: None,
            method: HttpMethod::Get,
            headers: HashMap::new(),
            options,
            proxies: Vec::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            bad_status_codes: default_bad_status_codes(),
            download_folder: None,
            download_path: None,
            redirect_confirm: None,
            transport: Transport::new(),
        }
    }

    pub fn with_url(url: &str) -> Self {
        let mut request = Self::new();
        request.set_url(url);
        request
    }

    // ---- options ----------------------------------------------------

    /// Set a transport option by name. Names are accepted with or
    /// without a `CURLOPT_` prefix, case-insensitively.
    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        let option = name.parse::<TransportOption>()?;
        Ok(self.set(option, value))
    }

    /// Typed variant of [`set_option`](Self::set_option). Setting
    /// `MAXREDIRS` also updates the redirect bound.
    pub fn set(&mut self, option: TransportOption, value: impl Into<OptionValue>) -> &mut Self {
        let value = value.into();
        if option == TransportOption::MaxRedirs {
            if let Some(limit) = value.as_int() {
                self.max_redirects = limit.max(0) as u32;
            }
        }
        self.options.set(option, value);
        self
    }

    pub fn set_options<'a, I>(&mut self, options: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        for (name, value) in options {
            self.set_option(name, value)?;
        }
        Ok(self)
    }

    pub fn option_by_name(&self, name: &str) -> Result<Option<&OptionValue>> {
        Ok(self.options.get(name.parse::<TransportOption>()?))
    }

    pub fn option(&self, option: TransportOption) -> Option<&OptionValue> {
        self.options.get(option)
    }

    // ---- headers ----------------------------------------------------

    /// Set a request header. An empty value removes the header.
    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.headers.remove(name);
        } else {
            self.headers.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn set_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            self.set_header(name.as_ref(), value.as_ref());
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    // ---- convenience setters ----------------------------------------

    pub fn set_referer(&mut self, url: &str) -> &mut Self {
        self.set(TransportOption::Referer, url)
    }

    pub fn referer(&self) -> Option<&str> {
        self.options.str(TransportOption::Referer)
    }

    pub fn set_user_agent(&mut self, user_agent: &str) -> &mut Self {
        self.set(TransportOption::UserAgent, user_agent)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.options.str(TransportOption::UserAgent)
    }

    pub fn set_follow_redirects(&mut self, follow: bool) -> &mut Self {
        self.set(TransportOption::FollowLocation, follow)
    }

    pub fn follow_redirects(&self) -> bool {
        self.options.bool_or(TransportOption::FollowLocation, false)
    }

    pub fn set_return_transfer(&mut self, buffer: bool) -> &mut Self {
        self.set(TransportOption::ReturnTransfer, buffer)
    }

    pub fn return_transfer(&self) -> bool {
        self.options.bool_or(TransportOption::ReturnTransfer, true)
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.set(TransportOption::Timeout, timeout.as_secs() as i64)
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.set(TransportOption::ConnectTimeout, timeout.as_secs() as i64)
    }

    pub fn set_url(&mut self, url: &str) -> &mut Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The method used by the most recent request.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Replace the set of status codes treated as failures.
    pub fn set_bad_status_codes(&mut self, codes: HashSet<u16>) -> &mut Self {
        self.bad_status_codes = codes;
        self
    }

    pub fn bad_status_codes(&self) -> &HashSet<u16> {
        &self.bad_status_codes
    }

    /// Install a predicate consulted before each redirect is followed.
    /// Returning `false` stops the chain and hands back the redirect
    /// response as-is.
    pub fn confirm_redirects(
        &mut self,
        confirm: impl FnMut(&Response) -> bool + 'static,
    ) -> &mut Self {
        self.redirect_confirm = Some(Box::new(confirm));
        self
    }

    // ---- proxies ----------------------------------------------------

    /// Append a proxy candidate. Candidates are tried in insertion
    /// order when a connection fails; reachability is not validated
    /// here.
    pub fn add_proxy(
        &mut self,
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        timeout: Duration,
    ) -> &mut Self {
        self.proxies.push(Proxy {
            host: host.to_string(),
            port,
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            timeout,
        });
        self
    }

    pub fn proxies(&self) -> &[Proxy] {
        &self.proxies
    }

    // ---- filesystem-backed configuration ----------------------------

    /// Wire a cookie file into the engine's read and write options.
    /// The file is created when absent; an unwritable target leaves the
    /// stored options untouched.
    pub fn set_cookie_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CurlyError::Config("cookie file path is empty".to_string()));
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                CurlyError::State(format!(
                    "cookie file '{}' is not writable: {}",
                    path.display(),
                    e
                ))
            })?;

        self.set(TransportOption::CookieFile, path);
        self.set(TransportOption::CookieJar, path);
        Ok(self)
    }

    pub fn cookie_file(&self) -> Option<&Path> {
        self.options.path(TransportOption::CookieFile)
    }

    /// Create the download folder if needed and verify it is writable.
    pub fn set_download_folder(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CurlyError::Config(
                "download folder path is empty".to_string(),
            ));
        }

        std::fs::create_dir_all(path).map_err(|e| {
            CurlyError::State(format!(
                "cannot create download folder '{}': {}",
                path.display(),
                e
            ))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o754));
        }

        // Probe writability instead of trusting metadata.
        NamedTempFile::new_in(path).map_err(|e| {
            CurlyError::State(format!(
                "download folder '{}' is not writable: {}",
                path.display(),
                e
            ))
        })?;

        self.download_folder = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn download_folder(&self) -> Option<&Path> {
        self.download_folder.as_deref()
    }

    /// Target path of the most recent download.
    pub fn download_path(&self) -> Option<&Path> {
        self.download_path.as_deref()
    }

    // ---- TLS --------------------------------------------------------

    pub fn set_certification_verify(&mut self, verify: bool) -> &mut Self {
        self.set(TransportOption::SslVerifyPeer, verify)
    }

    /// Trust a single certificate file, replacing any trusted
    /// certificate directory. `verify_host` follows the 0/1/2 scheme:
    /// 0 and 1 skip hostname verification, 2 verifies fully.
    pub fn set_trusted_certificate(
        &mut self,
        certificate: impl AsRef<Path>,
        verify_host: u8,
    ) -> Result<&mut Self> {
        let certificate = certificate.as_ref();
        check_verify_host(verify_host)?;
        check_readable(certificate)?;

        self.options.unset(TransportOption::CaPath);
        self.set(TransportOption::SslVerifyPeer, true);
        self.set(TransportOption::SslVerifyHost, i64::from(verify_host));
        self.set(TransportOption::CaInfo, certificate);
        Ok(self)
    }

    /// Trust every certificate in a directory, replacing any single
    /// trusted certificate.
    pub fn set_trusted_certificates_directory(
        &mut self,
        directory: impl AsRef<Path>,
        verify_host: u8,
    ) -> Result<&mut Self> {
        let directory = directory.as_ref();
        check_verify_host(verify_host)?;
        if !directory.is_dir() {
            return Err(CurlyError::Config(format!(
                "certificate directory '{}' is not readable",
                directory.display()
            )));
        }

        self.options.unset(TransportOption::CaInfo);
        self.set(TransportOption::SslVerifyPeer, true);
        self.set(TransportOption::SslVerifyHost, i64::from(verify_host));
        self.set(TransportOption::CaPath, directory);
        Ok(self)
    }

    pub fn trusted_certificates_path(&self) -> Option<&Path> {
        self.options
            .path(TransportOption::CaPath)
            .or_else(|| self.options.path(TransportOption::CaInfo))
    }

    // ---- verbs ------------------------------------------------------

    /// GET. An empty `url` falls back to the client's pre-set URL.
    pub fn get(&mut self, url: &str) -> Result<Response> {
        let url = self.target_url(url)?;
        self.request(HttpMethod::Get, &url, None)
    }

    /// GET with query parameters appended to the URL.
    pub fn get_with_params(&mut self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        let target = self.target_url(url)?;
        let mut url = utils::absolute_url(&target)?;
        url.query_pairs_mut().extend_pairs(params);
        self.request(HttpMethod::Get, url.as_str(), None)
    }

    /// POST. The body must be non-empty.
    pub fn post(&mut self, url: &str, body: impl Into<Vec<u8>>) -> Result<Response> {
        let body = body.into();
        if body.is_empty() {
            return Err(CurlyError::Config(
                "POST requires a non-empty body".to_string(),
            ));
        }
        let url = self.target_url(url)?;
        self.request(HttpMethod::Post, &url, Some(body))
    }

    /// POST a form-encoded parameter list.
    pub fn post_form(&mut self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        if params.is_empty() {
            return Err(CurlyError::Config(
                "POST requires a non-empty body".to_string(),
            ));
        }
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        if self.header("Content-Type").is_none() {
            self.set_header("Content-Type", "application/x-www-form-urlencoded");
        }
        let url = self.target_url(url)?;
        self.request(HttpMethod::Post, &url, Some(body.into_bytes()))
    }

    pub fn put(&mut self, url: &str, body: impl Into<Vec<u8>>) -> Result<Response> {
        let body = body.into();
        let body = if body.is_empty() { None } else { Some(body) };
        let url = self.target_url(url)?;
        self.request(HttpMethod::Put, &url, body)
    }

    pub fn delete(&mut self, url: &str) -> Result<Response> {
        let url = self.target_url(url)?;
        self.request(HttpMethod::Delete, &url, None)
    }

    pub fn head(&mut self, url: &str) -> Result<Response> {
        let url = self.target_url(url)?;
        self.request(HttpMethod::Head, &url, None)
    }

    /// Download into the configured folder. The file name defaults to
    /// the last path segment of the URL; any directory components in an
    /// explicit name are stripped.
    pub fn download(&mut self, url: &str, file_name: Option<&str>) -> Result<Response> {
        let target = self.target_url(url)?;
        let parsed = utils::absolute_url(&target)?;

        let folder = self.download_folder.clone().ok_or_else(|| {
            CurlyError::State(
                "download folder is not configured; call set_download_folder first".to_string(),
            )
        })?;

        let name = match file_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => utils::file_name_from_url(&parsed),
        };
        let name = Path::new(&name)
            .file_name()
            .ok_or_else(|| CurlyError::Config(format!("invalid download file name '{}'", name)))?
            .to_os_string();

        self.download_path = Some(folder.join(name));
        self.request(HttpMethod::Download, parsed.as_str(), None)
    }

    /// Issue one logical request, redirects included.
    pub fn request(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        self.send_request(method, url, body, 0)
    }

    // ---- the send loop ----------------------------------------------

    fn send_request(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
        redirects: u32,
    ) -> Result<Response> {
        if redirects > self.max_redirects {
            return Err(CurlyError::RedirectLoop(self.max_redirects));
        }

        let url = utils::absolute_url(url)?;
        self.method = method;
        self.options.set(TransportOption::Url, url.as_str());

        let staging_dir = if method == HttpMethod::Download {
            let target = self
                .download_path
                .as_ref()
                .ok_or_else(|| CurlyError::State("download target is not set".to_string()))?;
            Some(
                target
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf(),
            )
        } else {
            None
        };

        let buffer_body = self.return_transfer();
        let mut attempt = 0usize;
        let exchange = loop {
            let proxy = self.proxies.get(attempt);
            if let Some(proxy) = proxy {
                log::debug!("attempt {} via proxy {}", attempt + 1, proxy.url());
            }

            let result = self.transport.client(&self.options, proxy).and_then(|client| {
                self.transport.execute(
                    &client,
                    method,
                    &url,
                    &self.headers,
                    self.options.str(TransportOption::Referer),
                    body.as_deref(),
                    staging_dir.as_deref(),
                    buffer_body,
                )
            });

            match result {
                Ok(exchange) => break exchange,
                Err(err)
                    if transport::is_connection_failure(&err)
                        && attempt + 1 < self.proxies.len() =>
                {
                    log::warn!("connection failed ({}), trying next proxy", err);
                    attempt += 1;
                }
                Err(CurlyError::Http(err)) => {
                    return Err(CurlyError::FailedRequest {
                        message: err.to_string(),
                        status: err.status().map(|s| s.as_u16()),
                    });
                }
                Err(err) => return Err(err),
            }
        };

        let effective_url = exchange.effective_url.clone();
        let response = match exchange.body {
            ExchangeBody::File(staged) => {
                let target = self
                    .download_path
                    .clone()
                    .ok_or_else(|| CurlyError::State("download target is not set".to_string()))?;
                Response::from_download(&exchange.head, staged, &target)?
            }
            ExchangeBody::Bytes(bytes) => Response::from_parts(&exchange.head, bytes)?,
        };

        if self.bad_status_codes.contains(&response.status_code()) {
            return Err(CurlyError::BadStatus {
                status: response.status_code(),
                response: Box::new(response),
            });
        }

        let location = response.header("Location").map(str::to_string);
        if let Some(location) = location {
            if self.follow_redirects() {
                let next = resolve_location(Some(&effective_url), &location)?;

                let confirmed = match &mut self.redirect_confirm {
                    Some(confirm) => confirm(&response),
                    None => true,
                };
                if !confirmed {
                    log::debug!("redirect to {} declined, returning current response", next);
                    return Ok(response);
                }

                log::debug!("following redirect to {}", next);
                return self.send_request(method, next.as_str(), None, redirects + 1);
            }
        }

        Ok(response)
    }

    fn target_url(&self, url: &str) -> Result<String> {
        if !url.is_empty() {
            return Ok(url.to_string());
        }
        self.url.clone().ok_or_else(|| {
            CurlyError::Config("no URL given and no client URL configured".to_string())
        })
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a `Location` value against the effective URL of the previous
/// response. Absolute targets stand alone; relative targets inherit
/// scheme and host from the base, and a relative target with no base is
/// a state error.
pub(crate) fn resolve_location(base: Option<&Url>, location: &str) -> Result<Url> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| {
                CurlyError::State(format!(
                    "cannot resolve redirect target '{}': no base URL supplies a scheme and host",
                    location
                ))
            })?;
            base.join(location).map_err(|e| {
                CurlyError::State(format!(
                    "cannot resolve redirect target '{}' against '{}': {}",
                    location, base, e
                ))
            })
        }
        Err(e) => Err(CurlyError::State(format!(
            "invalid redirect target '{}': {}",
            location, e
        ))),
    }
}

fn check_verify_host(verify_host: u8) -> Result<()> {
    if verify_host > 2 {
        return Err(CurlyError::Config(format!(
            "verify host must be 0, 1 or 2, got {}",
            verify_host
        )));
    }
    Ok(())
}

fn check_readable(path: &Path) -> Result<()> {
    std::fs::File::open(path).map_err(|e| {
        CurlyError::Config(format!(
            "certificate '{}' is not readable: {}",
            path.display(),
            e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn relative_location_inherits_scheme_and_host() {
        let base = Url::parse("http://a.example/bar/baz").unwrap();
        let next = resolve_location(Some(&base), "/foo").unwrap();
        assert_eq!(next.as_str(), "http://a.example/foo");

        let next = resolve_location(Some(&base), "qux").unwrap();
        assert_eq!(next.as_str(), "http://a.example/bar/qux");
    }

    #[test]
    fn absolute_location_stands_alone() {
        let base = Url::parse("http://a.example/").unwrap();
        let next = resolve_location(Some(&base), "https://b.example/x").unwrap();
        assert_eq!(next.as_str(), "https://b.example/x");
    }

    #[test]
    fn relative_location_without_base_is_a_state_error() {
        let err = resolve_location(None, "/foo").unwrap_err();
        assert!(matches!(err, CurlyError::State(_)));
    }

    #[test]
    fn maxredirs_option_updates_the_bound() {
        let mut request = Request::new();
        request.set_option("CURLOPT_MAXREDIRS", 3i64).unwrap();
        assert_eq!(request.max_redirects(), 3);

        request.set(TransportOption::MaxRedirs, 0i64);
        assert_eq!(request.max_redirects(), 0);
    }

    #[test]
    fn unknown_option_name_is_rejected() {
        let mut request = Request::new();
        let err = request.set_option("CURLOPT_VERBOSE", true).unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
    }

    #[test]
    fn empty_header_value_removes_the_header() {
        let mut request = Request::new();
        request.set_header("X-Token", "secret");
        assert_eq!(request.header("X-Token"), Some("secret"));

        request.set_header("X-Token", "");
        assert_eq!(request.header("X-Token"), None);
    }

    #[test]
    fn post_requires_a_body() {
        let mut request = Request::new();
        let err = request.post("http://localhost/ignored", "").unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));

        let err = request.post_form("http://localhost/ignored", &[]).unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
    }

    #[test]
    fn empty_url_without_preset_is_rejected() {
        let mut request = Request::new();
        let err = request.get("").unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
    }

    #[test]
    fn download_without_folder_is_a_state_error() {
        let mut request = Request::new();
        let err = request.download("http://localhost/file.bin", None).unwrap_err();
        assert!(matches!(err, CurlyError::State(_)));
    }

    #[test]
    fn cookie_file_with_missing_parent_leaves_options_untouched() {
        let mut request = Request::new();
        let err = request
            .set_cookie_file("/nonexistent-curly-dir/cookies.txt")
            .unwrap_err();
        assert!(matches!(err, CurlyError::State(_)));
        assert_eq!(request.cookie_file(), None);
        assert!(request.option(TransportOption::CookieJar).is_none());
    }

    #[test]
    fn cookie_file_is_created_and_wired_into_both_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.txt");

        let mut request = Request::new();
        request.set_cookie_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(request.cookie_file(), Some(path.as_path()));
        assert_eq!(
            request.option(TransportOption::CookieJar).and_then(|v| v.as_path()),
            Some(path.as_path())
        );
    }

    #[test]
    fn verify_host_range_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = Request::new();

        let err = request
            .set_trusted_certificates_directory(dir.path(), 3)
            .unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
    }

    #[test]
    fn unreadable_certificate_is_rejected() {
        let mut request = Request::new();
        let err = request
            .set_trusted_certificate("/nonexistent-curly-cert.pem", 2)
            .unwrap_err();
        assert!(matches!(err, CurlyError::Config(_)));
        assert_eq!(request.trusted_certificates_path(), None);
    }

    #[test]
    fn certificate_file_and_directory_are_mutually_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("ca.pem");
        std::fs::File::create(&cert)
            .unwrap()
            .write_all(b"dummy")
            .unwrap();

        let mut request = Request::new();
        request.set_trusted_certificate(&cert, 2).unwrap();
        assert_eq!(request.trusted_certificates_path(), Some(cert.as_path()));

        request
            .set_trusted_certificates_directory(dir.path(), 2)
            .unwrap();
        assert_eq!(request.trusted_certificates_path(), Some(dir.path()));
        assert!(request.option(TransportOption::CaInfo).is_none());
    }

    #[test]
    fn download_folder_is_created_and_probed() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("downloads");

        let mut request = Request::new();
        request.set_download_folder(&folder).unwrap();

        assert!(folder.is_dir());
        assert_eq!(request.download_folder(), Some(folder.as_path()));
    }
}
