//! Adapter over the blocking transport engine.
//!
//! Each attempt gets a fresh client, mirroring a fresh transport handle:
//! proxy, timeout and TLS settings can differ between attempts, and no
//! connection state leaks from a failed proxy into the next try. The
//! cookie jar is the one piece shared across attempts and redirect
//! cycles, so cookies set by one hop reach the next.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::{redirect, Certificate, Method, Version};
use tempfile::NamedTempFile;
use url::Url;

use crate::config::{HttpMethod, Options, Proxy, TransportOption};
use crate::error::{CurlyError, Result};

/// One completed transport call: serialized head block, effective URL
/// and the body (buffered, or staged on disk for downloads).
pub(crate) struct Exchange {
    pub head: Vec<u8>,
    pub effective_url: Url,
    pub body: ExchangeBody,
}

pub(crate) enum ExchangeBody {
    Bytes(Vec<u8>),
    File(NamedTempFile),
}

pub(crate) struct Transport {
    jar: Arc<Jar>,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            jar: Arc::new(Jar::default()),
        }
    }

    /// Build a client for one attempt. Redirects are never delegated to
    /// the engine; the send loop resolves them itself.
    pub fn client(&self, options: &Options, proxy: Option<&Proxy>) -> Result<Client> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::none())
            .cookie_provider(self.jar.clone());

        if let Some(user_agent) = options.str(TransportOption::UserAgent) {
            builder = builder.user_agent(user_agent.to_string());
        }

        // A proxy entry carries its own overall timeout.
        let timeout = proxy
            .map(|p| p.timeout)
            .or_else(|| seconds(options, TransportOption::Timeout));
        builder = builder.timeout(timeout);

        if let Some(connect_timeout) = seconds(options, TransportOption::ConnectTimeout) {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(proxy) = proxy {
            let mut engine_proxy = reqwest::Proxy::all(proxy.url())?;
            if let (Some(username), Some(password)) = (&proxy.username, &proxy.password) {
                engine_proxy = engine_proxy.basic_auth(username, password);
            }
            builder = builder.proxy(engine_proxy);
        }

        if !options.bool_or(TransportOption::SslVerifyPeer, true) {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(verify_host) = options.int(TransportOption::SslVerifyHost) {
            if verify_host < 2 {
                builder = builder.danger_accept_invalid_hostnames(true);
            }
        }

        if let Some(certificate) = options.path(TransportOption::CaInfo) {
            builder = builder.add_root_certificate(read_certificate(certificate)?);
        }
        if let Some(directory) = options.path(TransportOption::CaPath) {
            for certificate in certificates_in(directory)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        Ok(builder.build()?)
    }

    /// Execute one exchange. `download_dir` switches the body to an
    /// on-disk staging file; `buffer_body` off drains the body without
    /// keeping it.
    pub fn execute(
        &self,
        client: &Client,
        method: HttpMethod,
        url: &Url,
        headers: &HashMap<String, String>,
        referer: Option<&str>,
        body: Option<&[u8]>,
        download_dir: Option<&Path>,
        buffer_body: bool,
    ) -> Result<Exchange> {
        let engine_method = match method {
            HttpMethod::Get | HttpMethod::Download => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        };

        let mut builder = client.request(engine_method, url.clone());
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(referer) = referer {
            builder = builder.header("Referer", referer);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let mut response = builder.send()?;

        let effective_url = response.url().clone();
        let status = response.status().as_u16();
        let head = serialize_head(&response);

        let body = if let Some(dir) = download_dir {
            let mut staged = NamedTempFile::new_in(dir).map_err(|e| {
                CurlyError::State(format!("cannot stage download in '{}': {}", dir.display(), e))
            })?;
            io::copy(&mut response, staged.as_file_mut())
                .map_err(|e| CurlyError::State(format!("download write failed: {}", e)))?;
            ExchangeBody::File(staged)
        } else if buffer_body {
            ExchangeBody::Bytes(response.bytes()?.to_vec())
        } else {
            io::copy(&mut response, &mut io::sink())
                .map_err(|e| CurlyError::State(format!("discarding body failed: {}", e)))?;
            ExchangeBody::Bytes(Vec::new())
        };

        log::debug!("{} {} -> {}", method, url, status);

        Ok(Exchange {
            head,
            effective_url,
            body,
        })
    }
}

/// A connection failure is the one reversible transport error: the send
/// loop rotates to the next proxy on it.
pub(crate) fn is_connection_failure(err: &CurlyError) -> bool {
    matches!(err, CurlyError::Http(e) if e.is_connect())
}

fn seconds(options: &Options, option: TransportOption) -> Option<Duration> {
    options
        .int(option)
        .filter(|secs| *secs > 0)
        .map(|secs| Duration::from_secs(secs as u64))
}

fn read_certificate(path: &Path) -> Result<Certificate> {
    let pem = std::fs::read(path)
        .map_err(|e| CurlyError::State(format!("cannot read certificate '{}': {}", path.display(), e)))?;
    Ok(Certificate::from_pem(&pem)?)
}

fn certificates_in(directory: &Path) -> Result<Vec<Certificate>> {
    let entries = std::fs::read_dir(directory).map_err(|e| {
        CurlyError::State(format!(
            "cannot read certificate directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    let mut certificates = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| CurlyError::State(format!("certificate directory walk failed: {}", e)))?
            .path();
        let looks_like_cert = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("pem") | Some("crt")
        );
        if looks_like_cert {
            certificates.push(read_certificate(&path)?);
        }
    }
    Ok(certificates)
}

/// Serialize the engine's parsed response head back into an HTTP head
/// block, the shape a raw transport result arrives in.
fn serialize_head(response: &reqwest::blocking::Response) -> Vec<u8> {
    let status = response.status();
    let mut head = format!(
        "{} {} {}\r\n",
        version_str(response.version()),
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .into_bytes();

    for (name, value) in response.headers() {
        head.extend_from_slice(name.as_str().as_bytes());
        head.extend_from_slice(b": ");
        head.extend_from_slice(value.as_bytes());
        head.extend_from_slice(b"\r\n");
    }
    head.extend_from_slice(b"\r\n");
    head
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/1.1",
    }
}
