//! HTTP response parsing and body access.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{CurlyError, Result};

/// A parsed transport result: status line, canonical-cased headers and a
/// body that is either buffered or sitting in a downloaded file.
#[derive(Debug)]
pub struct Response {
    http_version: String,
    status_code: u16,
    status_text: String,
    headers: HashMap<String, String>,
    body: Body,
}

#[derive(Debug)]
enum Body {
    Bytes(Vec<u8>),
    File(PathBuf),
}

impl Response {
    /// Parse a raw transport result. The head block occupies the first
    /// `header_size` bytes; everything after it is the body.
    pub fn from_raw(raw: &[u8], header_size: usize) -> Result<Response> {
        let split = header_size.min(raw.len());
        Self::from_parts(&raw[..split], raw[split..].to_vec())
    }

    pub(crate) fn from_parts(head: &[u8], body: Vec<u8>) -> Result<Response> {
        let (http_version, status_code, status_text, headers) = parse_head(head)?;
        Ok(Response {
            http_version,
            status_code,
            status_text,
            headers,
            body: Body::Bytes(body),
        })
    }

    /// Finalize a download: parse the head, then move the staged file
    /// into its target path and normalize permissions. The staged file
    /// is cleaned up automatically when finalization fails.
    pub(crate) fn from_download(
        head: &[u8],
        staged: NamedTempFile,
        target: &Path,
    ) -> Result<Response> {
        let (http_version, status_code, status_text, headers) = parse_head(head)?;
        if headers.is_empty() {
            return Err(CurlyError::Protocol(
                "downloaded content has no parseable headers".to_string(),
            ));
        }

        staged.persist(target).map_err(|e| {
            CurlyError::State(format!(
                "cannot move download into '{}': {}",
                target.display(),
                e.error
            ))
        })?;
        normalize_permissions(target, 0o644)?;

        Ok(Response {
            http_version,
            status_code,
            status_text,
            headers,
            body: Body::File(target.to_path_buf()),
        })
    }

    /// HTTP version from the status line, e.g. `1.1`.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase from the status line, e.g. `OK`.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Code and reason together, e.g. `200 OK`.
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            self.status_code.to_string()
        } else {
            format!("{} {}", self.status_code, self.status_text)
        }
    }

    /// Look up a header by its canonical-cased name (`Content-Type`).
    /// A missing header is `None`, not an error.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The response body: buffered bytes, or read from the downloaded
    /// file when the body was never held in memory.
    pub fn body(&self) -> Result<Cow<'_, [u8]>> {
        match &self.body {
            Body::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Body::File(path) => fs::read(path).map(Cow::Owned).map_err(|e| {
                CurlyError::State(format!("cannot read '{}': {}", path.display(), e))
            }),
        }
    }

    /// The body decoded as UTF-8, lossily.
    pub fn body_str(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(self.body()?.as_ref()).into_owned())
    }

    /// Deserialize a JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.body()?.as_ref())?)
    }

    /// Path of the downloaded file, when this response came from a
    /// download.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.body {
            Body::File(path) => Some(path),
            Body::Bytes(_) => None,
        }
    }

    /// Open the downloaded file for reading.
    pub fn open_file(&self) -> Result<fs::File> {
        let path = self.file_path().ok_or_else(|| {
            CurlyError::State("response does not carry a downloaded file".to_string())
        })?;
        fs::File::open(path)
            .map_err(|e| CurlyError::State(format!("cannot open '{}': {}", path.display(), e)))
    }

    /// Move the downloaded file to a new location, creating parent
    /// directories as needed.
    pub fn move_file(&mut self, destination: &Path) -> Result<()> {
        let source = self.file_path().ok_or_else(|| {
            CurlyError::State("response does not carry a downloaded file".to_string())
        })?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CurlyError::State(format!("cannot create '{}': {}", parent.display(), e))
                })?;
            }
        }
        fs::rename(source, destination).map_err(|e| {
            CurlyError::State(format!(
                "cannot move '{}' to '{}': {}",
                source.display(),
                destination.display(),
                e
            ))
        })?;
        normalize_permissions(destination, 0o644)?;
        self.body = Body::File(destination.to_path_buf());
        Ok(())
    }
}

type ParsedHead = (String, u16, String, HashMap<String, String>);

fn parse_head(head: &[u8]) -> Result<ParsedHead> {
    let head = String::from_utf8_lossy(head);
    let mut lines = head.lines();

    let status_line = lines
        .next()
        .filter(|line| !line.is_empty())
        .ok_or_else(|| CurlyError::Protocol("empty header block".to_string()))?;
    let (version, code, text) = parse_status_line(status_line)?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(
                canonical_header_name(name.trim()),
                value.trim().to_string(),
            );
        }
    }

    Ok((version, code, text, headers))
}

fn parse_status_line(line: &str) -> Result<(String, u16, String)> {
    let malformed = || CurlyError::Protocol(format!("malformed status line '{}'", line));

    let rest = line.strip_prefix("HTTP/").ok_or_else(malformed)?;
    let (version, rest) = rest.split_once(' ').ok_or_else(malformed)?;
    let (code, text) = match rest.split_once(' ') {
        Some((code, text)) => (code, text.trim()),
        None => (rest, ""),
    };
    let code = code.parse::<u16>().map_err(|_| malformed())?;

    Ok((version.to_string(), code, text.to_string()))
}

/// `content-type` -> `Content-Type`, the canonical HTTP casing the
/// header map is keyed by.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn normalize_permissions(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
            CurlyError::State(format!(
                "cannot set permissions on '{}': {}",
                path.display(),
                e
            ))
        })?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}
