//! Keeps files that live under the site root but are not part of the site
//! from being served: dotfiles (`.env` holds the SMTP password) and the
//! inbox itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Decides which request paths must never reach the static file service.
#[derive(Debug, Clone)]
pub struct PrivateFiles {
    site_root: PathBuf,
    hidden: Vec<String>,
}

impl PrivateFiles {
    /// Hide `files` (any path form) in addition to every dot-segment path.
    pub fn new<'a>(site_root: &Path, files: impl IntoIterator<Item = &'a Path>) -> Self {
        Self {
            site_root: resolve(site_root),
            hidden: files
                .into_iter()
                .map(|file| comparable(&resolve_file(file)))
                .collect(),
        }
    }

    /// True when `uri_path` names a dotfile, a dot directory, or a hidden file.
    ///
    /// The path is percent-decoded first, the same way the file service
    /// decodes it, so `/%2Eenv` is treated like `/.env`.
    #[must_use]
    pub fn is_private(&self, uri_path: &str) -> bool {
        let decoded = percent_decode(uri_path);
        let segments: Vec<&str> = decoded
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.iter().any(|segment| segment.starts_with('.')) {
            return true;
        }

        let candidate = segments
            .iter()
            .fold(self.site_root.clone(), |path, segment| path.join(segment));
        let candidate = comparable(&candidate);
        self.hidden.iter().any(|hidden| *hidden == candidate)
    }

    /// True when `file` would be reachable through the static file service.
    #[must_use]
    pub fn is_under_site_root(&self, file: &Path) -> bool {
        resolve_file(file).starts_with(&self.site_root)
    }
}

/// Answer `404` for private paths before they reach the static file service.
pub async fn hide_private_files(
    State(private): State<Arc<PrivateFiles>>,
    request: Request,
    next: Next,
) -> Response {
    if private.is_private(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "refused private file");
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

fn resolve(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Like [`resolve`], but the file itself may not exist yet.
fn resolve_file(file: &Path) -> PathBuf {
    match (file.parent(), file.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            resolve(parent).join(name)
        }
        (_, Some(name)) => resolve(Path::new(".")).join(name),
        _ => resolve(file),
    }
}

/// Case-folded so case-insensitive filesystems cannot be used to sidestep
/// the check.
fn comparable(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        let escaped = (bytes[index] == b'%')
            .then(|| bytes.get(index + 1..index + 3))
            .flatten()
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                index += 3;
            }
            None => {
                out.push(bytes[index]);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn private_in(site: &Path) -> PrivateFiles {
        let inbox = site.join("data").join("inbox.jsonl");
        PrivateFiles::new(site, [inbox.as_path()])
    }

    #[test]
    fn dotfiles_and_dot_directories_are_private() {
        let site = tempfile::tempdir().unwrap();
        let private = private_in(site.path());

        assert!(private.is_private("/.env"));
        assert!(private.is_private("/.git/config"));
        assert!(private.is_private("/assets/.htpasswd"));
        assert!(private.is_private("/%2Eenv"));
        assert!(private.is_private("/%2eenv"));
    }

    #[test]
    fn inbox_is_private_in_any_spelling() {
        let site = tempfile::tempdir().unwrap();
        let private = private_in(site.path());

        assert!(private.is_private("/data/inbox.jsonl"));
        assert!(private.is_private("//data//inbox.jsonl"));
        assert!(private.is_private("/data/inbox%2Ejsonl"));
        assert!(private.is_private("/DATA/Inbox.JSONL"));
    }

    #[test]
    fn site_pages_are_public() {
        let site = tempfile::tempdir().unwrap();
        let private = private_in(site.path());

        assert!(!private.is_private("/"));
        assert!(!private.is_private("/contact.html"));
        assert!(!private.is_private("/data/prices.json"));
        assert!(!private.is_private("/img/logo.v2.png"));
    }

    #[test]
    fn inbox_location_is_checked_against_site_root() {
        let site = tempfile::tempdir().unwrap();
        let private = private_in(site.path());
        assert!(private.is_under_site_root(&site.path().join("inbox.jsonl")));

        let elsewhere = tempfile::tempdir().unwrap();
        assert!(!private.is_under_site_root(&elsewhere.path().join("inbox.jsonl")));
    }

    #[test]
    fn percent_decoding_keeps_invalid_escapes() {
        assert_eq!(percent_decode("/a%20b"), "/a b");
        assert_eq!(percent_decode("/100%"), "/100%");
        assert_eq!(percent_decode("/%zz"), "/%zz");
    }
}
