// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Blob bucket layout, upload naming, and public media URLs.

/// Aerial photographs of sites.
pub const SITE_AERIAL_BUCKET: &str = "sites/site_aerial";
/// Site layout drawings.
pub const SITE_LAYOUT_BUCKET: &str = "sites/site_layout";
/// Site documentation.
pub const SITE_DOCS_BUCKET: &str = "sites/site_docs";
/// Ticket attachments, under the photo and document prefixes.
pub const TICKET_BUCKET: &str = "saferay";
pub const TICKET_PHOTO_PREFIX: &str = "tickets/photos";
pub const TICKET_DOC_PREFIX: &str = "tickets/docs";

const FALLBACK_EXTENSION: &str = "bin";

/// Builds the stored name for an uploaded file.
///
/// The name is `<millis>-<base36 random>.<ext>`, where the extension is
/// taken from the last `.` segment of the original name (or the whole name
/// when it has no dot) and reduced to ASCII alphanumerics.
#[must_use]
pub fn upload_file_name(original: &str, millis: i128, random: u64) -> String {
    let raw_extension: &str = original.rsplit('.').next().unwrap_or_default();
    let mut extension: String = raw_extension
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if extension.is_empty() {
        extension = String::from(FALLBACK_EXTENSION);
    }
    format!("{millis}-{}.{extension}", to_base36(random))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return String::from("0");
    }
    let mut out: Vec<u8> = Vec::new();
    while value > 0 {
        // value % 36 always indexes inside DIGITS
        #[allow(clippy::cast_possible_truncation)]
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Turns stored file names into public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base_url: String,
}

impl MediaUrls {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the URL of `path` inside `bucket`.
    #[must_use]
    pub fn url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.base_url)
    }

    /// Returns the URL of a stored file, or `None` when nothing is stored.
    #[must_use]
    pub fn optional_url(&self, bucket: &str, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.url(bucket, p))
    }
}

/// Joins a ticket attachment prefix and file name into a bucket path.
#[must_use]
pub fn ticket_path(prefix: &str, file_name: &str) -> String {
    format!("{prefix}/{file_name}")
}
