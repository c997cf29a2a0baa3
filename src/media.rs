//! Supported media types and file ordering.
//!
//! Camera traps write stills and short clips. Only the extensions listed in
//! [`Extension`] are considered media; everything else found in a deployment
//! folder (logs, thumbnails, sidecars) is ignored by the validation passes.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Broad category of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

/// A recognised media file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Webp,
    Mp4,
    Mpeg,
    Mov,
    Avi,
}

impl Extension {
    /// Every supported extension, images first.
    pub fn all() -> &'static [Extension] {
        &[
            Extension::Png,
            Extension::Jpg,
            Extension::Jpeg,
            Extension::Gif,
            Extension::Webp,
            Extension::Mp4,
            Extension::Mpeg,
            Extension::Mov,
            Extension::Avi,
        ]
    }

    /// The lowercase extension without the leading dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Png => "png",
            Extension::Jpg => "jpg",
            Extension::Jpeg => "jpeg",
            Extension::Gif => "gif",
            Extension::Webp => "webp",
            Extension::Mp4 => "mp4",
            Extension::Mpeg => "mpeg",
            Extension::Mov => "mov",
            Extension::Avi => "avi",
        }
    }

    pub fn kind(self) -> MediaKind {
        match self {
            Extension::Png
            | Extension::Jpg
            | Extension::Jpeg
            | Extension::Gif
            | Extension::Webp => MediaKind::Image,
            Extension::Mp4 | Extension::Mpeg | Extension::Mov | Extension::Avi => MediaKind::Video,
        }
    }

    /// Extension of `path`, if it is a supported media type.
    ///
    /// Matching is case-insensitive, so `IMG_0001.JPG` is a `Jpg`.
    pub fn from_path(path: &Path) -> Option<Extension> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Extension::all()
            .iter()
            .copied()
            .find(|ext| ext.as_str() == normalized)
            .ok_or(Error::UnsupportedExtension {
                extension: s.to_string(),
            })
    }
}

/// MIME type for a media file, guessed from its extension.
///
/// Falls back to `application/octet-stream` when the extension is unknown.
pub fn mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Natural ordering for paths: digit runs compare numerically, so
/// `IMG_2.JPG` comes before `IMG_10.JPG`.
pub fn natural_cmp(a: &Path, b: &Path) -> Ordering {
    let a = a.to_string_lossy();
    let b = b.to_string_lossy();
    natord::compare(&a, &b)
}
