//! Drop payload resolution.
//!
//! A drag source usually offers several representations of the same
//! content. Kinds are tried in a fixed order across every offered payload:
//! URLs first, then image data, then text. The first kind that yields an
//! action wins and the rest are ignored.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::emoji::first_emoji;
use crate::Background;

/// Query parameter carrying the real image location in image-search links.
const EMBEDDED_IMAGE_PARAM: &str = "imgurl";

/// One representation of dropped content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DropPayload {
    /// A URL, as text.
    Url(String),
    /// Encoded image bytes.
    Image(#[serde(with = "crate::document::base64_bytes")] Vec<u8>),
    /// Plain text.
    Text(String),
}

/// What a resolved drop does to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Replace the background.
    SetBackground(Background),
    /// Place a new emoji at the drop location.
    AddEmoji {
        /// The emoji glyph.
        text: String,
    },
}

/// Pick the action for a set of dropped payloads.
///
/// Returns `None` when no payload is usable.
#[must_use]
pub fn resolve(payloads: &[DropPayload]) -> Option<DropAction> {
    let url = payloads.iter().find_map(|payload| match payload {
        DropPayload::Url(text) => Url::parse(text.trim()).ok(),
        _ => None,
    });
    if let Some(url) = url {
        return Some(DropAction::SetBackground(Background::Url(image_url(url))));
    }

    let image = payloads.iter().find_map(|payload| match payload {
        DropPayload::Image(bytes) if image::guess_format(bytes).is_ok() => Some(bytes),
        _ => None,
    });
    if let Some(bytes) = image {
        return Some(DropAction::SetBackground(Background::ImageData(
            bytes.clone(),
        )));
    }

    payloads.iter().find_map(|payload| match payload {
        DropPayload::Text(text) => Some(first_emoji(text).map(|glyph| DropAction::AddEmoji {
            text: glyph.to_string(),
        })),
        _ => None,
    })?
}

/// The image a URL points at.
///
/// Image-search result links wrap the real image location in an `imgurl`
/// query parameter; that location is returned when it is a valid URL.
#[must_use]
pub fn image_url(url: Url) -> Url {
    let embedded = url
        .query_pairs()
        .find(|(key, _)| key == EMBEDDED_IMAGE_PARAM)
        .and_then(|(_, value)| Url::parse(&value).ok());
    embedded.unwrap_or(url)
}
