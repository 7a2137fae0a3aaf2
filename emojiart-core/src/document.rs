//! The EmojiArt document: placed emoji plus a background.
//!
//! [`EmojiArtDocument`] is the contract the canvas state writes through.
//! [`EmojiArtModel`] is the in-memory implementation used by hosts and tests.

use std::io::Cursor;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::geometry::truncate;
use crate::{DocPoint, Emoji, EmojiArtError, EmojiArtResult, EmojiId, Offset, Size};

/// The canvas background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Background {
    /// No background image.
    #[default]
    Blank,
    /// A remote image, fetched by the host.
    Url(Url),
    /// An embedded image.
    ImageData(#[serde(with = "base64_bytes")] Vec<u8>),
}

/// State of the background image fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    /// Nothing to fetch.
    #[default]
    Idle,
    /// A remote background is being fetched.
    Fetching,
    /// The background image is available.
    Loaded,
    /// The background could not be fetched or decoded.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Operations the canvas needs from a document.
pub trait EmojiArtDocument {
    /// All placed emoji, in drawing order.
    fn emojis(&self) -> &[Emoji];

    /// Look up a placed emoji.
    fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis().iter().find(|e| e.id == id)
    }

    /// The current background.
    fn background(&self) -> &Background;

    /// Natural size of the decoded background image, if one is available.
    fn background_image_size(&self) -> Option<Size>;

    /// Background fetch status.
    fn fetch_status(&self) -> &FetchStatus;

    /// Place a new emoji and return its identity.
    fn add_emoji(&mut self, text: &str, at: DocPoint, size: i32) -> EmojiId;

    /// Remove a placed emoji.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiArtError::EmojiNotFound`] if the emoji is not in the document.
    fn remove_emoji(&mut self, id: EmojiId) -> EmojiArtResult<Emoji>;

    /// Translate a placed emoji by a document-space offset.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiArtError::EmojiNotFound`] if the emoji is not in the document.
    fn move_emoji(&mut self, id: EmojiId, by: Offset) -> EmojiArtResult<()>;

    /// Multiply a placed emoji's size.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiArtError::EmojiNotFound`] if the emoji is not in the document,
    /// or [`EmojiArtError::InvalidOperation`] for a non-positive or non-finite factor.
    fn scale_emoji(&mut self, id: EmojiId, factor: f64) -> EmojiArtResult<()>;

    /// Replace the background.
    fn set_background(&mut self, background: Background);
}

/// A decoded background image.
#[derive(Debug, Clone, PartialEq)]
struct BackgroundImage {
    bytes: Vec<u8>,
    size: Size,
}

/// In-memory EmojiArt document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmojiArtModel {
    emojis: Vec<Emoji>,
    background: Background,
    #[serde(skip)]
    image: Option<BackgroundImage>,
    #[serde(skip)]
    status: FetchStatus,
}

impl EmojiArtModel {
    /// Create an empty document with a blank background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed emoji.
    #[must_use]
    pub fn emoji_count(&self) -> usize {
        self.emojis.len()
    }

    /// Check if the document has no placed emoji.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Bytes of the decoded background image, if any.
    #[must_use]
    pub fn background_image_bytes(&self) -> Option<&[u8]> {
        self.image.as_ref().map(|image| image.bytes.as_slice())
    }

    /// Complete a remote background fetch started by [`Background::Url`].
    ///
    /// Results for a URL that is no longer the background are dropped.
    pub fn finish_fetch(&mut self, url: &Url, result: Result<Vec<u8>, String>) {
        if self.background != Background::Url(url.clone()) {
            tracing::debug!("Dropping stale fetch result for {url}");
            return;
        }
        match result.and_then(|bytes| decode_image(bytes).map_err(|e| e.to_string())) {
            Ok(image) => {
                tracing::info!(
                    "Background {url} loaded ({}x{})",
                    image.size.width,
                    image.size.height
                );
                self.image = Some(image);
                self.status = FetchStatus::Loaded;
            }
            Err(reason) => {
                tracing::warn!("Background fetch for {url} failed: {reason}");
                self.image = None;
                self.status = FetchStatus::Failed { reason };
            }
        }
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EmojiArtResult<String> {
        serde_json::to_string_pretty(self).map_err(EmojiArtError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// Embedded backgrounds are decoded again; a remote background starts
    /// out [`FetchStatus::Fetching`].
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EmojiArtResult<Self> {
        let mut model: Self = serde_json::from_str(json)?;
        let background = std::mem::take(&mut model.background);
        model.set_background(background);
        Ok(model)
    }

    fn index_of(&self, id: EmojiId) -> EmojiArtResult<usize> {
        self.emojis
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EmojiArtError::EmojiNotFound(id.to_string()))
    }
}

impl EmojiArtDocument for EmojiArtModel {
    fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    fn background(&self) -> &Background {
        &self.background
    }

    fn background_image_size(&self) -> Option<Size> {
        self.image.as_ref().map(|image| image.size)
    }

    fn fetch_status(&self) -> &FetchStatus {
        &self.status
    }

    fn add_emoji(&mut self, text: &str, at: DocPoint, size: i32) -> EmojiId {
        let emoji = Emoji::new(text, at, size.max(1));
        let id = emoji.id;
        self.emojis.push(emoji);
        id
    }

    fn remove_emoji(&mut self, id: EmojiId) -> EmojiArtResult<Emoji> {
        let index = self.index_of(id)?;
        Ok(self.emojis.remove(index))
    }

    fn move_emoji(&mut self, id: EmojiId, by: Offset) -> EmojiArtResult<()> {
        let index = self.index_of(id)?;
        let emoji = &mut self.emojis[index];
        emoji.x = emoji.x.saturating_add(truncate(by.width));
        emoji.y = emoji.y.saturating_add(truncate(by.height));
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn scale_emoji(&mut self, id: EmojiId, factor: f64) -> EmojiArtResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EmojiArtError::InvalidOperation(format!(
                "cannot scale emoji {id} by {factor}"
            )));
        }
        let index = self.index_of(id)?;
        let emoji = &mut self.emojis[index];
        emoji.size = ((f64::from(emoji.size) * factor).round() as i32).max(1);
        Ok(())
    }

    fn set_background(&mut self, background: Background) {
        self.image = None;
        self.status = match &background {
            Background::Blank => FetchStatus::Idle,
            Background::Url(url) => {
                tracing::info!("Fetching background {url}");
                FetchStatus::Fetching
            }
            Background::ImageData(bytes) => match decode_image(bytes.clone()) {
                Ok(image) => {
                    self.image = Some(image);
                    FetchStatus::Loaded
                }
                Err(e) => {
                    tracing::warn!("Embedded background rejected: {e}");
                    FetchStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        };
        self.background = background;
    }
}

/// Read the natural dimensions of an encoded image.
fn decode_image(bytes: Vec<u8>) -> EmojiArtResult<BackgroundImage> {
    let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| EmojiArtError::ImageDecode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| EmojiArtError::ImageDecode(e.to_string()))?;
    Ok(BackgroundImage {
        bytes,
        size: Size::new(f64::from(width), f64::from(height)),
    })
}

pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}
