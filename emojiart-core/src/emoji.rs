//! Placed emoji - the items of an EmojiArt document.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::DocPoint;

/// Unique identifier for a placed emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmojiId(Uuid);

impl EmojiId {
    /// Create a new unique emoji ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EmojiId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An emoji placed on the canvas.
///
/// Two emoji are equal when they share an identity, whatever their
/// current position or size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emoji {
    /// Unique identifier.
    pub id: EmojiId,
    /// The glyph, a single grapheme.
    pub text: String,
    /// X position in document space.
    pub x: i32,
    /// Y position in document space.
    pub y: i32,
    /// Font size in points.
    pub size: i32,
}

impl Emoji {
    /// Create a new emoji with a fresh identity.
    #[must_use]
    pub fn new(text: impl Into<String>, at: DocPoint, size: i32) -> Self {
        Self {
            id: EmojiId::new(),
            text: text.into(),
            x: at.x,
            y: at.y,
            size,
        }
    }

    /// Position in document space.
    #[must_use]
    pub const fn position(&self) -> DocPoint {
        DocPoint {
            x: self.x,
            y: self.y,
        }
    }
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emoji {}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Ranges of code points carrying the Unicode `Emoji` property.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x0023, 0x0023),
    (0x002A, 0x002A),
    (0x0030, 0x0039),
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x231A, 0x231B),
    (0x2328, 0x2328),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x2605),
    (0x2607, 0x2612),
    (0x2614, 0x2685),
    (0x2690, 0x2705),
    (0x2708, 0x2712),
    (0x2714, 0x2714),
    (0x2716, 0x2716),
    (0x271D, 0x271D),
    (0x2721, 0x2721),
    (0x2728, 0x2728),
    (0x2733, 0x2734),
    (0x2744, 0x2744),
    (0x2747, 0x2747),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2763, 0x2767),
    (0x2795, 0x2797),
    (0x27A1, 0x27A1),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F000, 0x1F0FF),
    (0x1F10D, 0x1F10F),
    (0x1F12F, 0x1F12F),
    (0x1F16C, 0x1F171),
    (0x1F17E, 0x1F17F),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F1E6, 0x1F1FF),
    (0x1F201, 0x1F202),
    (0x1F21A, 0x1F21A),
    (0x1F22F, 0x1F22F),
    (0x1F232, 0x1F23A),
    (0x1F250, 0x1F251),
    (0x1F300, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F774, 0x1F77F),
    (0x1F7D5, 0x1F7FF),
    (0x1F80C, 0x1F80F),
    (0x1F848, 0x1F84F),
    (0x1F85A, 0x1F85F),
    (0x1F888, 0x1F88F),
    (0x1F8AE, 0x1F8FF),
    (0x1F90C, 0x1F9FF),
    (0x1FA00, 0x1FAFF),
    (0x1FC00, 0x1FFFD),
];

/// Whether a code point carries the Unicode `Emoji` property.
fn has_emoji_property(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Whether a grapheme renders as an emoji glyph.
///
/// Digits, `#` and `*` carry the emoji property but only count when they
/// are followed by further scalars (a keycap sequence).
#[must_use]
pub fn is_emoji(grapheme: &str) -> bool {
    let mut scalars = grapheme.chars();
    let Some(first) = scalars.next() else {
        return false;
    };
    has_emoji_property(first) && (u32::from(first) >= 0x238D || scalars.next().is_some())
}

/// The first grapheme of `text`, if it is an emoji glyph.
#[must_use]
pub fn first_emoji(text: &str) -> Option<&str> {
    text.graphemes(true).next().filter(|g| is_emoji(g))
}
