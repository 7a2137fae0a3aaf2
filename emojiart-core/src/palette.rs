//! Emoji palettes: the sources emoji are dragged from.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::emoji::is_emoji;
use crate::{DropPayload, EmojiArtError};

/// Name of the store a host opens by default.
pub const DEFAULT_STORE_NAME: &str = "Default";

/// Built-in palettes, in display order.
const BUILTIN_PALETTES: &[(&str, &str)] = &[
    (
        "Sampler",
        "😀😷🦠💉👻👀🐶🌲🌎🌞🔥🍎⚽️🚗🚓🚲🛩🚁🚀🛸🏠⌚️🎁🗝🔐❤️⛔️❌❓✅⚠️🎶➕➖🏳️",
    ),
    (
        "Vehicles",
        "🚗🚕🚙🚌🚎🏎🚓🚑🚒🚐🛻🚚🚛🚜🛴🚲🛵🏍🛺🚔🚍🚘🚖🛩🚁🛸🚀✈️🛫🛬⛵️🚤🛥🛳⛴🚢",
    ),
    (
        "Sports",
        "🏈⚾️🏀⚽️🎾🏐🥏🏓⛳️🥅🥌🏂⛷🎳",
    ),
    (
        "Music",
        "🎼🎤🎹🪘🥁🎺🪗🪕🎻",
    ),
    (
        "Animals",
        "🐥🐣🐂🐄🐎🐖🐏🐑🦙🐐🐓🐁🐀🐒🦆🦅🦉🦇🐢🐍🦎🦖🦕🐅🐆🦓🦍🦧🦣🐘🦛🦏🐪🐫🦒🦘🦬🐃🦙🐐🦌🐕🐩🦮🐈🦤🦢🦩🕊🦝🦨🦡🦫🦦🦥🐿🦔",
    ),
    (
        "Faces",
        "😀😃😄😁😆😅😂🤣🥲☺️😊😇🙂🙃😉😌🥰😘😗😙😚😋😛😝😜🤪🤨🧐🤓😎🥸🤩🥳😏😞😔😟😕🙁☹️😣😖😫😩🥺😢😭😤😠😡🤯😳🥶😥😓🤗🤔🤭🤫🤥😬🙄😯😧🥱😴🤮😷🤧🤒🤠",
    ),
    (
        "Weather",
        "☀️🌤⛅️🌥☁️🌦🌧⛈🌩🌨❄️💨☔️💧💦🌊☂️🌫🌪",
    ),
    (
        "Covid",
        "💉🦠😷🤧🤒",
    ),
];

/// A named row of emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Display name.
    pub name: String,
    /// The emoji, concatenated.
    pub emojis: String,
}

impl Palette {
    /// Create a palette, keeping only the emoji glyphs of `emojis` and
    /// dropping repeats.
    #[must_use]
    pub fn new(name: impl Into<String>, emojis: &str) -> Self {
        let mut kept: Vec<&str> = Vec::new();
        for glyph in emojis.graphemes(true).filter(|g| is_emoji(g)) {
            if !kept.contains(&glyph) {
                kept.push(glyph);
            }
        }
        Self {
            name: name.into(),
            emojis: kept.concat(),
        }
    }

    /// The emoji of this palette, one grapheme each.
    #[must_use]
    pub fn glyphs(&self) -> impl Iterator<Item = &str> + '_ {
        self.emojis.graphemes(true)
    }

    /// Payload offered when a glyph is dragged out of the palette.
    #[must_use]
    pub fn drag_payload(glyph: &str) -> DropPayload {
        DropPayload::Text(glyph.to_string())
    }
}

/// A named, ordered collection of palettes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPalettes")]
pub struct PaletteStore {
    /// Store name.
    pub name: String,
    palettes: Vec<Palette>,
}

/// Unchecked serialized form of a [`PaletteStore`].
#[derive(Deserialize)]
struct StoredPalettes {
    name: String,
    palettes: Vec<Palette>,
}

impl TryFrom<StoredPalettes> for PaletteStore {
    type Error = EmojiArtError;

    fn try_from(stored: StoredPalettes) -> Result<Self, Self::Error> {
        if stored.palettes.is_empty() {
            return Err(EmojiArtError::InvalidOperation(format!(
                "palette store {} has no palettes",
                stored.name
            )));
        }
        Ok(Self {
            name: stored.name,
            palettes: stored.palettes,
        })
    }
}

impl PaletteStore {
    /// Create a store seeded with the built-in palettes.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!("Opening palette store {name}");
        Self {
            name,
            palettes: BUILTIN_PALETTES
                .iter()
                .map(|(name, emojis)| Palette::new(*name, emojis))
                .collect(),
        }
    }

    /// All palettes, in order.
    #[must_use]
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false: a store keeps at least one palette.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// The palette at `index`, wrapping around the end of the store.
    #[must_use]
    pub fn palette(&self, index: usize) -> &Palette {
        &self.palettes[index % self.palettes.len()]
    }

    /// Insert a new palette at `index` (clamped to the end) and return
    /// where it landed.
    pub fn insert_palette(&mut self, name: impl Into<String>, emojis: &str, index: usize) -> usize {
        let index = index.min(self.palettes.len());
        self.palettes.insert(index, Palette::new(name, emojis));
        index
    }

    /// Remove the palette at `index` and return the index of the palette
    /// now in its place. The last remaining palette is never removed.
    pub fn remove_palette(&mut self, index: usize) -> usize {
        if self.palettes.len() > 1 && index < self.palettes.len() {
            let removed = self.palettes.remove(index);
            tracing::debug!("Removed palette {}", removed.name);
        }
        index.min(self.palettes.len() - 1)
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::named(DEFAULT_STORE_NAME)
    }
}
