//! # EmojiArt Core
//!
//! Canvas logic for an emoji-art editor: emoji and a background image placed
//! on a canvas that can be panned, zoomed and edited with gestures.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                emojiart-core                │
//! ├─────────────────────────────────────────────┤
//! │  Canvas State      │  Gesture Routing       │
//! │  - Transform       │  - Tap priority table  │
//! │  - Selection       │  - Canvas / selection  │
//! │  - In-flight delta │    interaction modes   │
//! ├─────────────────────────────────────────────┤
//! │  Document          │  Output                │
//! │  - Placed emoji    │  - Render frames       │
//! │  - Background      │  - Store subscriptions │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Hosts feed [`Intent`]s to a [`CanvasStore`] (or reduce [`CanvasState`]
//! snapshots directly) and draw the resulting [`Frame`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod drop;
pub mod emoji;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod intent;
pub mod palette;
pub mod selection;
pub mod state;
pub mod store;

pub use config::CanvasConfig;
pub use document::{Background, EmojiArtDocument, EmojiArtModel, FetchStatus};
pub use drop::{DropAction, DropPayload};
pub use emoji::{Emoji, EmojiId};
pub use error::{EmojiArtError, EmojiArtResult};
pub use frame::{BackgroundPlacement, Frame, RenderedEmoji};
pub use geometry::{to_document, to_screen, DocPoint, Offset, Point, Size};
pub use gesture::{GestureTable, InteractionMode, Recognizer, TapCount, TapRule, TargetKind};
pub use intent::{Intent, Outcome, TouchTarget};
pub use palette::{Palette, PaletteStore};
pub use selection::Selection;
pub use state::{CanvasState, GestureState, Transform};
pub use store::{CanvasStore, SubscriptionId};

/// EmojiArt core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
