//! Intents: the discrete inputs the canvas state reduces.
//!
//! Hosts translate platform gesture callbacks into intents. A drag or
//! magnification is a series of `*Changed` intents closed by one `*Ended`
//! intent; a gesture the platform abandons is closed by
//! [`Intent::GestureCancelled`] instead, which commits nothing.

use serde::{Deserialize, Serialize};

use crate::{DropPayload, EmojiId, Offset, Point, Size};

/// What a touch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchTarget {
    /// The canvas background.
    Canvas,
    /// A placed emoji.
    Emoji(EmojiId),
}

/// All inputs the canvas state can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// The canvas was laid out at a new size.
    ResizeViewport {
        /// New viewport size.
        size: Size,
    },

    /// A completed tap.
    Tap {
        /// What was tapped.
        target: TouchTarget,
        /// Number of taps in the sequence.
        count: u8,
    },

    /// A drag is in progress.
    DragChanged {
        /// Where the drag started.
        target: TouchTarget,
        /// Translation since the drag started, in screen points.
        translation: Offset,
    },

    /// A drag finished.
    DragEnded {
        /// Where the drag started.
        target: TouchTarget,
        /// Final translation, in screen points.
        translation: Offset,
    },

    /// A pinch is in progress.
    MagnifyChanged {
        /// Magnification since the pinch started (1.0 = no change).
        scale: f64,
    },

    /// A pinch finished.
    MagnifyEnded {
        /// Final magnification.
        scale: f64,
    },

    /// The platform abandoned every active gesture.
    GestureCancelled,

    /// Remove every selected emoji from the document.
    DeleteSelection,

    /// Fit the background image into the viewport.
    ZoomToFit,

    /// Content was dropped onto the canvas.
    Drop {
        /// Every representation offered by the drag source.
        payloads: Vec<DropPayload>,
        /// Drop location in screen points.
        location: Point,
    },
}

/// Whether an intent had any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The intent changed the state or the document.
    Handled,
    /// The intent did not apply and was dropped.
    Ignored,
}

impl Outcome {
    /// Check if the intent was handled.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
