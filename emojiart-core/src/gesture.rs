//! Gesture recognition and routing.
//!
//! Taps go through an ordered [`GestureTable`]: the first rule whose target
//! kind and tap count match wins, so listing the double tap before the single
//! taps lets it pre-empt them.
//!
//! Drags and pinches are routed by [`InteractionMode`], chosen once when the
//! gesture starts and kept until it ends.

use serde::{Deserialize, Serialize};

use crate::{Selection, TouchTarget};

/// Number of taps in a tap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapCount {
    /// One tap.
    Single,
    /// Two or more taps.
    Double,
}

impl TapCount {
    /// Classify a raw tap count. Zero taps is not a tap.
    #[must_use]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::Single),
            _ => Some(Self::Double),
        }
    }
}

/// The kind of thing a tap rule listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// The canvas background.
    Canvas,
    /// Any placed emoji.
    Emoji,
}

impl From<TouchTarget> for TargetKind {
    fn from(target: TouchTarget) -> Self {
        match target {
            TouchTarget::Canvas => Self::Canvas,
            TouchTarget::Emoji(_) => Self::Emoji,
        }
    }
}

/// What a recognized tap does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recognizer {
    /// Fit the background image into the viewport.
    DoubleTapToZoom,
    /// Toggle the tapped emoji's selection.
    ToggleSelection,
    /// Clear the selection.
    DeselectAll,
}

/// One row of the tap priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapRule {
    /// Recognizer fired when the rule matches.
    pub recognizer: Recognizer,
    /// Target kind the rule listens on.
    pub target: TargetKind,
    /// Tap count the rule requires.
    pub count: TapCount,
}

impl TapRule {
    /// Create a new rule.
    #[must_use]
    pub const fn new(recognizer: Recognizer, target: TargetKind, count: TapCount) -> Self {
        Self {
            recognizer,
            target,
            count,
        }
    }

    fn matches(&self, target: TargetKind, count: TapCount) -> bool {
        self.target == target && self.count == count
    }
}

/// Ordered, first-match-wins tap recognizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTable {
    rules: Vec<TapRule>,
}

impl Default for GestureTable {
    fn default() -> Self {
        Self::new(vec![
            TapRule::new(
                Recognizer::DoubleTapToZoom,
                TargetKind::Canvas,
                TapCount::Double,
            ),
            TapRule::new(
                Recognizer::ToggleSelection,
                TargetKind::Emoji,
                TapCount::Single,
            ),
            TapRule::new(Recognizer::DeselectAll, TargetKind::Canvas, TapCount::Single),
        ])
    }
}

impl GestureTable {
    /// Create a table from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<TapRule>) -> Self {
        Self { rules }
    }

    /// Find the recognizer for a tap, if any rule claims it.
    #[must_use]
    pub fn resolve_tap(&self, target: TouchTarget, count: u8) -> Option<Recognizer> {
        let count = TapCount::from_count(count)?;
        let kind = TargetKind::from(target);
        self.rules
            .iter()
            .find(|rule| rule.matches(kind, count))
            .map(|rule| rule.recognizer)
    }
}

/// Whether a drag or pinch acts on the whole canvas or on the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Pan or zoom the whole canvas.
    Canvas,
    /// Move or resize the selected emoji.
    Selection,
}

impl InteractionMode {
    /// Mode for a drag starting on `target`.
    ///
    /// Only a drag that starts on an already-selected emoji moves the
    /// selection; anything else pans the canvas.
    #[must_use]
    pub fn for_drag(target: TouchTarget, selection: &Selection) -> Self {
        match target {
            TouchTarget::Emoji(id) if selection.contains(id) => Self::Selection,
            _ => Self::Canvas,
        }
    }

    /// Mode for a pinch: the selection if there is one, otherwise the canvas.
    #[must_use]
    pub fn for_magnify(selection: &Selection) -> Self {
        if selection.is_empty() {
            Self::Canvas
        } else {
            Self::Selection
        }
    }
}
