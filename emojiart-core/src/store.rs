//! Observable canvas store.
//!
//! [`CanvasStore`] owns a document and the current [`CanvasState`] snapshot.
//! Hosts dispatch intents into it and subscribe to be handed each new
//! snapshot, instead of reaching into the state themselves.
//!
//! # Example
//!
//! ```
//! use emojiart_core::{CanvasState, CanvasStore, EmojiArtModel, Intent, Offset, TouchTarget};
//!
//! let mut store = CanvasStore::new(EmojiArtModel::new(), CanvasState::default());
//! store.subscribe(|state| println!("zoom is now {}", state.effective_zoom()));
//!
//! store.dispatch(&Intent::DragEnded {
//!     target: TouchTarget::Canvas,
//!     translation: Offset::new(10.0, 0.0),
//! });
//! ```

use std::fmt;

use crate::{CanvasState, EmojiArtDocument, Frame, Intent, Outcome};

/// Callback invoked with every new snapshot.
pub type Subscriber = Box<dyn FnMut(&CanvasState)>;

/// Handle returned by [`CanvasStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-threaded store pairing a document with its canvas state.
pub struct CanvasStore<D> {
    document: D,
    state: CanvasState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<D: EmojiArtDocument> CanvasStore<D> {
    /// Create a store around an existing document.
    #[must_use]
    pub fn new(document: D, state: CanvasState) -> Self {
        Self {
            document,
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Apply an intent.
    ///
    /// Subscribers are notified with the new snapshot whenever the intent is
    /// handled, including intents that only changed the document.
    pub fn dispatch(&mut self, intent: &Intent) -> Outcome {
        let (next, outcome) = self.state.apply(intent, &mut self.document);
        self.state = next;
        if outcome.is_handled() {
            for (_, subscriber) in &mut self.subscribers {
                subscriber(&self.state);
            }
        }
        outcome
    }

    /// Register a callback for new snapshots.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&CanvasState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, for collaborator callbacks such as
    /// completing a background fetch.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Describe how to draw the current snapshot.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.state.frame(&self.document)
    }

    /// Take the document back out of the store.
    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }
}

impl<D: fmt::Debug> fmt::Debug for CanvasStore<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasStore")
            .field("document", &self.document)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
