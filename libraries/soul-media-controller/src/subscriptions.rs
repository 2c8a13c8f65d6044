//! Event subscriptions on the bound media element
//!
//! Listeners never call back into the controller. They push the event kind
//! into a shared inbox, tagged with the binding generation, and the
//! controller drains it. Events left over from a previous binding are
//! dropped on drain.

use crate::element::{ListenerId, MediaElement};
use crate::events::MediaEventKind;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
struct QueuedEvent {
    generation: u64,
    kind: MediaEventKind,
}

/// The `(event, listener)` pairs installed on the current element
#[derive(Debug, Default)]
pub(crate) struct Subscriptions {
    inbox: Rc<RefCell<VecDeque<QueuedEvent>>>,
    generation: u64,
    installed: Vec<(MediaEventKind, ListenerId)>,
}

impl Subscriptions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Install one listener per [`MediaEventKind`] on `media`
    ///
    /// Starts a new generation. Anything still queued is discarded, and
    /// events fired later by listeners of an earlier binding are dropped.
    pub(crate) fn install(&mut self, media: &mut dyn MediaElement) {
        self.generation += 1;
        self.inbox.borrow_mut().clear();
        let generation = self.generation;

        for kind in MediaEventKind::ALL {
            let inbox = Rc::downgrade(&self.inbox);
            let id = media.add_event_listener(
                kind,
                Box::new(move |fired: MediaEventKind| {
                    if let Some(inbox) = inbox.upgrade() {
                        inbox.borrow_mut().push_back(QueuedEvent {
                            generation,
                            kind: fired,
                        });
                    }
                }),
            );
            self.installed.push((kind, id));
        }
    }

    /// Remove every listener installed by [`install`](Self::install)
    pub(crate) fn remove(&mut self, media: &mut dyn MediaElement) {
        for (kind, id) in self.installed.drain(..) {
            media.remove_event_listener(kind, id);
        }
    }

    /// Number of installed listeners
    pub(crate) fn len(&self) -> usize {
        self.installed.len()
    }

    /// Pop the next event fired by the current binding
    pub(crate) fn next_event(&self) -> Option<MediaEventKind> {
        loop {
            let queued = self.inbox.borrow_mut().pop_front()?;
            if queued.generation == self.generation {
                return Some(queued.kind);
            }
        }
    }

    /// Number of queued events fired by the current binding
    pub(crate) fn queued(&self) -> usize {
        self.inbox
            .borrow()
            .iter()
            .filter(|queued| queued.generation == self.generation)
            .count()
    }
}
