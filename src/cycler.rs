//! Round-robin message display with a two-phase fade.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{CardError, Result};
use crate::schedule::Scheduler;
use crate::surface::MessageRegion;

/// Ordered, non-empty, immutable list of messages.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageList(Vec<String>);

impl MessageList {
    pub fn new<I, T>(messages: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return Err(CardError::EmptyMessages);
        }
        Ok(Self(messages))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    /// Index following `index`, wrapping at the end of the list.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.0.len()
    }
}

/// Fades the region out, then after `fade_ms` swaps in the next message and
/// fades it back in.
///
/// Activations are not serialized. Each one schedules its own reveal and the
/// reveal reads the index when it fires, so clicks closer together than
/// `fade_ms` skip straight through messages.
pub struct MessageCycler<R: MessageRegion, S: Scheduler> {
    messages: MessageList,
    index: Cell<usize>,
    region: R,
    scheduler: S,
    fade_ms: u32,
}

impl<R, S> MessageCycler<R, S>
where
    R: MessageRegion + 'static,
    S: Scheduler + 'static,
{
    pub fn new(messages: MessageList, region: R, scheduler: S, fade_ms: u32) -> Self {
        Self {
            messages,
            index: Cell::new(0),
            region,
            scheduler,
            fade_ms,
        }
    }

    /// Index of the message the next reveal will show.
    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn messages(&self) -> &MessageList {
        &self.messages
    }

    /// Handle one click on the activation control.
    pub fn activate(self: &Rc<Self>) -> Result<()> {
        self.region.set_opacity(0.0);
        let this = Rc::clone(self);
        self.scheduler
            .after(self.fade_ms, Box::new(move || this.reveal_next()))
    }

    fn reveal_next(&self) {
        let idx = self.index.get();
        let text = self.messages.get(idx);
        self.region.set_text(text);
        self.region.set_opacity(1.0);
        self.index.set(self.messages.next_index(idx));
        tracing::debug!(index = idx, "message revealed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_list_rejects_empty() {
        assert_eq!(
            MessageList::new(Vec::<String>::new()),
            Err(CardError::EmptyMessages)
        );
    }

    #[test]
    fn next_index_wraps() {
        let list = MessageList::new(["a", "b", "c"]).unwrap();
        assert_eq!(list.next_index(0), 1);
        assert_eq!(list.next_index(2), 0);
        let single = MessageList::new(["only"]).unwrap();
        assert_eq!(single.next_index(0), 0);
    }
}
