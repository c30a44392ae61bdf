//! Pub/sub message source.

use super::EventSource;
use crate::app::ports::Inbox;
use crate::events::Payload;

/// Yields at most one pending message per poll.  The rest wait in the
/// inbox for later cycles.
pub struct MessageSource<I> {
    name: &'static str,
    inbox: I,
}

impl<I: Inbox> MessageSource<I> {
    pub fn new(name: &'static str, inbox: I) -> Self {
        Self { name, inbox }
    }
}

impl<I: Inbox> EventSource for MessageSource<I> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn poll(&mut self) -> Option<Payload> {
        self.inbox.try_next().map(Payload::Message)
    }
}
