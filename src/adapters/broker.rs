//! In-process loopback broker.
//!
//! Every subscription gets its own `embassy-sync` bounded channel, so a
//! publisher on any thread can hand messages to the dispatcher's context
//! without touching station state.
//!
//! ```text
//! ┌──────────────┐ publish ┌──────────────┐ try_next ┌──────────────┐
//! │  Publisher   │───────▶ │  Mailbox (8) │ ───────▶ │ MessageSource│
//! │  (any thread)│         │  per topic   │          │ (dispatcher) │
//! └──────────────┘         └──────────────┘          └──────────────┘
//! ```
//!
//! Topics match exactly.  A full mailbox drops the new message with a
//! warning; the publisher is never blocked.

use std::sync::{Arc, Mutex};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;
use log::{debug, warn};

use crate::app::ports::{Inbox, PubSub};
use crate::error::PortError;
use crate::events::{Message, TOPIC_CAP};

/// Messages buffered per subscription.
pub const MAILBOX_DEPTH: usize = 8;

type Mailbox = Channel<CriticalSectionRawMutex, Message, MAILBOX_DEPTH>;

struct Route {
    topic: String<TOPIC_CAP>,
    mailbox: Arc<Mailbox>,
}

#[derive(Default)]
pub struct LoopbackBroker {
    routes: Mutex<Vec<Route>>,
}

impl LoopbackBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.routes
            .lock()
            .map(|routes| routes.iter().filter(|r| r.topic == topic).count())
            .unwrap_or(0)
    }
}

impl PubSub for LoopbackBroker {
    type Subscription = Subscription;

    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PortError> {
        let message = Message::new(topic, payload).ok_or(PortError::Rejected)?;
        let routes = self.routes.lock().map_err(|_| PortError::Disconnected)?;
        let mut delivered = 0;
        for route in routes.iter().filter(|r| r.topic == topic) {
            match route.mailbox.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => warn!("Broker: mailbox for '{}' full, message dropped", topic),
            }
        }
        debug!("Broker: '{}' -> {} subscriber(s)", topic, delivered);
        Ok(())
    }

    fn subscribe(&self, topic: &str) -> Result<Subscription, PortError> {
        let topic: String<TOPIC_CAP> = String::try_from(topic).map_err(|_| PortError::Rejected)?;
        let mailbox = Arc::new(Mailbox::new());
        self.routes
            .lock()
            .map_err(|_| PortError::Disconnected)?
            .push(Route {
                topic,
                mailbox: Arc::clone(&mailbox),
            });
        Ok(Subscription { mailbox })
    }
}

/// Receiving end of one loopback subscription.
pub struct Subscription {
    mailbox: Arc<Mailbox>,
}

impl Inbox for Subscription {
    fn try_next(&mut self) -> Option<Message> {
        self.mailbox.try_receive().ok()
    }
}
