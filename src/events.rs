//! Typed event payloads and the dispatcher's queue entry.
//!
//! Events are produced by:
//! - Digital sources (button / touch edges)
//! - Analog sources (one sample per poll, change or not)
//! - Message sources (pub/sub mailboxes)
//! - The periodic scheduler (ticks)
//!
//! Events are consumed by the [`Dispatcher`](crate::dispatcher::Dispatcher),
//! which delivers them one at a time in arrival order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Digital     │────▶│              │     │              │
//! │ Analog      │────▶│  FIFO queue  │────▶│  Handlers    │
//! │ Message     │────▶│  (heapless)  │     │  (one at a   │
//! │ Scheduler   │────▶│              │     │   time)      │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::{String, Vec};
use serde::Serialize;

/// Maximum topic length carried in a [`Message`].
pub const TOPIC_CAP: usize = 64;
/// Maximum body length carried in a [`Message`]; a full status report fits.
pub const BODY_CAP: usize = 2048;

/// Identity of a registered event source (slot in the dispatcher table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceId(pub(crate) u8);

impl SourceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a registered periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskId(pub(crate) u8);

impl TaskId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Transition of a binary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Pushed,
    Released,
}

/// A pub/sub message as delivered to the station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub topic: String<TOPIC_CAP>,
    pub body: Vec<u8, BODY_CAP>,
}

impl Message {
    /// Build a message, or `None` if the topic or body exceed capacity.
    pub fn new(topic: &str, body: &[u8]) -> Option<Self> {
        Some(Self {
            topic: String::try_from(topic).ok()?,
            body: Vec::from_slice(body).ok()?,
        })
    }
}

/// What a source emits.  One variant per kind of source, so a handler
/// matches on the shape it expects instead of casting.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Digital source changed level.
    Edge(Edge),
    /// Analog source produced a raw sample (0 – 4095).
    Sample(u16),
    /// Message source received a pub/sub message.
    Message(Message),
}

/// One entry in the dispatcher's FIFO.
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    /// A source emitted a payload.
    Source { id: SourceId, payload: Payload },
    /// A periodic task came due.
    Tick(TaskId),
}
