//! Pub/sub event sink adapter.
//!
//! Serializes each [`AppEvent`] to JSON and publishes it on the station's
//! event topic.  Publish failures are the broker's problem: they are
//! logged at debug level and the station carries on.

use heapless::String;
use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, PubSub};
use crate::events::TOPIC_CAP;

pub struct PubSubEventSink<P> {
    broker: P,
    topic: String<TOPIC_CAP>,
}

impl<P: PubSub> PubSubEventSink<P> {
    pub fn new(broker: P, topic: String<TOPIC_CAP>) -> Self {
        Self { broker, topic }
    }
}

impl<P: PubSub> EventSink for PubSubEventSink<P> {
    fn emit(&mut self, event: &AppEvent) {
        let payload = match serde_json::to_vec(event) {
            Ok(p) => p,
            Err(e) => {
                debug!("Event sink: serialize failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.broker.publish(&self.topic, &payload) {
            debug!("Event sink: publish on '{}' failed: {}", self.topic, e);
        }
    }
}
