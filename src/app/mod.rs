//! Application core — station logic, zero direct I/O.
//!
//! The [`service::Station`] aggregate owns the alert FSM and the shared
//! station state; [`handlers`] binds it to the dispatcher.  All contact
//! with hardware and brokers goes through the **port traits** in
//! [`ports`], so this layer is fully testable without real peripherals.

pub mod events;
pub mod handlers;
pub mod ports;
pub mod service;
