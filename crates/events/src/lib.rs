//! Outbound event delivery for the vehicle registry.
//!
//! - [`VehicleCreated`] -- the `vehicle.created` event envelope.
//! - [`WebhookPublisher`] -- relays envelopes to an external endpoint via
//!   HTTP POST with bounded retry, implementing the core
//!   [`EventPublisher`](fleetreg_core::EventPublisher) contract.

pub mod event;
pub mod webhook;

pub use event::{VehicleCreated, EVENT_VEHICLE_CREATED};
pub use webhook::WebhookPublisher;
