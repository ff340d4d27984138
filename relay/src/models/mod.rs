// relay/src/models/mod.rs

//! Wire shapes produced by the relay.

pub mod relay_envelope;

pub use relay_envelope::RelayEnvelope;
