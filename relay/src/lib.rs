// relay/src/lib.rs

//! Order relay: forwards order payloads from the ordering form to an
//! automation webhook and reports the webhook's answer back.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
