//! Siren REST client.
//!
//! [`SirenApi`] is the production [`RemoteClient`](crate::client::RemoteClient):
//! it maps each tool method to a REST route ([`routes`]) with a typed body
//! ([`payloads`]) and returns the unwrapped `data` payload.

mod api;
pub mod payloads;
pub mod routes;

pub use api::{SirenApi, USER_AGENT};
