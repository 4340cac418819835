//! Networking: transport seam, REST client, and auth wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the request pipeline every call goes through, `transport`
//! abstracts the HTTP stack, and `types` holds the `/api/auth/*` schema.

pub mod api;
#[cfg(feature = "native")]
pub mod reqwest_transport;
pub mod transport;
pub mod types;
