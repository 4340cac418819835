//! Browser-side implementations of the core crate's I/O seams.
//!
//! `transport` speaks HTTP through `gloo-net` (or refuses, off the browser);
//! `navigator` drives `leptos_router` for redirects issued outside a view.

pub mod navigator;
pub mod transport;
