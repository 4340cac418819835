//! # zettelwirtschaft
//!
//! Session gate for the Zettelwirtschaft document manager's web client.
//!
//! The gate decides, per route transition, whether the user may proceed or
//! must enter the PIN first, and reacts to server-side session rejection
//! (HTTP 401) from any request. It is runtime-agnostic: the browser shell
//! (`client`) and the command-line driver (`cli`) plug in their own
//! [`Transport`](net::transport::Transport) and
//! [`Navigator`](router::navigator::Navigator).
//!
//! Start with [`SessionContext::new`].

pub mod config;
pub mod context;
pub mod net;
pub mod router;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{GateConfig, ProbeFailurePolicy};
pub use context::SessionContext;
pub use router::gate::{GateDecision, GatePhase};
pub use session::LoginResult;
