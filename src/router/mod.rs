//! Routing side of the session gate.
//!
//! DESIGN
//! ======
//! `route` declares the tagged route table, `gate` decides admission per
//! transition, `intent` builds PIN-entry redirects, and `navigator` is the
//! seam to whichever router actually moves the user.

pub mod gate;
pub mod intent;
pub mod navigator;
pub mod route;
