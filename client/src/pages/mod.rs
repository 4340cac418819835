//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `pin_login` is the only public page. Every other route renders
//! `section` behind the route gate.

pub mod pin_login;
pub mod section;
