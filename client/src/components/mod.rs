//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session and toast handles from Leptos context. The
//! gate wraps every non-public route view; the nav bar and toast host are
//! mounted once by the app shell.

pub mod nav_bar;
pub mod route_gate;
pub mod toasts;
