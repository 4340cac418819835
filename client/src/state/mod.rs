//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` exposes the gate's session context plus a reactive snapshot of
//! it; `notifications` is the toast store. Both are `Copy` handles so views
//! can capture them in event handlers freely.

pub mod notifications;
pub mod session;
