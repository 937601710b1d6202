//! Feature modules.
//!
//! - Focus: Pomodoro sessions and the countdown engine
//! - Notify: desktop notifications at phase boundaries

pub mod focus;
pub mod notify;
