//! Skill handlers module
//!
//! This module contains the intent classifier, the dispatcher and the route
//! handlers, organized by flow:
//! - Common handlers for launch, help, goodbye and fallback
//! - Shopping handlers for offers, answers and connection results

pub mod classifier;
pub mod common;
pub mod context;
pub mod dispatcher;
pub mod shopping;

pub use classifier::parse_intent;
pub use context::TurnContext;
pub use dispatcher::{Dispatcher, Route};
pub use shopping::ConnectionOutcome;
