//! Data models module
//!
//! Wire envelopes exchanged with the voice platform and the static
//! product catalog.

pub mod catalog;
pub mod request;
pub mod response;

pub use catalog::OfferedItem;
pub use request::{ConnectionCause, RequestEnvelope};
pub use response::{
    Directive, ResponseBuilder, ResponseEnvelope, SessionContinuation, ShoppingAction,
};
