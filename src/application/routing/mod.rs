//! Routing - message and interaction dispatch under the error boundary

pub mod boundary;
pub mod interaction;
pub mod message;

pub use boundary::{ErrorBoundary, FailureStyle};
pub use interaction::InteractionRouter;
pub use message::{MessageRouter, RouteOutcome};
