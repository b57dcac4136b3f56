//! gatewarden - single-tenant Discord command dispatcher
//!
//! Loads command and event handler modules, routes prefix/mention text
//! commands and slash interactions to them by name, evicts every guild
//! except the one configured safe guild, and reports handler failures
//! uniformly.

pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
