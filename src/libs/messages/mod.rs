//! Centralized user-facing messages.
//!
//! Every string shown to the user is a [`Message`] variant rendered through
//! its `Display` implementation. The `msg_*` macros in [`macros`] print them
//! to the console, or through `tracing` when debug mode is on.
//!
//! ```rust
//! use canetrack::libs::messages::Message;
//!
//! assert_eq!(Message::HarvestRegistered(3).to_string(), "Harvest #3 registered successfully.");
//! ```

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
