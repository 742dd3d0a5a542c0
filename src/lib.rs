//! # canetrack
//!
//! Sugarcane harvest loss tracking: a metrics engine that turns harvest
//! figures into tonnes lost, financial loss, efficiency and a loss tier, and
//! an in-memory registry that stores, filters and summarizes harvests.
//!
//! Around that core sit the console surfaces: an interactive menu, file
//! exports, a SQLite mirror and what-if simulations.
//!
//! ## Modules
//!
//! - [`libs`]: metrics, registry, domain types, configuration, exports
//! - [`db`]: SQLite storage of harvest records
//! - [`commands`]: command-line entry points
//!
//! ```rust
//! use canetrack::libs::metrics::{self, LossTier};
//!
//! assert_eq!(metrics::loss_tonnage(50.0, 95.0, 4.5), 213.75);
//! assert_eq!(metrics::classify(4.5), LossTier::Optimal);
//! ```

pub mod commands;
pub mod db;
pub mod libs;
