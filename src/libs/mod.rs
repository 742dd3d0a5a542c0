pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod harvest;
pub mod messages;
pub mod metrics;
pub mod registry;
pub mod report;
pub mod validation;
pub mod view;
