#![forbid(unsafe_code)]

pub mod catalog;
pub mod category;
pub mod cli;
pub mod config;
pub mod country;
pub mod csv_store;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod tables;
