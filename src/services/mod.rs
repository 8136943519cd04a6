pub mod catalog;
pub mod config;
pub mod core;
pub mod http;
pub mod marketplace;
pub mod matcher;
pub mod query;
pub mod resolver;
