//! Resume categorizer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;
pub mod server;

pub use config::Config;
pub use error::{CategorizerError, Result};
