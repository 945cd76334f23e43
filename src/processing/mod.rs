//! Resume processing pipeline

pub mod category;
pub mod classifier;
pub mod document;
pub mod entities;
pub mod filter;
pub mod metadata;
pub mod normalizer;
pub mod orchestrator;
pub mod sorter;
