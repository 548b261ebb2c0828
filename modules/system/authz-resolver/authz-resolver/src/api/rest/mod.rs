//! REST integration: request scoping middleware and extractor.

pub mod middleware;
