//! Core library for grokitools
//!
//! This crate implements the **Functional Core** of the grokitools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The grokitools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`grokitools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`grokitools`**: HTTP calls, the query dispatcher, CLI and MCP server (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`request`]: The `grokipedia_query` request, its actions and how they resolve
//!   into the call sequence the shell performs
//! - [`grokipedia`]: Grokipedia API response models and their transformations
//!   (search, page metadata, content, smart-mode enrichment)
//! - [`envelope`]: The JSON envelope returned for every action and error case
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use grokitools_core::grokipedia::search::{normalize_search_results, SearchResponse};
//!
//! let response: SearchResponse = serde_json::from_str(fixture)?;
//! let results = normalize_search_results(response.results.unwrap_or_default());
//!
//! assert_eq!(results[0].snippet, "Albert Einstein was a physicist");
//! ```

pub mod envelope;
pub mod grokipedia;
pub mod request;
