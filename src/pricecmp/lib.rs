//! # Pricecmp Architecture
//!
//! Pricecmp is a **UI-agnostic price comparison library**. It fetches grocery price
//! records from a backend and lets a user search, filter and sort them locally. The
//! terminal client in this package is one consumer of the library, not the library
//! itself.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, runs the shell loop    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Engine (engine.rs)                                    │
//! │  - Owns records, search term, filters, sort                 │
//! │  - Returns a freshly derived view after every change        │
//! │  - Guards against stale fetch responses                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure functions: derive_view, options, sort toggle, ...   │
//! │  - No I/O, no hidden state                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - RecordSource trait                                       │
//! │  - HttpSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Derived View
//!
//! The rendered table is always `derive_view(records, search_term, filters, sort)`:
//!
//! 1. keep records whose name or brand contains the search term (case-insensitive)
//! 2. keep records matching every non-empty store / brand / size filter exactly
//! 3. stable-sort by the single active column
//!
//! Nothing is cached. The engine recomputes after each mutation.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `engine.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`CmdResult`, `Result<T>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! The network is the one exception, and it lives behind [`source::RecordSource`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): Thorough unit tests of the pipeline. This is
//!    where the lion's share of testing lives.
//! 2. **Engine** (`engine.rs`): State transitions against `InMemorySource`.
//! 3. **HTTP**: `tests/http_source.rs` runs `HttpSource` against a local stub server.
//! 4. **CLI**: `tests/cli.rs` drives the binary end to end.
//!
//! ## Module Overview
//!
//! - [`engine`]: The view engine, entry point for all operations
//! - [`commands`]: Pure business logic
//! - [`source`]: Record source abstraction and implementations
//! - [`model`]: Core data types (`PriceRecord`, `FilterState`, `SortConfig`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, table rendering and the interactive shell for the binary (not part of the lib API)

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod source;

#[cfg(test)]
pub(crate) mod test_utils;
