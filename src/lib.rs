//! # code-scout
//!
//! Describe code in plain words and get matching source files from GitHub
//! code search, each with an optional LLM-written explanation.
//!
//! ## Architecture
//!
//! ```text
//!                ┌──────────────┐
//!                │  User Query  │
//!                └──────┬───────┘
//!                       ▼
//!           ┌───────────────────────┐
//!           │   Query Enhancement   │  LLM → `kw language:x filename:*.y`
//!           │  (fallback if LLM ✗)  │
//!           └───────────┬───────────┘
//!                       ▼
//!           ┌───────────────────────┐
//!           │  GitHub code search   │  one page, 10 hits
//!           └───────────┬───────────┘
//!          ┌────────────┼────────────┐
//!          ▼            ▼            ▼
//!     ┌─────────┐  ┌─────────┐  ┌─────────┐
//!     │ fetch #1│  │ fetch #2│  │ fetch #n│  concurrent, failures dropped
//!     └────┬────┘  └────┬────┘  └────┬────┘
//!          └────────────┼────────────┘
//!                       ▼  input order restored
//!           ┌───────────────────────┐
//!           │   History record      │  failure logged only
//!           └───────────┬───────────┘
//!                       ▼
//!                ┌──────────────┐
//!                │   Results    │
//!                └──────────────┘
//! ```
//!
//! Code analysis runs separately, one snippet per request.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, GitHub and LLM settings
//! - [`models`] - Shared data types: `SearchResult`, `SearchRecord`, request/response types
//! - [`github`] - GitHub search/contents client and base64 content decoding
//! - [`llm`] - Generation backends, query enhancement and code analysis
//! - [`search`] - Concurrent result aggregation and the end-to-end search pipeline
//! - [`history`] - Search history stores (JSON Lines file, in-memory)
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state wiring the collaborators together

pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod history;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
