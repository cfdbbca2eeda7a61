//! # Todoz Architecture
//!
//! Todoz is a **UI-agnostic task list library**. The bundled CLI is one client of it;
//! a browser front end, a TUI, or a service could drive the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One session: collection + persistence + filter mode      │
//! │  - mutate → save → project, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (collection.rs, reorder.rs, filter.rs, index.rs)      │
//! │  - Pure in-memory logic over Vec<Todo>                      │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (persist.rs) over Storage (store/)             │
//! │  - Lenient JSON snapshot codec                              │
//! │  - KeyValueStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`collection.rs`, `reorder.rs`, `filter.rs`): unit tests of the ordering
//!    and mutation rules. This is where most testing lives.
//! 2. **Persistence** (`persist.rs`): decoding of legacy and corrupt snapshots.
//! 3. **API** (`api.rs`): the mutate/save/project protocol against `InMemoryStore`.
//! 4. **Integration** (`tests/`): file-backed sessions, property tests, and the CLI binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`collection`]: The ordered todo collection and its CRUD operations
//! - [`reorder`]: Move-before gesture and order normalization
//! - [`filter`]: View projection by completion state
//! - [`index`]: User-facing selectors (positions, ids, id prefixes)
//! - [`persist`]: Snapshot encoding/decoding over a key-value slot
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Todo`, `FilterMode`)
//! - [`id`]: Identifier generation
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal output for the binary (not part of the lib API)

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod index;
pub mod model;
pub mod persist;
pub mod reorder;
pub mod store;
