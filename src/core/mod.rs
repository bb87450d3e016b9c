//! # Core Application Logic
//!
//! The meeting assistant's business logic. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Message (history)    │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Backend   │
//!             │  Adapter   │          │   (HTTP)   │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: the `Message` entity
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`summary`]: meeting statistics and key topics
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod message;
pub mod state;
pub mod summary;
