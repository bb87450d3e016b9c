//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `Header`: product title, connection state, meeting clock
//! - `Message`: one chat bubble
//! - `SummaryPanel`: meeting summary overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: multi-line draft with submit handling
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive external data as props instead of reaching into `App`,
//! which keeps them testable against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── header.rs        (Top bar)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! ├── summary.rs       (Summary overlay)
//! └── input_box/       (Draft editor and row layout)
//! ```

/// Braille spinner shared by the typing indicator, input title and summary notes.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod summary;

pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use summary::SummaryPanel;
