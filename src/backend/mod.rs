//! # Assistant Backend
//!
//! Everything that crosses the network: the [`AssistantBackend`] trait the
//! app talks to, the REST wire types, and the HTTP implementation.

pub mod assistant;
pub mod http;
pub mod types;

pub use assistant::{Answer, AssistantBackend, BackendError};
pub use http::HttpBackend;
