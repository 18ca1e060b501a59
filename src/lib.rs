//! # escli - Interactive Document-Store Client
//!
//! A REPL-style command-line client for Elasticsearch-compatible document
//! stores. An operator types simplified commands at a prompt; each line is
//! parsed, validated, mapped to an HTTP call, and the response is printed
//! pretty-formatted.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  line   ┌─────────┐  command  ┌────────────┐
//! │ REPL     │────────►│ Grammar │──────────►│ Dispatcher │
//! │ (prompt, │         │ (parse, │           │ (session,  │
//! │ history) │         │ arity)  │           │ handlers)  │
//! └──────────┘         └─────────┘           └─────┬──────┘
//!      ▲                                           │ request
//!      │ rendered text  ┌──────────┐   outcome     ▼
//!      └────────────────│ Renderer │◄────────┌───────────┐
//!                       └──────────┘         │ Transport │
//!                                            └───────────┘
//! ```
//!
//! The transport never raises: every call yields a
//! [`transport::RequestOutcome`], so rendering is uniform for real responses
//! and connection failures alike.

pub mod cmd_args;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod render;
pub mod repl;
pub mod transport;

pub use command::{Command, CommandError};
pub use dispatch::{DispatchResult, Dispatcher};
pub use transport::{HttpTransport, RequestOutcome, Transport};
