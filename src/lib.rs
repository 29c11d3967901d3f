//! formchat is a terminal chat client for endpoints that take a form-encoded
//! `message` field and answer with a JSON `response`.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the chat controller, the transport seam, messages and
//!   configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the request body encoding and reply payload.
//! - [`utils`] holds sanitizing, URL and diagnostic helpers.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which resolves settings and dispatches into
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
