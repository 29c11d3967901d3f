//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: terminal setup and the loop that routes input through the
//!   form and applies finished exchanges.
//! - [`conversation`], [`input_field`] and [`form`]: the three elements the
//!   controller is built from.
//! - [`renderer`] and [`layout`]: frame composition.

pub mod chat_loop;
pub mod conversation;
pub mod form;
pub mod input_field;
pub mod layout;
pub mod renderer;
