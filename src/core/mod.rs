pub mod chat_transport;
pub mod config;
pub mod controller;
pub mod message;
