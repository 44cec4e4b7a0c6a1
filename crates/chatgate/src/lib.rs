//! Chatgate - a stateless gateway that relays chat conversations to hosted LLM providers.

pub mod config;
pub mod gateway;
pub mod handlers;
pub mod llm;
pub mod server;
