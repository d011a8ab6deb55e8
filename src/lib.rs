//! Prompt Forge - Chat assistant for crafting generative AI prompts
//!
//! Users pick a category, describe what they want, and receive a polished
//! prompt they can approve or refine. The crate is laid out in layers:
//! pure domain logic, ports, adapters for the chat platform and the
//! completion API, and an application layer wiring them together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
