//! Inbound adapters driving the portal use-cases.

pub mod cli;
