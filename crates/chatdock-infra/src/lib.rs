//! Infrastructure layer for chatdock.
//!
//! Contains the implementation of the `WidgetApi` port defined in
//! `chatdock-core` (the `reqwest` REST client), the `config.toml` loader and
//! filesystem adapters for the data directory, logos and embed snippets.

pub mod config;
pub mod filesystem;
pub mod rest;
