//! # Paraform
//!
//! Turns generated summaries and extracted document text into a fixed
//! number of display paragraphs.
//!
//! The paragraph engine itself lives in the I/O-free `paraform-core` crate.
//! This crate wraps it with the pieces a deployment needs: configuration,
//! document text extraction, output rendering, and an HTTP API.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  file/stdin  │──▶│   extract    │──▶│ paraform-core│──▶ render (text / JSON)
//! │  HTTP body   │   │ txt/pdf/docx │   │  assemble    │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`extract`] | Plain text, PDF, DOCX, and PPTX text extraction |
//! | [`render`] | Text and JSON output, summarizer response view |
//! | [`server`] | HTTP API |

pub mod config;
pub mod extract;
pub mod render;
pub mod server;
