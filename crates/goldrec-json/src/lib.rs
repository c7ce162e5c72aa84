#![forbid(unsafe_code)]

//! JSON normalization for golden-file recordings.
//!
//! Output captured during a test often embeds volatile values: process ids,
//! timestamps, ephemeral ports. Recording such output verbatim makes every
//! run unique and every comparison fail. [`JsonFilter`] walks a parsed JSON
//! document and lets callers rewrite the volatile keys to stable values
//! before the text is recorded.
//!
//! # Role in goldrec
//! This crate is a standalone pre-processing step. It does not depend on the
//! recorder and the recorder does not depend on it; callers compose the two
//! by filtering first and recording second.

pub mod filter;

pub use filter::JsonFilter;
