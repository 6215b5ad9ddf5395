//! `ps-domain`: shared types for the Phoenix Scout workspace.
//!
//! Everything that more than one crate needs lives here: the error type,
//! configuration, structured trace events, the on-disk match dataset shape,
//! the analysis payload / stored row, and the namespace builder.

pub mod config;
pub mod dataset;
pub mod error;
pub mod namespace;
pub mod summary;
pub mod trace;
