//! `ps-gateway`: HTTP surface and CLI for the match-analysis workflow.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod state;
