//! utilkit: reordering, tree search and chart axis helpers for
//! loosely-typed JSON data.
//!
//! The [`domain`] module holds the pure algorithms; [`application`] binds
//! configured defaults to them and the [`cli`] drives both from the
//! `utilkit` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
