//! Filesystem utilities for stepwise.
//!
//! Every prompt, code file and report goes through an atomic write so a
//! later backfill never reads a truncated file.

pub mod atomic;

pub use atomic::atomic_write_file;
