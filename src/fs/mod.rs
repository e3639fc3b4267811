//! Filesystem utilities for quill.
//!
//! The output artifact is replaced atomically so a failed run never leaves a
//! half-written file behind.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
