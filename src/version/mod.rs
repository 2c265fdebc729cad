//! Version inference: commit classification, bump calculation, formatting.
//!
//! This module is the pure core of the bot. It performs no I/O and carries
//! no logging dependency; collaborators hand it commit messages and it hands
//! back versions or typed errors.

pub mod bump;
pub mod classify;
pub mod format;

pub use bump::{
    BumpIntent, CommitRecord, VersionSpec, apply_bump, next_version, parse_base_version,
    parse_version_input,
};
pub use classify::{ChangeSignal, classify};
pub use format::format_version;
