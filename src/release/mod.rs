//! Release pipeline: orchestration of the open, sync and publish flows.
//!
//! Each flow is one CI event handler. The flows own all side effects (git,
//! npm, GitHub mutations, logging); version inference stays pure in
//! [`crate::version`].

pub mod body;
pub mod git;
pub mod npm;
pub mod open_pr;
pub mod publish;
pub mod sync_pr;

pub use body::{MAX_BODY_LENGTH, ReleaseMeta, extract_release_meta, render_pr_body};
pub use open_pr::run_open;
pub use publish::run_publish;
pub use sync_pr::run_sync;
