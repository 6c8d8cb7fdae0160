//! Core types - the classification/resolution/rewrite engine.
//!
//! Everything in here is pure logic over strings and paths; the only
//! filesystem access is the existence probe inside [`resolve`].

mod link;
mod resolve;
mod rewrite;

pub use link::{LinkKind, RefClass, SKIP_PREFIXES, classify};
pub use resolve::{Resolution, resolve};
pub use rewrite::{RewriteMode, rewrite};
