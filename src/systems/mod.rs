//! Line systems.
//!
//! Submodules overview
//! - [`linebounds`] – keep world bounds in step with segment edits
//! - [`lineregister`] – activate and tear down line records in one deferred batch
//! - [`linetransform`] – billboard solver driven by change ticks

pub mod linebounds;
pub mod lineregister;
pub mod linetransform;
