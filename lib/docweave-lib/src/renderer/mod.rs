//! Fragment rendering.
//!
//! A fragment renders against exactly three inputs: the page context, an
//! optional parameter object and its own declared defaults. The output pairs
//! the produced markup with the set of code languages it contains.

mod escape;
mod scope;
pub(crate) use scope::Scope;

#[allow(clippy::module_inception)]
mod renderer;
pub use renderer::*;
