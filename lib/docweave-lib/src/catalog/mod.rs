mod fragment;
pub use fragment::Fragment;

#[allow(clippy::module_inception)]
mod catalog;
pub use catalog::FragmentCatalog;
