//! Layered configuration store.
//!
//! Builds one tree from three kinds of document, later ones overwriting
//! earlier ones at the top level:
//! 1. **Defaults** - [`DEFAULT_DOCUMENT`], compiled in
//! 2. **Bundled** - a [`Bundle`] of `.yml` files (or a single `config.yml`)
//! 3. **External** - files merged at runtime through [`ConfigStore::add`]
//!
//! ## Placeholders
//! String values of the form `${NAME:default}` are resolved against the
//! environment on every lookup, so the tree itself never changes when the
//! environment does.

mod loader;
mod merge;
mod path;
mod store;

pub use loader::{
    Bundle, BundleEntry, CONFIG_FILE_NAME, DEFAULT_DOCUMENT, Selection, YAML_EXTENSION,
    parse_document,
};
pub use merge::{shallow_merge, shallow_merge_all};
pub use path::lookup;
pub use store::ConfigStore;
