pub mod reconciler;

pub use reconciler::{module_specifier, update_import_maps};
