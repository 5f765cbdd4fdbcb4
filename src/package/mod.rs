pub mod locator;

pub use locator::{web_dependency_name, PackageLocator};
