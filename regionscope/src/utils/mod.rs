//! Small helpers shared by the other modules: builder-style `with_*` and
//! getter macros, and path checks used before any input is read.

use std::path::Path;

use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

/// Fails with [`RegionScopeError::MissingSource`] unless `path` points to an
/// existing regular file.
pub fn ensure_source_exists(path: &Path) -> RegionScopeResult<()> {
    if path.is_file() {
        Ok(())
    }
    else {
        Err(RegionScopeError::MissingSource {
            path: path.to_path_buf(),
        })
    }
}
