//! This module provides the `Filter` trait and related structures for managing filters and their configuration.
//! Filters are applied to 8-bit images laid out as `(rows, cols, channels)` and are configured from
//! [`FilterSettings`]. It also implements a global, thread-safe registry for looking filters up by name.

use crate::config::FilterSettings;
use crate::error::FilterError;
#[allow(unused_imports)] // this dependency is required by the `register_filter` macro
use ctor::ctor;
use ndarray::{Array3, ArrayView3};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard};

/// The `Filter` trait defines the structure and behavior of an image filter.
///
/// Filters must implement:
/// - A `new` function to initialize a filter with default parameters.
/// - A `config` function to provide metadata for the filter.
/// - A `configure` function to take over the parameters from the current settings.
/// - A `filter` function to apply the filter to an image.
///
/// To implement a new filter, create a struct that implements the `Filter` trait, derives `Clone`
/// and `Debug` and is registered using the `register_filter` macro. The file also needs to be added
/// in `src/filters/mod.rs` to be included in the filter registry.
///
/// **Example**:
/// ```ignore
/// use crate::filters::filter::{Filter, FilterConfig, FilterDomain};
///
/// #[register_filter]
/// #[derive(Clone, Debug)]
/// struct ExampleFilter;
///
/// impl Filter for ExampleFilter {
///     fn new() -> Self { ExampleFilter }
///
///     fn config(&self) -> FilterConfig {
///         FilterConfig {
///             name: "Example Filter".to_string(),
///             description: "Description of the example filter.".to_string(),
///             domain: FilterDomain::Spatial,
///         }
///     }
///
///     fn configure(&mut self, _settings: &FilterSettings) -> Result<(), FilterError> {
///         Ok(())
///     }
///
///     fn filter(&self, image: ArrayView3<'_, u8>) -> Result<Array3<u8>, FilterError> {
///         Ok(image.to_owned())
///     }
/// }
/// ```
pub trait Filter: Send + Sync + Debug + CloneBoxedFilter {
    /// Creates a new instance of the filter with default parameters.
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the filter configuration, including name, description and domain.
    fn config(&self) -> FilterConfig;

    /// Takes over the parameters relevant to this filter from `settings`.
    ///
    /// Invalid parameters are rejected here, before any image is touched.
    fn configure(&mut self, settings: &FilterSettings) -> Result<(), FilterError>;

    /// Applies the filter to `image` and returns a new image of the same shape.
    fn filter(&self, image: ArrayView3<'_, u8>) -> Result<Array3<u8>, FilterError>;
}

/// The `FilterDomain` enum specifies where a filter does its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDomain {
    /// Filters working on the pixel grid directly.
    Spatial,
    /// Filters that operate on the centered 2-D spectrum.
    Frequency,
}

/// A structure representing the configuration and metadata of a filter.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// The name of the filter, used for identification and as registry key.
    pub name: String,
    /// A description of the filter, explaining its purpose and functionality.
    pub description: String,
    /// The domain in which the filter operates, represented by `FilterDomain`.
    pub domain: FilterDomain,
}

/// A trait to allow cloning of boxed filters.
/// This is necessary because `Box<dyn Filter>` cannot be cloned directly.
pub trait CloneBoxedFilter {
    fn clone_box(&self) -> Box<dyn Filter>;
}

impl<T> CloneBoxedFilter for T
where
    T: 'static + Filter + Clone,
{
    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Filter> {
    fn clone(&self) -> Box<dyn Filter> {
        self.as_ref().clone_box()
    }
}

/// A registry to manage and retrieve registered filters.
///
/// **Example**:
/// ```ignore
/// use crate::filters::filter::FilterRegistry;
///
/// // Register a filter
/// FilterRegistry::register_filter::<YourFilter>();
///
/// // Retrieve a filter
/// if let Some(filter) = FilterRegistry::lock().get_filter("YourFilterName") {
///     log::info!("filter found: {:?}", filter);
/// }
/// ```
#[derive(Debug)]
pub struct FilterRegistry {
    pub filters: HashMap<String, Box<dyn Filter>>,
}

impl FilterRegistry {
    /// Registers a new filter of type `F` into the global registry under its configured name.
    ///
    /// Registering a second filter with the same name replaces the first one.
    pub fn register_filter<F: Filter + 'static>() {
        let filter_instance = F::new();
        let name = filter_instance.config().name;
        Self::lock().filters.insert(name, Box::new(filter_instance));
    }

    /// Locks the global registry.
    ///
    /// Registration only inserts into the map, so a poisoned lock still holds a usable registry.
    pub fn lock() -> MutexGuard<'static, FilterRegistry> {
        FILTER_REGISTRY
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Retrieves a registered filter by its name.
    pub fn get_filter(&self, name: &str) -> Option<&Box<dyn Filter>> {
        self.filters.get(name)
    }

    /// Names of all registered filters, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Implements `IntoIterator` for `&FilterRegistry`.
///
/// This allows iterating over all the registered filters in the registry by borrowing it (non-mutably).
impl<'a> IntoIterator for &'a FilterRegistry {
    type Item = &'a Box<dyn Filter>;
    type IntoIter = std::collections::hash_map::Values<'a, String, Box<dyn Filter>>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.values()
    }
}

/// A global, thread-safe filter registry.
///
/// Populated at start-up by the `register_filter` macro and read-only afterwards.
pub static FILTER_REGISTRY: Lazy<Mutex<FilterRegistry>> = Lazy::new(|| {
    Mutex::new(FilterRegistry {
        filters: HashMap::new(),
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_filters_are_registered_by_name() {
        let registry = FilterRegistry::lock();
        let names = registry.names();
        assert!(names.contains(&"Ideal DFT Filter".to_string()));
        assert!(names.contains(&"Box Filter".to_string()));

        let ideal = registry.get_filter("Ideal DFT Filter").unwrap();
        assert_eq!(ideal.config().domain, FilterDomain::Frequency);
        let boxed = registry.get_filter("Box Filter").unwrap();
        assert_eq!(boxed.config().domain, FilterDomain::Spatial);
        assert!(registry.get_filter("Deconvolution").is_none());
    }

    #[test]
    fn test_registered_filters_iterate_and_clone() {
        let registry = FilterRegistry::lock();
        let mut count = 0;
        for filter in &*registry {
            let copy = filter.clone();
            assert_eq!(copy.config().name, filter.config().name);
            count += 1;
        }
        assert_eq!(count, registry.filters.len());
    }
}
