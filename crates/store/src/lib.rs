//! Field stores for list shapes.
//!
//! A [`StoreTemplate`] fixes a set of named fields and their default values.
//! Each [`Store`] made from it starts with its own deep clone of those
//! defaults, so mutating one store never leaks into the template or into
//! other stores.
//!
//! ```
//! use basicreport_store::StoreTemplate;
//!
//! let mut page = StoreTemplate::new([("rows", Vec::<String>::new()), ("headers", vec![])]).init();
//! page.get_mut("rows").unwrap().push("first".into());
//!
//! let fresh = page.copy();
//! assert!(fresh.get("rows").unwrap().is_empty());
//! ```

mod error;

use std::sync::Arc;

use indexmap::IndexMap;

pub use error::{Result, StoreError};

/// Ordered field names and their default values.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTemplate<V> {
    defaults: IndexMap<String, V>,
}

impl<V: Clone> StoreTemplate<V> {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, V)>) -> Self {
        Self { defaults: fields.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }

    /// Freezes the template and returns its first store.
    pub fn init(self) -> Store<V> {
        Arc::new(self).instantiate()
    }

    pub fn instantiate(self: &Arc<Self>) -> Store<V> {
        Store { template: Arc::clone(self), values: self.defaults.clone() }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    pub fn default_value(&self, field: &str) -> Option<&V> {
        self.defaults.get(field)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

/// A set of field values created from a [`StoreTemplate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Store<V> {
    template: Arc<StoreTemplate<V>>,
    values: IndexMap<String, V>,
}

impl<V: Clone> Store<V> {
    pub fn template(&self) -> &Arc<StoreTemplate<V>> {
        &self.template
    }

    pub fn get(&self, field: &str) -> Option<&V> {
        self.values.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut V> {
        self.values.get_mut(field)
    }

    /// Replaces a field's value, returning the previous one.
    pub fn set(&mut self, field: &str, value: V) -> Result<V> {
        let slot = self
            .values
            .get_mut(field)
            .ok_or_else(|| StoreError::UnknownField(field.to_string()))?;
        Ok(std::mem::replace(slot, value))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A new store holding the template defaults, not this store's values.
    pub fn copy(&self) -> Self {
        self.template.instantiate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_template() -> StoreTemplate<Vec<String>> {
        StoreTemplate::new([("rows", vec![]), ("headers", vec!["title".to_string()])])
    }

    #[test]
    fn test_init_uses_defaults() {
        let store = page_template().init();
        assert_eq!(store.fields().collect::<Vec<_>>(), ["rows", "headers"]);
        assert_eq!(store.get("headers"), Some(&vec!["title".to_string()]));
        assert_eq!(store.get("footer"), None);
    }

    #[test]
    fn test_stores_do_not_share_values() {
        let template = Arc::new(page_template());
        let mut first = template.instantiate();
        let second = template.instantiate();

        first.get_mut("headers").expect("field").push("date".to_string());

        assert_eq!(first.get("headers").map(Vec::len), Some(2));
        assert_eq!(second.get("headers").map(Vec::len), Some(1));
        assert_eq!(template.default_value("headers").map(Vec::len), Some(1));
    }

    #[test]
    fn test_copy_resets_to_defaults() {
        let mut store = page_template().init();
        let previous = store.set("rows", vec!["a".to_string()]).expect("set");
        assert!(previous.is_empty());

        let values: Vec<(&str, usize)> = store.iter().map(|(k, v)| (k, v.len())).collect();
        assert_eq!(values, [("rows", 1), ("headers", 1)]);

        let copy = store.copy();
        assert_eq!(copy.get("rows"), Some(&vec![]));
        assert!(Arc::ptr_eq(copy.template(), store.template()));
    }

    #[test]
    fn test_set_unknown_field() {
        let mut store = page_template().init();
        let err = store.set("footer", vec![]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownField(ref f) if f == "footer"));
    }
}
