//! Element Attributes
//!
//! Attribute storage: get, set, remove, has. Insertion order is kept so
//! copies between elements are deterministic.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Attribute collection
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    attributes: Vec<Attr>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set attribute, returning the previous value
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name == name) {
            return Some(std::mem::replace(&mut attr.value, value.to_string()));
        }
        self.attributes.push(Attr::new(name, value));
        None
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: &str) -> Option<Attr> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = AttributeMap::new();
        attrs.set("data-id", "1");
        attrs.set("data-action", "delete");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("data-id"), Some("1"));
        assert_eq!(attrs.set("data-id", "7"), Some("1".to_string()));
        assert_eq!(attrs.get("data-id"), Some("7"));
    }

    #[test]
    fn test_remove_attribute_keeps_order() {
        let mut attrs = AttributeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("c", "3");

        assert!(attrs.remove("b").is_some());
        assert!(attrs.remove("b").is_none());
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}
