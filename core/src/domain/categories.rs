//! Category registry for the finances tracker.
//!
//! Categories are configuration, not user data: every transaction stores a
//! category key, and this registry resolves keys to display names and colors.
//! The registry's order matters because category summaries list their rows in
//! exactly this order.

use once_cell::sync::Lazy;
use shared::Category;

fn category(key: &str, name: &str, color: &str) -> Category {
    Category {
        key: key.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    }
}

/// The fixed set of categories every installation starts with
static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        category("purchases", "Compras", "#5636D3"),
        category("food", "Alimentação", "#FF872C"),
        category("salary", "Salário", "#12A454"),
        category("car", "Carro", "#E83F5B"),
        category("leisure", "Lazer", "#26195C"),
        category("studies", "Estudos", "#9C001A"),
    ]
});

/// Ordered collection of transaction categories
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Create a registry from an explicit, already ordered category list
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Create a registry with the compiled-in default categories
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CATEGORIES.clone())
    }

    /// Look up a category by its key
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Resolve a key to its display name, falling back to the raw key
    /// when the registry does not know it
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(|c| c.name.as_str()).unwrap_or(key)
    }

    /// Iterate the categories in presentation order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = CategoryRegistry::with_defaults();

        let keys: Vec<&str> = registry.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["purchases", "food", "salary", "car", "leisure", "studies"]
        );
    }

    #[test]
    fn test_get_resolves_known_key() {
        let registry = CategoryRegistry::with_defaults();

        let food = registry.get("food").unwrap();
        assert_eq!(food.name, "Alimentação");
        assert_eq!(food.color, "#FF872C");
    }

    #[test]
    fn test_get_returns_none_for_unknown_key() {
        let registry = CategoryRegistry::with_defaults();

        assert!(registry.get("crypto").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        let registry = CategoryRegistry::with_defaults();

        assert_eq!(registry.display_name("salary"), "Salário");
        assert_eq!(registry.display_name("crypto"), "crypto");
    }

    #[test]
    fn test_custom_registry_keeps_given_order() {
        let registry = CategoryRegistry::new(vec![
            category("food", "Food", "#FF872C"),
            category("transport", "Transport", "#5636D3"),
        ]);

        let keys: Vec<&str> = registry.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["food", "transport"]);
        assert_eq!(registry.len(), 2);
    }
}
