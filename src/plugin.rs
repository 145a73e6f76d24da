//! Plugin category detection

/// Id prefix reserved for categories contributed by plugins
pub const PLUGIN_PREFIX: &str = "lighthouse-plugin-";

/// Whether a category id belongs to a plugin-contributed category
pub fn is_plugin(category_id: &str) -> bool {
    category_id.starts_with(PLUGIN_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_prefix() {
        assert!(is_plugin("lighthouse-plugin-field-performance"));
        assert!(is_plugin("lighthouse-plugin-"));
        assert!(!is_plugin("performance"));
        assert!(!is_plugin("lighthouse-plugin"));
        assert!(!is_plugin("my-lighthouse-plugin-thing"));
        assert!(!is_plugin("Lighthouse-Plugin-seo"));
        assert!(!is_plugin(""));
    }
}
