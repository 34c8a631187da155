//! Registry of known plugin implementations
//!
//! Class names entered at the form boundary are validated against this
//! registry instead of being looked up at runtime.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Interfaces a plugin implementation can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Can be run by the package installer.
    PackageInstallationPlugin,
    /// Can additionally be edited through the devtools entry editor.
    GuiPackageInstallationPlugin,
}

/// A known implementation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginImplementation {
    pub class_name: String,
    pub is_abstract: bool,
    pub capabilities: BTreeSet<Capability>,
}

impl PluginImplementation {
    pub fn new(
        class_name: impl Into<String>,
        is_abstract: bool,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            is_abstract,
            capabilities: capabilities.into_iter().collect(),
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract
    }
}

const PLUGIN_NAMESPACE: &str = "wcf\\system\\package\\plugin\\";

/// Concrete plugins shipped with the core; the second value marks the ones
/// that also support the entry editor.
const BUILTIN_PLUGINS: &[(&str, bool)] = &[
    ("ACLOptionPackageInstallationPlugin", true),
    ("ACPMenuPackageInstallationPlugin", true),
    ("ACPSearchProviderPackageInstallationPlugin", true),
    ("ACPTemplatePackageInstallationPlugin", false),
    ("BBCodePackageInstallationPlugin", true),
    ("BoxPackageInstallationPlugin", true),
    ("ClipboardActionPackageInstallationPlugin", true),
    ("CoreObjectPackageInstallationPlugin", true),
    ("CronjobPackageInstallationPlugin", true),
    ("EventListenerPackageInstallationPlugin", true),
    ("FilePackageInstallationPlugin", false),
    ("LanguagePackageInstallationPlugin", true),
    ("MediaProviderPackageInstallationPlugin", true),
    ("MenuItemPackageInstallationPlugin", true),
    ("MenuPackageInstallationPlugin", true),
    ("ObjectTypeDefinitionPackageInstallationPlugin", true),
    ("ObjectTypePackageInstallationPlugin", true),
    ("OptionPackageInstallationPlugin", true),
    ("PagePackageInstallationPlugin", true),
    ("PIPPackageInstallationPlugin", true),
    ("ScriptPackageInstallationPlugin", false),
    ("SmileyPackageInstallationPlugin", true),
    ("SQLPackageInstallationPlugin", false),
    ("StylePackageInstallationPlugin", false),
    ("TemplateListenerPackageInstallationPlugin", true),
    ("TemplatePackageInstallationPlugin", false),
    ("UserGroupOptionPackageInstallationPlugin", true),
    ("UserMenuPackageInstallationPlugin", true),
    ("UserNotificationEventPackageInstallationPlugin", true),
    ("UserOptionPackageInstallationPlugin", true),
    ("UserProfileMenuPackageInstallationPlugin", true),
];

const BUILTIN_ABSTRACT_PLUGINS: &[&str] = &[
    "AbstractPackageInstallationPlugin",
    "AbstractXMLPackageInstallationPlugin",
    "AbstractOptionPackageInstallationPlugin",
    "AbstractMenuPackageInstallationPlugin",
];

/// Lookup of implementations by fully-qualified class name.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    implementations: HashMap<String, PluginImplementation>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the core plugins registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, gui) in BUILTIN_PLUGINS {
            let mut capabilities = vec![Capability::PackageInstallationPlugin];
            if *gui {
                capabilities.push(Capability::GuiPackageInstallationPlugin);
            }
            registry.register(PluginImplementation::new(
                format!("{PLUGIN_NAMESPACE}{name}"),
                false,
                capabilities,
            ));
        }
        for name in BUILTIN_ABSTRACT_PLUGINS {
            registry.register(PluginImplementation::new(
                format!("{PLUGIN_NAMESPACE}{name}"),
                true,
                [Capability::PackageInstallationPlugin],
            ));
        }
        registry
    }

    /// Register an implementation, replacing one with the same class name.
    pub fn register(&mut self, implementation: PluginImplementation) {
        self.implementations
            .insert(implementation.class_name.clone(), implementation);
    }

    pub fn get(&self, class_name: &str) -> Option<&PluginImplementation> {
        self.implementations.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.implementations.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }

    /// All registered class names (sorted).
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.implementations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_with_builtins() {
        let registry = PluginRegistry::with_builtins();
        let pip = registry
            .get("wcf\\system\\package\\plugin\\PIPPackageInstallationPlugin")
            .unwrap();
        assert!(pip.is_instantiable());
        assert!(pip.has_capability(Capability::PackageInstallationPlugin));
        assert!(pip.has_capability(Capability::GuiPackageInstallationPlugin));

        let abstract_pip = registry
            .get("wcf\\system\\package\\plugin\\AbstractXMLPackageInstallationPlugin")
            .unwrap();
        assert!(!abstract_pip.is_instantiable());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = PluginRegistry::new();
        registry.register(PluginImplementation::new("vendor\\Foo", true, []));
        registry.register(PluginImplementation::new(
            "vendor\\Foo",
            false,
            [Capability::PackageInstallationPlugin],
        ));

        assert_eq!(registry.len(), 1);
        assert!(registry.get("vendor\\Foo").unwrap().is_instantiable());
    }

    #[test]
    fn test_list_is_sorted() {
        let mut registry = PluginRegistry::new();
        registry.register(PluginImplementation::new("b", false, []));
        registry.register(PluginImplementation::new("a", false, []));
        assert_eq!(registry.list(), vec!["a", "b"]);
    }
}
