//! Checker registry.
//!
//! The [`CheckerRegistry`] is the catalog of every checker known to a run:
//! a name-keyed set of checkers in registration order plus the static
//! category mapping. It is built once at startup and only read afterwards.

use crate::checker::{register_builtins, Category, Checker};
use crate::error::{PyccError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

/// Summary of one registered checker, as shown by `--list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckerInfo {
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub available: bool,
}

/// Registry of every checker available to a run.
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: Vec<Arc<dyn Checker>>,
    index: HashMap<String, usize>,
    categories: BTreeMap<Category, Vec<String>>,
}

impl CheckerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the ten built-in tools.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a checker under its own name.
    ///
    /// # Errors
    ///
    /// `DuplicateChecker` when the name is taken; the first registration is kept.
    pub fn register(&mut self, checker: Box<dyn Checker>) -> Result<()> {
        let name = checker.name().to_string();
        if self.index.contains_key(&name) {
            return Err(PyccError::DuplicateChecker { name });
        }
        tracing::debug!(checker = %name, "registered");
        self.index.insert(name, self.checkers.len());
        self.checkers.push(Arc::from(checker));
        Ok(())
    }

    /// Add an already registered checker to a category.
    ///
    /// Assigning the same checker twice is a no-op.
    pub fn assign(&mut self, category: Category, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(PyccError::CheckerNotFound {
                name: name.to_string(),
            });
        }
        let members = self.categories.entry(category).or_default();
        if !members.iter().any(|m| m == name) {
            members.push(name.to_string());
        }
        Ok(())
    }

    /// Get a checker by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Checker>> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.checkers[i]))
            .ok_or_else(|| PyccError::CheckerNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Checkers of a category, in member order.
    pub fn get_by_category(&self, category: Category) -> Vec<Arc<dyn Checker>> {
        self.members(category)
            .iter()
            .filter_map(|name| self.get(name).ok())
            .collect()
    }

    /// Like [`get_by_category`](Self::get_by_category), keyed by label.
    /// Unknown labels yield an empty list.
    pub fn get_by_category_name(&self, label: &str) -> Vec<Arc<dyn Checker>> {
        label
            .parse::<Category>()
            .map(|c| self.get_by_category(c))
            .unwrap_or_default()
    }

    /// Member names of a category.
    pub fn members(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First category (in fixed order) that lists `name`.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|&c| self.members(c).iter().any(|m| m == name))
    }

    /// Every checker, in registration order.
    pub fn all(&self) -> Vec<Arc<dyn Checker>> {
        self.checkers.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Describe every checker and probe its availability.
    ///
    /// Has no effect on the registry; calling it twice gives the same answer
    /// as long as the environment is unchanged.
    pub fn list_checkers(&self, project_path: &Path) -> Vec<CheckerInfo> {
        self.iter()
            .map(|checker| CheckerInfo {
                name: checker.name().to_string(),
                description: checker.description().to_string(),
                category: self.category_of(checker.name()),
                available: checker.is_available(project_path),
            })
            .collect()
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field(
                "checkers",
                &self.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("categories", &self.categories)
            .finish()
    }
}
