//! Turning a selection into an ordered list of checkers.

use crate::checker::{Category, Checker};
use crate::error::Result;
use crate::registry::CheckerRegistry;
use std::collections::HashSet;
use std::sync::Arc;

/// Which checkers a run should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit checker names, run in the given order.
    Names(Vec<String>),
    /// Every member of these categories, in fixed category order.
    Categories(Vec<Category>),
    /// Every registered checker, in registration order.
    All,
}

impl Selection {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Names(names) => names.is_empty(),
            Self::Categories(categories) => categories.is_empty(),
            Self::All => false,
        }
    }
}

/// Resolve `selection` against `registry`.
///
/// Unknown explicit names fail before anything runs. Checkers in `disabled`
/// are dropped from category and full-registry selections only.
pub(crate) fn resolve(
    registry: &CheckerRegistry,
    selection: &Selection,
    disabled: &HashSet<String>,
) -> Result<Vec<Arc<dyn Checker>>> {
    let checkers = match selection {
        Selection::Names(names) => {
            let mut seen = HashSet::new();
            let mut checkers = Vec::with_capacity(names.len());
            for name in names {
                let checker = registry.get(name)?;
                if seen.insert(name.as_str()) {
                    checkers.push(checker);
                }
            }
            checkers
        }
        Selection::Categories(categories) => {
            let mut seen = HashSet::new();
            Category::ALL
                .into_iter()
                .filter(|c| categories.contains(c))
                .flat_map(|c| registry.get_by_category(c))
                .filter(|c| !disabled.contains(c.name()))
                .filter(|c| seen.insert(c.name().to_string()))
                .collect()
        }
        Selection::All => registry
            .all()
            .into_iter()
            .filter(|c| !disabled.contains(c.name()))
            .collect(),
    };

    tracing::debug!(
        selected = ?checkers.iter().map(|c| c.name()).collect::<Vec<_>>(),
        "resolved selection"
    );
    Ok(checkers)
}
