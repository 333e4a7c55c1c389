//! Filter registry
//!
//! Maps stable filter names to filter functions. The built-in table is a
//! static array; nothing is discovered at runtime.

use std::fmt;

use crate::inventory::{
    InventoryResult, InventoryTable, COMPLETE, EXCLUDE, MISSING, NON_NAN_COUNT,
};

use super::errors::{FilterError, FilterResult};
use super::library;
use super::Mask;

/// Signature shared by all filters
pub type FilterFn = fn(&InventoryTable) -> InventoryResult<Mask>;

/// A named filter.
#[derive(Clone, Copy)]
pub struct Filter {
    name: &'static str,
    description: &'static str,
    columns: &'static [&'static str],
    apply: FilterFn,
}

impl Filter {
    /// Creates a filter entry.
    ///
    /// `columns` lists the columns `apply` reads; it is informational and
    /// used in help output and issue reports.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        columns: &'static [&'static str],
        apply: FilterFn,
    ) -> Self {
        Self {
            name,
            description,
            columns,
            apply,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Applies the filter, returning a mask aligned with the table rows.
    pub fn apply(&self, inventory: &InventoryTable) -> InventoryResult<Mask> {
        (self.apply)(inventory)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish()
    }
}

const COUNT_MISSING: &[&str] = &[NON_NAN_COUNT, MISSING];
const COUNT_COMPLETE: &[&str] = &[NON_NAN_COUNT, COMPLETE];
const MISSING_COMPLETE: &[&str] = &[MISSING, COMPLETE];
const COUNT_EXCLUDE: &[&str] = &[NON_NAN_COUNT, EXCLUDE];
const COUNT_ONLY: &[&str] = &[NON_NAN_COUNT];

static BUILTIN: [Filter; 9] = [
    Filter::new(
        "probably_not_missing_but_unmarked",
        "has content, no missingness decision recorded",
        COUNT_MISSING,
        library::probably_not_missing_but_unmarked,
    ),
    Filter::new(
        "probably_missing_but_marked_present",
        "no content, yet explicitly marked present",
        COUNT_MISSING,
        library::probably_missing_but_marked_present,
    ),
    Filter::new(
        "probably_missing_but_unmarked",
        "no content, no missingness decision recorded",
        COUNT_MISSING,
        library::probably_missing_but_unmarked,
    ),
    Filter::new(
        "content_not_marked_complete",
        "has content, not marked complete",
        COUNT_COMPLETE,
        library::content_not_marked_complete,
    ),
    Filter::new(
        "missing_not_marked_complete",
        "marked missing, not marked complete",
        MISSING_COMPLETE,
        library::missing_not_marked_complete,
    ),
    Filter::new(
        "less_content_than_max",
        "has content, but less than the richest instance in the same file",
        COUNT_ONLY,
        library::less_content_than_max,
    ),
    Filter::new(
        "has_content_but_marked_missing",
        "has content, but marked missing",
        COUNT_MISSING,
        library::has_content_but_marked_missing,
    ),
    Filter::new(
        "empty_and_not_complete",
        "no content, not marked complete",
        COUNT_COMPLETE,
        library::empty_and_not_complete,
    ),
    Filter::new(
        "empty_and_not_ignored",
        "no content, not excluded",
        COUNT_EXCLUDE,
        library::empty_and_not_ignored,
    ),
];

/// Name-to-filter lookup table.
///
/// Registration order is preserved and is the order `names()` reports.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: Vec<Filter>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in filters.
    pub fn builtin() -> Self {
        Self {
            filters: BUILTIN.to_vec(),
        }
    }

    /// Registers a filter under its name.
    ///
    /// # Errors
    ///
    /// `DuplicateFilter` if the name is taken.
    pub fn register(&mut self, filter: Filter) -> FilterResult<()> {
        if self.contains(filter.name()) {
            return Err(FilterError::DuplicateFilter {
                name: filter.name().to_string(),
            });
        }
        self.filters.push(filter);
        Ok(())
    }

    /// Looks up a filter by name.
    pub fn resolve(&self, name: &str) -> FilterResult<&Filter> {
        self.filters
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FilterError::UnknownFilter {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f.name() == name)
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_all(inventory: &InventoryTable) -> InventoryResult<Mask> {
        Ok(vec![true; inventory.len()])
    }

    #[test]
    fn test_builtin_names() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "probably_not_missing_but_unmarked",
                "probably_missing_but_marked_present",
                "probably_missing_but_unmarked",
                "content_not_marked_complete",
                "missing_not_marked_complete",
                "less_content_than_max",
                "has_content_but_marked_missing",
                "empty_and_not_complete",
                "empty_and_not_ignored",
            ]
        );
    }

    #[test]
    fn test_resolve_known() {
        let registry = FilterRegistry::builtin();
        let filter = registry.resolve("empty_and_not_ignored").unwrap();
        assert_eq!(filter.name(), "empty_and_not_ignored");
        assert_eq!(filter.columns(), &[NON_NAN_COUNT, EXCLUDE]);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = FilterRegistry::builtin();
        let err = registry.resolve("not_a_filter").unwrap_err();
        assert_eq!(err.code(), "INV_UNKNOWN_FILTER");
        assert!(err.to_string().contains("not_a_filter"));
    }

    #[test]
    fn test_register_extension() {
        let mut registry = FilterRegistry::builtin();
        registry
            .register(Filter::new("select_all", "every row", &[], select_all))
            .unwrap();
        assert_eq!(registry.len(), 10);
        assert!(registry.contains("select_all"));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = FilterRegistry::builtin();
        let err = registry
            .register(Filter::new(
                "less_content_than_max",
                "shadow",
                &[],
                select_all,
            ))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::DuplicateFilter {
                name: "less_content_than_max".to_string()
            }
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = FilterRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("empty_and_not_ignored").is_err());
    }
}
