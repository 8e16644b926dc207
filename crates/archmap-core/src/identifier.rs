//! Interned identifiers for diagram nodes and clusters.
//!
//! Service names, participant names and system names are compared many times
//! while a diagram graph is assembled. A [`Names`] table interns them once so
//! that node identity is a cheap `Copy` comparison. Each table is owned by
//! the graph being built and dropped with it; an [`Id`] is only meaningful
//! for the table that produced it.

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Interned name of a service, participant, system or edge label.
///
/// Two `Id`s from the same [`Names`] are equal exactly when the names they
/// were created from are equal, byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

/// A table of interned names.
///
/// # Examples
///
/// ```
/// use archmap_core::identifier::Names;
///
/// let mut names = Names::new();
/// let billing = names.intern("Billing");
///
/// assert_eq!(billing, names.intern("Billing"));
/// assert_ne!(billing, names.intern("billing"));
/// assert_eq!(names.resolve(billing), Some("Billing"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Names {
    interner: DefaultStringInterner,
}

impl Names {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name` and returns its identifier.
    pub fn intern(&mut self, name: &str) -> Id {
        Id(self.interner.get_or_intern(name))
    }

    /// Returns the identifier of `name` if it was interned before.
    pub fn get(&self, name: &str) -> Option<Id> {
        self.interner.get(name).map(Id)
    }

    /// Returns the name behind `id`, or `None` if `id` came from another table.
    pub fn resolve(&self, id: Id) -> Option<&str> {
        self.interner.resolve(id.0)
    }

    /// Number of distinct names in the table.
    pub fn len(&self) -> usize {
        self.interner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    /// Iterates over every interned name in first-interned order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.interner.iter().map(|(_, name)| name)
    }
}
