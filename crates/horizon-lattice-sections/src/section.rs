//! Section adapters and the values exchanged with them.
//!
//! A section is one independent sub-list inside a
//! [`SectionedAdapter`](crate::SectionedAdapter). It knows how many items it
//! has, how to create a placeholder item and how to fill a placeholder for
//! one of its own (section-local) positions. It knows nothing about the
//! other sections or about global positions.

use std::fmt;
use std::sync::Arc;

/// The capability a sub-list must provide to take part in a sectioned list.
///
/// `I` is the host's renderable item type. Every section of one
/// `SectionedAdapter` produces the same `I`, but each section decides how its
/// own items look and what they contain.
///
/// Each section produces exactly one kind of item. The adapter uses the
/// section's index as the item kind, so items created by one section are
/// only ever rebound by that same section.
///
/// # Example
///
/// ```
/// use horizon_lattice_sections::SectionAdapter;
///
/// struct Header(&'static str);
///
/// impl SectionAdapter<String> for Header {
///     fn item_count(&self) -> usize {
///         1
///     }
///
///     fn create_item(&self) -> String {
///         String::new()
///     }
///
///     fn bind_item(&self, item: &mut String, _position: usize) {
///         item.clear();
///         item.push_str(self.0);
///     }
/// }
/// ```
pub trait SectionAdapter<I>: Send + Sync {
    /// Returns the number of items currently in this section.
    ///
    /// Called on every position query, so it should be cheap. The value may
    /// change between calls.
    fn item_count(&self) -> usize;

    /// Creates a new, unbound placeholder item for this section.
    fn create_item(&self) -> I;

    /// Fills `item` with the data at the section-local `position`.
    ///
    /// The adapter only calls this with `position < item_count()` as
    /// observed just before the call, including when an item is rebound at
    /// a position owned by another section.
    fn bind_item(&self, item: &mut I, position: usize);
}

/// A section shared between the caller and a sectioned adapter.
pub type SharedSection<I> = Arc<dyn SectionAdapter<I>>;

/// Where a global position lands: which section, and where inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionPosition {
    /// Index of the owning section.
    pub section: usize,
    /// Position inside the owning section.
    pub local: usize,
}

impl SectionPosition {
    /// Creates a new section position.
    pub fn new(section: usize, local: usize) -> Self {
        Self { section, local }
    }
}

/// An item created through a sectioned adapter.
///
/// Records the kind (the index of the creating section) so that a later
/// bind is routed back to the section that created the item, no matter
/// which position the host recycles it into.
#[derive(Clone, PartialEq, Eq)]
pub struct SectionItem<I> {
    kind: usize,
    item: I,
}

impl<I> SectionItem<I> {
    pub(crate) fn new(kind: usize, item: I) -> Self {
        Self { kind, item }
    }

    /// Returns the item kind, i.e. the index of the section that created it.
    pub fn kind(&self) -> usize {
        self.kind
    }

    /// Returns the wrapped item.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// Returns the wrapped item mutably.
    pub fn item_mut(&mut self) -> &mut I {
        &mut self.item
    }

    /// Consumes the wrapper and returns the item.
    pub fn into_inner(self) -> I {
        self.item
    }
}

impl<I: fmt::Debug> fmt::Debug for SectionItem<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionItem")
            .field("kind", &self.kind)
            .field("item", &self.item)
            .finish()
    }
}

impl<I> std::ops::Deref for SectionItem<I> {
    type Target = I;

    fn deref(&self) -> &I {
        &self.item
    }
}

impl<I> std::ops::DerefMut for SectionItem<I> {
    fn deref_mut(&mut self) -> &mut I {
        &mut self.item
    }
}
