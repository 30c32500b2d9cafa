//! The contract a host list view consumes.
//!
//! A virtualized list view only understands flat positions. It asks the
//! adapter how many items there are, which kind of item lives at a
//! position, creates items per kind (or reuses one from a per-kind pool),
//! and binds an item to a position. Grouping reusable items by kind keeps
//! items of different kinds from ever being mixed up.

use crate::error::Result;

/// A flat list of items, as seen by a host list view.
pub trait ListAdapter {
    /// The item type the host stores and recycles.
    type Item;

    /// Returns the number of items in the list.
    fn item_count(&self) -> usize;

    /// Returns the kind of the item at `position`, or `None` if the
    /// position is outside the list.
    ///
    /// Items of the same kind are interchangeable for reuse.
    fn item_kind(&self, position: usize) -> Option<usize>;

    /// Creates a new item of the given kind.
    ///
    /// Only kinds previously returned by [`item_kind`](Self::item_kind)
    /// are valid; anything else is an error.
    fn create_item(&self, kind: usize) -> Result<Self::Item>;

    /// Binds an item to the data at `position`.
    ///
    /// The item must have been created with the kind reported for
    /// `position`, and `position` must be inside the list.
    fn bind_item(&self, item: &mut Self::Item, position: usize) -> Result<()>;
}
