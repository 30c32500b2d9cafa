//! A ready-made section over a vector of values.
//!
//! `ListSection<T, I>` holds its values behind a lock and delegates item
//! creation and binding to two closures, in the same way `ListModel` uses a
//! data extractor. It is the quickest way to put plain data into a
//! sectioned list.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::logging::targets;
use crate::section::SectionAdapter;

/// Type alias for an item factory function.
pub type ItemFactory<I> = Arc<dyn Fn() -> I + Send + Sync>;

/// Type alias for an item binder function.
///
/// Receives the placeholder, the value at the bound position and the
/// section-local position.
pub type ItemBinder<T, I> = Arc<dyn Fn(&mut I, &T, usize) + Send + Sync>;

/// A section backed by a `Vec<T>`.
///
/// The item count always reflects the current length of the vector, so
/// edits made through [`push`](Self::push), [`remove`](Self::remove) and
/// friends are seen by the next query on the owning adapter.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_lattice_sections::{ListSection, SectionedAdapter, SharedSection};
///
/// let fruit = Arc::new(ListSection::new(
///     vec!["Apple", "Banana"],
///     String::new,
///     |item: &mut String, value: &&str, _position| {
///         item.clear();
///         item.push_str(value);
///     },
/// ));
///
/// let adapter = SectionedAdapter::new([fruit.clone() as SharedSection<String>]);
/// assert_eq!(adapter.total_item_count(), 2);
///
/// fruit.push("Cherry");
/// assert_eq!(adapter.total_item_count(), 3);
/// ```
pub struct ListSection<T, I> {
    items: RwLock<Vec<T>>,
    factory: ItemFactory<I>,
    binder: ItemBinder<T, I>,
}

impl<T: Send + Sync, I> ListSection<T, I> {
    /// Creates a section with the given values, item factory and binder.
    pub fn new<F, B>(items: Vec<T>, factory: F, binder: B) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        B: Fn(&mut I, &T, usize) + Send + Sync + 'static,
    {
        Self {
            items: RwLock::new(items),
            factory: Arc::new(factory),
            binder: Arc::new(binder),
        }
    }

    /// Returns the number of values in the section.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the section has no values.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends a value to the end of the section.
    pub fn push(&self, value: T) {
        self.items.write().push(value);
    }

    /// Inserts a value at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, value: T) {
        self.items.write().insert(index, value);
    }

    /// Removes and returns the value at the specified index.
    ///
    /// Returns `None` if `index >= len()`.
    pub fn remove(&self, index: usize) -> Option<T> {
        let mut items = self.items.write();
        if index < items.len() {
            Some(items.remove(index))
        } else {
            None
        }
    }

    /// Removes all values.
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Replaces all values.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
    }

    /// Returns a read guard over the values.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }
}

impl<T: Send + Sync, I> SectionAdapter<I> for ListSection<T, I> {
    fn item_count(&self) -> usize {
        self.items.read().len()
    }

    fn create_item(&self) -> I {
        (self.factory)()
    }

    fn bind_item(&self, item: &mut I, position: usize) {
        let items = self.items.read();
        // The adapter only gets here if the list shrank mid-call.
        match items.get(position) {
            Some(value) => (self.binder)(item, value, position),
            None => tracing::debug!(
                target: targets::LIST_SECTION,
                position,
                len = items.len(),
                "bind past the end of a list section ignored"
            ),
        }
    }
}

impl<T: fmt::Debug, I> fmt::Debug for ListSection<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSection")
            .field("items", &*self.items.read())
            .finish_non_exhaustive()
    }
}
