//! The sectioned adapter: many sub-lists presented as one flat list.
//!
//! `SectionedAdapter<I>` holds an ordered list of sections and translates
//! between the host's global positions and each section's local
//! positions. The section index doubles as the item kind, so the host's
//! per-kind item pools keep every section's items apart.
//!
//! Counts are read from the sections on every call and never cached, so
//! the adapter never needs to be told when a section grows or shrinks. For
//! many lookups against an unchanged list, take a
//! [`SectionLayout`] snapshot with [`SectionedAdapter::layout`].

use std::fmt;

use crate::error::{Error, Result};
use crate::host::ListAdapter;
use crate::layout::SectionLayout;
use crate::logging::targets;
use crate::section::{SectionItem, SectionPosition, SharedSection};

/// A flat list composed of independent sections.
///
/// Section order defines position order: section 0's items come first,
/// then section 1's, and so on. Sections with no items take up no
/// positions. The same section may appear more than once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_lattice_sections::{ListSection, SectionedAdapter, SectionPosition, SharedSection};
///
/// fn section(values: Vec<u32>) -> SharedSection<String> {
///     Arc::new(ListSection::new(values, String::new, |item: &mut String, value: &u32, _| {
///         *item = value.to_string();
///     }))
/// }
///
/// let adapter = SectionedAdapter::new([
///     section(vec![1, 2, 3]),
///     section(vec![]),
///     section(vec![4, 5]),
/// ]);
///
/// assert_eq!(adapter.total_item_count(), 5);
/// assert_eq!(adapter.resolve(3), Some(SectionPosition::new(2, 0)));
/// assert_eq!(adapter.resolve(5), None);
///
/// let kind = adapter.view_kind_of(4).unwrap();
/// let mut item = adapter.create_item(kind).unwrap();
/// adapter.bind_item(&mut item, 4).unwrap();
/// assert_eq!(item.item(), "5");
/// ```
pub struct SectionedAdapter<I> {
    sections: Vec<SharedSection<I>>,
}

impl<I> SectionedAdapter<I> {
    /// Creates an adapter over the given sections, in order.
    pub fn new<S>(sections: S) -> Self
    where
        S: IntoIterator<Item = SharedSection<I>>,
    {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    /// Creates an adapter with no sections.
    ///
    /// An empty adapter is fully functional: it has no items and every
    /// lookup misses.
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Returns a builder for configuring an adapter.
    pub fn builder() -> SectionedAdapterBuilder<I> {
        SectionedAdapterBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Returns the sections in order.
    pub fn sections(&self) -> &[SharedSection<I>] {
        &self.sections
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no sections.
    ///
    /// An adapter whose sections are all empty is not `is_empty()`, but
    /// its [`total_item_count`](Self::total_item_count) is zero.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<&SharedSection<I>> {
        self.sections.get(index)
    }

    /// Appends a section after the existing ones.
    pub fn push_section(&mut self, section: SharedSection<I>) {
        self.sections.push(section);
        tracing::debug!(
            target: targets::STRUCTURE,
            section_count = self.sections.len(),
            "section appended"
        );
    }

    /// Inserts a section at `index`, shifting later sections back.
    ///
    /// Items created before the insert carry kinds that may now name a
    /// different section; the host must drop its item pools afterwards.
    pub fn insert_section(&mut self, index: usize, section: SharedSection<I>) -> Result<()> {
        if index > self.sections.len() {
            return Err(self.structure_violation(index));
        }
        self.sections.insert(index, section);
        tracing::debug!(
            target: targets::STRUCTURE,
            index,
            section_count = self.sections.len(),
            "section inserted"
        );
        Ok(())
    }

    /// Removes and returns the section at `index`.
    ///
    /// The same pool caveat as [`insert_section`](Self::insert_section)
    /// applies.
    pub fn remove_section(&mut self, index: usize) -> Result<SharedSection<I>> {
        if index >= self.sections.len() {
            return Err(self.structure_violation(index));
        }
        let section = self.sections.remove(index);
        tracing::debug!(
            target: targets::STRUCTURE,
            index,
            section_count = self.sections.len(),
            "section removed"
        );
        Ok(section)
    }

    fn structure_violation(&self, index: usize) -> Error {
        let err = Error::section_out_of_bounds(index, self.sections.len());
        tracing::error!(target: targets::STRUCTURE, "{err}");
        err
    }

    // -------------------------------------------------------------------------
    // Position translation
    // -------------------------------------------------------------------------

    /// Returns the total number of items across all sections.
    ///
    /// Recomputed from the sections on every call.
    pub fn total_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.item_count()).sum()
    }

    /// Resolves a global position to its section and local position.
    ///
    /// Returns `None` if `position >= total_item_count()`.
    pub fn resolve(&self, position: usize) -> Option<SectionPosition> {
        if position >= self.total_item_count() {
            return None;
        }

        let mut remaining = position;
        for (section, adapter) in self.sections.iter().enumerate() {
            let count = adapter.item_count();
            if remaining < count {
                return Some(SectionPosition::new(section, remaining));
            }
            remaining -= count;
        }

        // Only reachable if a count shrank while walking.
        None
    }

    /// Returns the index of the section that owns a global position.
    pub fn section_index_of(&self, position: usize) -> Option<usize> {
        self.resolve(position).map(|p| p.section)
    }

    /// Returns the position within its section for a global position.
    pub fn position_in_section(&self, position: usize) -> Option<usize> {
        self.resolve(position).map(|p| p.local)
    }

    /// Returns the section that owns a global position.
    pub fn section_of(&self, position: usize) -> Option<&SharedSection<I>> {
        self.section_index_of(position)
            .and_then(|index| self.sections.get(index))
    }

    /// Returns the item kind for a global position.
    ///
    /// The kind is the owning section's index. Hosts use it to pick the
    /// pool of reusable items a position draws from.
    pub fn view_kind_of(&self, position: usize) -> Option<usize> {
        self.section_index_of(position)
    }

    /// Returns the global position of the first item of `section`.
    ///
    /// Defined for empty sections too: it is where their items would start.
    pub fn section_offset(&self, section: usize) -> Option<usize> {
        if section >= self.sections.len() {
            return None;
        }
        Some(self.sections[..section].iter().map(|s| s.item_count()).sum())
    }

    /// Maps a section-local position back to a global position.
    ///
    /// Returns `None` if the section does not exist or `local` is past its
    /// current end.
    pub fn global_position(&self, section: usize, local: usize) -> Option<usize> {
        let offset = self.section_offset(section)?;
        (local < self.sections[section].item_count()).then(|| offset + local)
    }

    /// Takes a prefix-sum snapshot of the current section counts.
    pub fn layout(&self) -> SectionLayout {
        SectionLayout::from_counts(self.sections.iter().map(|s| s.item_count()))
    }

    // -------------------------------------------------------------------------
    // Item dispatch
    // -------------------------------------------------------------------------

    /// Creates an item of the given kind.
    ///
    /// `kind` must be a section index. The section's factory is called
    /// once and its item is returned unchanged, tagged with `kind`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKind`] if `kind` does not name a section.
    pub fn create_item(&self, kind: usize) -> Result<SectionItem<I>> {
        let section = self.section_for_kind(kind)?;
        tracing::trace!(target: targets::ADAPTER, kind, "creating item");
        Ok(SectionItem::new(kind, section.create_item()))
    }

    /// Binds an item to the data at a global position.
    ///
    /// The local position is resolved afresh; the section that binds is the
    /// one recorded in the item's kind, i.e. the section that created it.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedPosition`] if no section claims `position`, or
    ///   if the item's section has no item at the resolved local position.
    /// - [`Error::InvalidKind`] if the item's kind no longer names a section.
    pub fn bind_item(&self, item: &mut SectionItem<I>, position: usize) -> Result<()> {
        let Some(resolved) = self.resolve(position) else {
            let err = Error::unresolved_position(position, self.total_item_count());
            tracing::error!(target: targets::ADAPTER, "failed to bind item: {err}");
            return Err(err);
        };

        let kind = item.kind();
        let section = self.section_for_kind(kind)?;

        if resolved.section != kind {
            tracing::warn!(
                target: targets::ADAPTER,
                position,
                kind,
                resolved_section = resolved.section,
                "binding item in a section other than the one owning its position"
            );

            // The local position was resolved against another section.
            if resolved.local >= section.item_count() {
                let err = Error::unresolved_position(position, self.total_item_count());
                tracing::error!(
                    target: targets::ADAPTER,
                    kind,
                    local = resolved.local,
                    "failed to bind item: {err}"
                );
                return Err(err);
            }
        }

        tracing::trace!(
            target: targets::ADAPTER,
            position,
            kind,
            local = resolved.local,
            "binding item"
        );
        section.bind_item(item.item_mut(), resolved.local);
        Ok(())
    }

    fn section_for_kind(&self, kind: usize) -> Result<&SharedSection<I>> {
        self.sections.get(kind).ok_or_else(|| {
            let err = Error::invalid_kind(kind, self.sections.len());
            tracing::error!(target: targets::ADAPTER, "{err}");
            err
        })
    }
}

impl<I> Default for SectionedAdapter<I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<I> From<Vec<SharedSection<I>>> for SectionedAdapter<I> {
    fn from(sections: Vec<SharedSection<I>>) -> Self {
        Self { sections }
    }
}

impl<I> From<Option<Vec<SharedSection<I>>>> for SectionedAdapter<I> {
    fn from(sections: Option<Vec<SharedSection<I>>>) -> Self {
        sections.map(Self::from).unwrap_or_default()
    }
}

impl<I> FromIterator<SharedSection<I>> for SectionedAdapter<I> {
    fn from_iter<T: IntoIterator<Item = SharedSection<I>>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<I> fmt::Debug for SectionedAdapter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<usize> = self.sections.iter().map(|s| s.item_count()).collect();
        f.debug_struct("SectionedAdapter")
            .field("section_counts", &counts)
            .finish()
    }
}

impl<I> ListAdapter for SectionedAdapter<I> {
    type Item = SectionItem<I>;

    fn item_count(&self) -> usize {
        self.total_item_count()
    }

    fn item_kind(&self, position: usize) -> Option<usize> {
        self.view_kind_of(position)
    }

    fn create_item(&self, kind: usize) -> Result<Self::Item> {
        SectionedAdapter::create_item(self, kind)
    }

    fn bind_item(&self, item: &mut Self::Item, position: usize) -> Result<()> {
        SectionedAdapter::bind_item(self, item, position)
    }
}

static_assertions::assert_impl_all!(SectionedAdapter<String>: Send, Sync);

/// Builder pattern for creating sectioned adapters.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_lattice_sections::{ListSection, SectionedAdapter};
///
/// let header = Arc::new(ListSection::new(vec!["Inbox"], String::new, |item: &mut String, v: &&str, _| {
///     *item = v.to_string();
/// }));
/// let rows = Arc::new(ListSection::new(vec!["a", "b"], String::new, |item: &mut String, v: &&str, _| {
///     *item = v.to_string();
/// }));
///
/// let adapter = SectionedAdapter::<String>::builder()
///     .section(header)
///     .section(rows)
///     .build();
/// assert_eq!(adapter.section_count(), 2);
/// assert_eq!(adapter.total_item_count(), 3);
/// ```
pub struct SectionedAdapterBuilder<I> {
    sections: Vec<SharedSection<I>>,
}

impl<I> SectionedAdapterBuilder<I> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Appends one section.
    pub fn section(mut self, section: SharedSection<I>) -> Self {
        self.sections.push(section);
        self
    }

    /// Appends several sections, in order.
    pub fn sections<S>(mut self, sections: S) -> Self
    where
        S: IntoIterator<Item = SharedSection<I>>,
    {
        self.sections.extend(sections);
        self
    }

    /// Builds the adapter.
    pub fn build(self) -> SectionedAdapter<I> {
        tracing::debug!(
            target: targets::STRUCTURE,
            section_count = self.sections.len(),
            "sectioned adapter built"
        );
        SectionedAdapter::from(self.sections)
    }
}

impl<I> Default for SectionedAdapterBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionAdapter;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A section whose items are `"<name>:<local>"` strings.
    struct Named {
        name: &'static str,
        count: AtomicUsize,
        created: AtomicUsize,
        bound: Mutex<Vec<usize>>,
    }

    impl Named {
        fn new(name: &'static str, count: usize) -> Arc<Self> {
            Arc::new(Self {
                name,
                count: AtomicUsize::new(count),
                created: AtomicUsize::new(0),
                bound: Mutex::new(Vec::new()),
            })
        }
    }

    impl SectionAdapter<String> for Named {
        fn item_count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }

        fn create_item(&self) -> String {
            self.created.fetch_add(1, Ordering::SeqCst);
            format!("{}:new", self.name)
        }

        fn bind_item(&self, item: &mut String, position: usize) {
            self.bound.lock().push(position);
            *item = format!("{}:{}", self.name, position);
        }
    }

    fn sectioned(sections: &[&Arc<Named>]) -> SectionedAdapter<String> {
        sections
            .iter()
            .map(|s| Arc::clone(*s) as SharedSection<String>)
            .collect()
    }

    #[test]
    fn test_scenario_three_zero_two() {
        let a = Named::new("a", 3);
        let b = Named::new("b", 0);
        let c = Named::new("c", 2);
        let adapter = sectioned(&[&a, &b, &c]);

        assert_eq!(adapter.total_item_count(), 5);
        for p in 0..3 {
            assert_eq!(adapter.resolve(p), Some(SectionPosition::new(0, p)));
        }
        assert_eq!(adapter.resolve(3), Some(SectionPosition::new(2, 0)));
        assert_eq!(adapter.resolve(4), Some(SectionPosition::new(2, 1)));
        assert_eq!(adapter.resolve(5), None);
        assert_eq!(adapter.section_index_of(3), Some(2));
        assert_eq!(adapter.position_in_section(4), Some(1));
    }

    #[test]
    fn test_empty_adapter() {
        let adapter: SectionedAdapter<String> = SectionedAdapter::empty();
        assert!(adapter.is_empty());
        assert_eq!(adapter.total_item_count(), 0);
        assert_eq!(adapter.resolve(0), None);
        assert_eq!(adapter.section_index_of(0), None);
        assert!(adapter.section_of(0).is_none());
        assert_eq!(adapter.section_offset(0), None);
    }

    #[test]
    fn test_from_none_is_empty() {
        let adapter = SectionedAdapter::<String>::from(None);
        assert!(adapter.is_empty());

        let adapter = SectionedAdapter::<String>::from(Some(Vec::new()));
        assert!(adapter.is_empty());
        assert_eq!(adapter.total_item_count(), 0);
    }

    #[test]
    fn test_counts_are_not_cached() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 1);
        let adapter = sectioned(&[&a, &b]);
        assert_eq!(adapter.resolve(1), Some(SectionPosition::new(1, 0)));

        a.count.store(4, Ordering::SeqCst);
        assert_eq!(adapter.total_item_count(), 5);
        assert_eq!(adapter.resolve(1), Some(SectionPosition::new(0, 1)));
        assert_eq!(adapter.resolve(4), Some(SectionPosition::new(1, 0)));
    }

    #[test]
    fn test_section_of() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 2);
        let adapter = sectioned(&[&a, &b]);

        let owner = adapter.section_of(2).unwrap();
        let expected: SharedSection<String> = b.clone();
        assert!(Arc::ptr_eq(owner, &expected));
        assert!(adapter.section_of(3).is_none());
    }

    #[test]
    fn test_offsets_and_global_position() {
        let a = Named::new("a", 3);
        let b = Named::new("b", 0);
        let c = Named::new("c", 2);
        let adapter = sectioned(&[&a, &b, &c]);

        assert_eq!(adapter.section_offset(0), Some(0));
        assert_eq!(adapter.section_offset(1), Some(3));
        assert_eq!(adapter.section_offset(2), Some(3));
        assert_eq!(adapter.section_offset(3), None);

        assert_eq!(adapter.global_position(2, 1), Some(4));
        assert_eq!(adapter.global_position(2, 2), None);
        assert_eq!(adapter.global_position(1, 0), None);
    }

    #[test]
    fn test_global_position_huge_local() {
        let a = Named::new("a", 2);
        let b = Named::new("b", 1);
        let adapter = sectioned(&[&a, &b]);

        assert_eq!(adapter.global_position(1, usize::MAX), None);
        assert_eq!(adapter.global_position(0, usize::MAX), None);
    }

    #[test]
    fn test_create_item_calls_factory_once() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 1);
        let adapter = sectioned(&[&a, &b]);

        let item = adapter.create_item(1).unwrap();
        assert_eq!(item.kind(), 1);
        assert_eq!(item.item(), "b:new");
        assert_eq!(a.created.load(Ordering::SeqCst), 0);
        assert_eq!(b.created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_create_item_invalid_kind() {
        let a = Named::new("a", 1);
        let adapter = sectioned(&[&a]);

        assert_eq!(
            adapter.create_item(1).unwrap_err(),
            Error::InvalidKind {
                kind: 1,
                section_count: 1
            }
        );
        assert_eq!(a.created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bind_item_routes_to_section() {
        let a = Named::new("a", 2);
        let b = Named::new("b", 2);
        let adapter = sectioned(&[&a, &b]);

        let mut item = adapter.create_item(1).unwrap();
        adapter.bind_item(&mut item, 3).unwrap();
        assert_eq!(item.item(), "b:1");
        assert_eq!(*b.bound.lock(), vec![1]);
        assert!(a.bound.lock().is_empty());
    }

    #[test]
    fn test_bind_item_dispatches_by_recorded_kind() {
        let a = Named::new("a", 2);
        let b = Named::new("b", 2);
        let adapter = sectioned(&[&a, &b]);

        // Position 3 belongs to `b`, but the item was created by `a`.
        let mut item = adapter.create_item(0).unwrap();
        adapter.bind_item(&mut item, 3).unwrap();
        assert_eq!(item.item(), "a:1");
        assert!(b.bound.lock().is_empty());
    }

    #[test]
    fn test_bind_item_foreign_kind_past_section_end() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 3);
        let adapter = sectioned(&[&a, &b]);

        // Position 3 is local 2 of `b`; `a` has a single item.
        let mut item = adapter.create_item(0).unwrap();
        assert_eq!(
            adapter.bind_item(&mut item, 3).unwrap_err(),
            Error::unresolved_position(3, 4)
        );
        assert_eq!(item.item(), "a:new");
        assert!(a.bound.lock().is_empty());
        assert!(b.bound.lock().is_empty());
    }

    #[test]
    fn test_bind_item_unresolved_position() {
        let a = Named::new("a", 2);
        let adapter = sectioned(&[&a]);

        let mut item = adapter.create_item(0).unwrap();
        assert_eq!(
            adapter.bind_item(&mut item, 2).unwrap_err(),
            Error::UnresolvedPosition {
                position: 2,
                item_count: 2
            }
        );
        assert_eq!(item.item(), "a:new");
        assert!(a.bound.lock().is_empty());
    }

    #[test]
    fn test_bind_item_stale_kind() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 1);
        let mut adapter = sectioned(&[&a, &b]);

        let mut item = adapter.create_item(1).unwrap();
        adapter.remove_section(1).unwrap();
        assert_eq!(
            adapter.bind_item(&mut item, 0).unwrap_err(),
            Error::invalid_kind(1, 1)
        );
    }

    #[test]
    fn test_structural_edits() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 2);
        let c = Named::new("c", 3);
        let mut adapter = sectioned(&[&a]);

        adapter.push_section(c.clone());
        adapter.insert_section(1, b.clone()).unwrap();
        assert_eq!(adapter.section_count(), 3);
        assert_eq!(adapter.total_item_count(), 6);
        assert_eq!(adapter.resolve(1), Some(SectionPosition::new(1, 0)));

        assert_eq!(
            adapter.insert_section(5, a.clone()).unwrap_err(),
            Error::section_out_of_bounds(5, 3)
        );

        let removed = adapter.remove_section(0).unwrap();
        assert_eq!(removed.item_count(), 1);
        assert_eq!(adapter.resolve(0), Some(SectionPosition::new(0, 0)));
        assert_eq!(
            adapter.remove_section(2).err().unwrap(),
            Error::section_out_of_bounds(2, 2)
        );
    }

    #[test]
    fn test_duplicate_sections() {
        let a = Named::new("a", 2);
        let adapter = sectioned(&[&a, &a]);

        assert_eq!(adapter.total_item_count(), 4);
        assert_eq!(adapter.resolve(2), Some(SectionPosition::new(1, 0)));
    }

    #[test]
    fn test_layout_matches_live_lookups() {
        let a = Named::new("a", 3);
        let b = Named::new("b", 0);
        let c = Named::new("c", 2);
        let adapter = sectioned(&[&a, &b, &c]);
        let layout = adapter.layout();

        assert_eq!(layout.section_count(), adapter.section_count());
        assert_eq!(layout.total_item_count(), adapter.total_item_count());
        for p in 0..=adapter.total_item_count() {
            assert_eq!(layout.resolve(p), adapter.resolve(p));
        }
    }

    #[test]
    fn test_list_adapter_impl() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 1);
        let adapter = sectioned(&[&a, &b]);
        let host: &dyn ListAdapter<Item = SectionItem<String>> = &adapter;

        assert_eq!(host.item_count(), 2);
        assert_eq!(host.item_kind(1), Some(1));
        assert_eq!(host.item_kind(2), None);

        let mut item = host.create_item(1).unwrap();
        host.bind_item(&mut item, 1).unwrap();
        assert_eq!(item.item(), "b:0");
    }

    #[test]
    fn test_builder() {
        let a = Named::new("a", 1);
        let b = Named::new("b", 2);
        let adapter = SectionedAdapter::<String>::builder()
            .section(a.clone())
            .sections([b.clone() as SharedSection<String>, a.clone()])
            .build();

        assert_eq!(adapter.section_count(), 3);
        assert_eq!(adapter.total_item_count(), 4);
    }

    #[test]
    fn test_debug_lists_counts() {
        let a = Named::new("a", 3);
        let adapter = sectioned(&[&a]);
        assert_eq!(
            format!("{adapter:?}"),
            "SectionedAdapter { section_counts: [3] }"
        );
    }
}
