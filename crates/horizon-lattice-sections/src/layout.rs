//! Prefix-sum snapshot of section sizes.
//!
//! A [`SectionedAdapter`](crate::SectionedAdapter) never caches section
//! counts; each of its lookups walks the sections and reads fresh counts.
//! That is O(sections) per call, which adds up when a host resolves every
//! visible row of a long list in one frame.
//!
//! `SectionLayout` reads every count once and answers lookups from the
//! resulting prefix sums in O(log sections). It is a snapshot held by the
//! caller: once any section's count changes it is stale, and the caller
//! must take a new one.

use crate::section::SectionPosition;

/// Cumulative section boundaries captured at one instant.
///
/// `ends[i]` is the global position one past the last item of section `i`.
/// Zero-count sections have the same end as the section before them and are
/// never returned by a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLayout {
    ends: Vec<usize>,
}

impl SectionLayout {
    /// Builds a layout from explicit section counts.
    pub fn from_counts<C>(counts: C) -> Self
    where
        C: IntoIterator<Item = usize>,
    {
        let mut total = 0usize;
        let ends = counts
            .into_iter()
            .map(|count| {
                total += count;
                total
            })
            .collect();
        Self { ends }
    }

    /// Returns the number of sections captured.
    pub fn section_count(&self) -> usize {
        self.ends.len()
    }

    /// Returns the total number of items across all sections.
    pub fn total_item_count(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Returns the captured item count of a section.
    pub fn item_count(&self, section: usize) -> Option<usize> {
        let end = *self.ends.get(section)?;
        Some(end - self.start_of(section))
    }

    /// Returns the global offset of the first item of `section`.
    pub fn section_offset(&self, section: usize) -> Option<usize> {
        (section < self.ends.len()).then(|| self.start_of(section))
    }

    /// Resolves a global position to its section and local position.
    pub fn resolve(&self, position: usize) -> Option<SectionPosition> {
        if position >= self.total_item_count() {
            return None;
        }

        // First section whose end lies past the position; empty sections
        // share their predecessor's end and are skipped.
        let section = self.ends.partition_point(|&end| end <= position);
        let local = position - self.start_of(section);
        Some(SectionPosition::new(section, local))
    }

    /// Returns the index of the section that owns a global position.
    pub fn section_index_of(&self, position: usize) -> Option<usize> {
        self.resolve(position).map(|p| p.section)
    }

    /// Maps a section-local position back to a global position.
    pub fn global_position(&self, section: usize, local: usize) -> Option<usize> {
        let start = self.section_offset(section)?;
        start
            .checked_add(local)
            .filter(|&global| global < self.ends[section])
    }

    fn start_of(&self, section: usize) -> usize {
        if section == 0 {
            0
        } else {
            self.ends[section - 1]
        }
    }
}
