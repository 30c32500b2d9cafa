//! Sectioned list adapter for Horizon Lattice.
//!
//! This crate lets a list view that only understands flat, zero-based
//! positions display several independent sub-lists ("sections") one after
//! another. Each section keeps its own data and its own way of creating
//! and filling items; the [`SectionedAdapter`] maps the view's global
//! positions onto them.
//!
//! - **Position translation**: global position to `(section, local)` and
//!   back, computed from live section counts on every call
//! - **Item dispatch**: the section index is the item kind, so items are
//!   only ever created and rebound by the section they belong to
//! - **Batched lookups**: [`SectionLayout`] snapshots the counts once for
//!   logarithmic lookups during a single pass
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lattice_sections::{ListSection, SectionedAdapter, SharedSection};
//!
//! let headers: SharedSection<String> = Arc::new(ListSection::new(
//!     vec!["Favourites"],
//!     String::new,
//!     |item: &mut String, title: &&str, _| *item = format!("== {title} =="),
//! ));
//! let rows: SharedSection<String> = Arc::new(ListSection::new(
//!     vec!["Alice", "Bob"],
//!     String::new,
//!     |item: &mut String, name: &&str, position| *item = format!("{position}. {name}"),
//! ));
//!
//! let adapter = SectionedAdapter::new([headers, rows]);
//! assert_eq!(adapter.total_item_count(), 3);
//!
//! // What a list view does for each visible position:
//! let rendered: Vec<String> = (0..adapter.total_item_count())
//!     .map(|position| {
//!         let kind = adapter.view_kind_of(position).unwrap();
//!         let mut item = adapter.create_item(kind).unwrap();
//!         adapter.bind_item(&mut item, position).unwrap();
//!         item.into_inner()
//!     })
//!     .collect();
//!
//! assert_eq!(rendered, ["== Favourites ==", "0. Alice", "1. Bob"]);
//! ```
//!
//! # Errors
//!
//! Lookups outside the list return `None`. Passing an unknown item kind or
//! binding a position no section claims are host bugs and produce an
//! [`Error`], logged through `tracing` (see [`logging`]).

mod adapter;
mod error;
mod host;
mod layout;
mod list_section;
pub mod logging;
mod section;

pub use adapter::{SectionedAdapter, SectionedAdapterBuilder};
pub use error::{Error, Result};
pub use host::ListAdapter;
pub use layout::SectionLayout;
pub use list_section::{ItemBinder, ItemFactory, ListSection};
pub use section::{SectionAdapter, SectionItem, SectionPosition, SharedSection};
