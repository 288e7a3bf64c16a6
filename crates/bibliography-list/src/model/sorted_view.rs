//! Sorted read-only projection of a model.
//!
//! `SortedView` wraps a source model and presents its rows ordered by
//! display text. The source keeps its own (insertion) order; only the
//! projection is sorted.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use bibliography_list_core::logging::targets;
use bibliography_list_core::ConnectionId;

use super::index::ModelIndex;
use super::role::ItemRole;
use super::traits::{ItemModel, ModelSignals};

/// Direction in which the view orders display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// A before B (default).
    #[default]
    Ascending,
    /// B before A.
    Descending,
}

/// How a [`SortedView`] compares display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOptions {
    /// Sort direction.
    pub order: SortOrder,
    /// Whether "apple" and "Apple" are ordered by case.
    pub case_sensitive: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            order: SortOrder::Ascending,
            case_sensitive: true,
        }
    }
}

impl SortOptions {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let cmp = if self.case_sensitive {
            a.cmp(b)
        } else {
            a.to_lowercase().cmp(&b.to_lowercase())
        };
        match self.order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    }
}

/// Internal row mapping between proxy and source.
#[derive(Default)]
struct RowMapping {
    /// Mapping from proxy row index to source row index.
    proxy_to_source: Vec<usize>,
    /// Mapping from source row index to proxy row index.
    source_to_proxy: Vec<usize>,
}

impl RowMapping {
    fn map_to_source(&self, proxy_row: usize) -> Option<usize> {
        self.proxy_to_source.get(proxy_row).copied()
    }

    fn map_from_source(&self, source_row: usize) -> Option<usize> {
        self.source_to_proxy.get(source_row).copied()
    }
}

/// A read-only projection of a source model sorted by display text.
///
/// The view listens to the source's row and data signals and re-sorts
/// itself on every change, emitting `layout_changed` afterwards. Sorting is
/// stable: rows with equal text keep their insertion order.
///
/// # Example
///
/// ```
/// use bibliography_list::model::{ItemModel, RowStore, SortedView};
/// use bibliography_list::Row;
/// use std::sync::Arc;
///
/// let store = Arc::new(RowStore::new());
/// let view = SortedView::new(store.clone());
///
/// store.push(Row::new("Smith 2020", "book", "{}"));
/// store.push(Row::new("Jones 2019", "article", "{}"));
///
/// assert_eq!(view.display_text(&view.index(0)).as_deref(), Some("Jones 2019"));
/// // The store itself keeps insertion order.
/// assert_eq!(store.display_text(&store.index(0)).as_deref(), Some("Smith 2020"));
/// ```
pub struct SortedView<S: ItemModel + 'static> {
    source: Arc<S>,
    options: RwLock<SortOptions>,
    mapping: RwLock<RowMapping>,
    signals: ModelSignals,
    /// Connections on the source's (rows_inserted, rows_removed, data_changed).
    source_connections: [ConnectionId; 3],
}

impl<S: ItemModel + 'static> SortedView<S> {
    /// Creates an ascending, case-sensitive view over the given source.
    pub fn new(source: Arc<S>) -> Arc<Self> {
        Self::with_options(source, SortOptions::default())
    }

    /// Creates a view over the given source with explicit sort options.
    pub fn with_options(source: Arc<S>, options: SortOptions) -> Arc<Self> {
        let view = Arc::new_cyclic(|weak: &Weak<Self>| {
            let signals = source.signals();

            let w = weak.clone();
            let inserted = signals.rows_inserted.connect(move |_| {
                if let Some(view) = w.upgrade() {
                    view.invalidate();
                }
            });
            let w = weak.clone();
            let removed = signals.rows_removed.connect(move |_| {
                if let Some(view) = w.upgrade() {
                    view.invalidate();
                }
            });
            let w = weak.clone();
            let changed = signals.data_changed.connect(move |_| {
                if let Some(view) = w.upgrade() {
                    view.invalidate();
                }
            });

            Self {
                source: source.clone(),
                options: RwLock::new(options),
                mapping: RwLock::new(RowMapping::default()),
                signals: ModelSignals::new(),
                source_connections: [inserted, removed, changed],
            }
        });
        view.rebuild_mapping();
        view
    }

    /// Returns a reference to the source model.
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Returns the current sort options.
    pub fn options(&self) -> SortOptions {
        *self.options.read()
    }

    /// Changes the sort options and re-sorts.
    pub fn set_options(&self, options: SortOptions) {
        *self.options.write() = options;
        self.invalidate();
    }

    /// Changes the sort direction and re-sorts.
    pub fn set_sort_order(&self, order: SortOrder) {
        self.options.write().order = order;
        self.invalidate();
    }

    /// Forces a rebuild of the mapping and emits `layout_changed`.
    pub fn invalidate(&self) {
        self.rebuild_mapping();
        self.signals.layout_changed.emit(());
    }

    /// Maps a view index to a source index.
    pub fn map_to_source(&self, proxy_index: &ModelIndex) -> ModelIndex {
        if !proxy_index.is_valid() {
            return ModelIndex::invalid();
        }
        match self.mapping.read().map_to_source(proxy_index.row()) {
            Some(row) => ModelIndex::new(row),
            None => ModelIndex::invalid(),
        }
    }

    /// Maps a source index to a view index.
    pub fn map_from_source(&self, source_index: &ModelIndex) -> ModelIndex {
        if !source_index.is_valid() {
            return ModelIndex::invalid();
        }
        match self.mapping.read().map_from_source(source_index.row()) {
            Some(row) => ModelIndex::new(row),
            None => ModelIndex::invalid(),
        }
    }

    /// Returns the display text of every row, in view order.
    pub fn display_texts(&self) -> Vec<String> {
        (0..self.row_count())
            .filter_map(|row| self.display_text(&ModelIndex::new(row)))
            .collect()
    }

    /// Rebuilds the internal mapping from the source's current contents.
    fn rebuild_mapping(&self) {
        let options = *self.options.read();
        let source_count = self.source.row_count();

        let keys: Vec<String> = (0..source_count)
            .map(|row| {
                self.source
                    .data(&ModelIndex::new(row), ItemRole::Display)
                    .unwrap_or_default()
            })
            .collect();

        let mut visible_rows: Vec<usize> = (0..keys.len()).collect();
        // Vec::sort_by is stable, so equal keys keep insertion order.
        visible_rows.sort_by(|&a, &b| options.compare(&keys[a], &keys[b]));

        let mut source_to_proxy = vec![0; keys.len()];
        for (proxy_row, &source_row) in visible_rows.iter().enumerate() {
            source_to_proxy[source_row] = proxy_row;
        }

        tracing::trace!(target: targets::VIEW, rows = visible_rows.len(), "view re-sorted");

        *self.mapping.write() = RowMapping {
            proxy_to_source: visible_rows,
            source_to_proxy,
        };
    }
}

impl<S: ItemModel + 'static> Drop for SortedView<S> {
    fn drop(&mut self) {
        let signals = self.source.signals();
        let [inserted, removed, changed] = self.source_connections;
        signals.rows_inserted.disconnect(inserted);
        signals.rows_removed.disconnect(removed);
        signals.data_changed.disconnect(changed);
    }
}

impl<S: ItemModel + 'static> ItemModel for SortedView<S> {
    fn row_count(&self) -> usize {
        self.mapping.read().proxy_to_source.len()
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<String> {
        let source_index = self.map_to_source(index);
        self.source.data(&source_index, role)
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}
