use std::cmp::Ordering;

use crate::analysis::classifier::ColumnRoles;
use crate::data::model::{Dataset, FieldValue};

// ---------------------------------------------------------------------------
// Table view query: search → sort → page, as a pure function
// ---------------------------------------------------------------------------

/// Fixed page size of the equipment table.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The table's UI state.  It never feeds back into the statistics pipeline;
/// the visible slice is recomputed from the dataset on every change.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    /// Case-insensitive substring matched against the name and type columns.
    pub search: String,
    /// Column to sort by; `None` keeps upload order.
    pub sort_column: Option<String>,
    pub direction: SortDirection,
    /// Zero-based page into the filtered and sorted records.
    pub page: usize,
}

impl TableQuery {
    /// Clicking a column header: same column flips direction, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        if self.sort_column.as_deref() == Some(column) {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_column = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    /// Changing the search text jumps back to the first page.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 0;
    }
}

/// Indices of records matching the search, in sort order.
///
/// String cells compare lexicographically, numeric cells numerically;
/// missing cells sort first.  The sort is stable, so equal keys keep their
/// upload order.
pub fn filtered_sorted_indices(
    dataset: &Dataset,
    roles: &ColumnRoles,
    query: &TableQuery,
) -> Vec<usize> {
    let needle = query.search.trim().to_lowercase();

    let mut indices: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if needle.is_empty() {
                return true;
            }
            let mut haystacks = vec![rec.text(&roles.name_column)];
            if let Some(type_col) = &roles.type_column {
                haystacks.push(rec.text(type_col));
            }
            haystacks
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(column) = &query.sort_column {
        indices.sort_by(|&a, &b| {
            let ordering = compare_cells(
                dataset.records[a].get(column),
                dataset.records[b].get(column),
            );
            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    indices
}

/// The record indices of one table page.
pub fn visible_page(dataset: &Dataset, roles: &ColumnRoles, query: &TableQuery) -> Vec<usize> {
    filtered_sorted_indices(dataset, roles, query)
        .into_iter()
        .skip(query.page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect()
}

/// Number of pages needed for `matching` records.
pub fn page_count(matching: usize) -> usize {
    matching.div_ceil(PAGE_SIZE)
}

fn compare_cells(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x.as_f64(), y.as_f64()) {
            // Numeric columns compare by value even when integers and
            // floats are mixed.
            (Some(fx), Some(fy)) => fx.total_cmp(&fy),
            _ => x.cmp(y),
        },
    }
}
