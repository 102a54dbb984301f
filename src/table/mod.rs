//! The transaction table engine.
//!
//! The table turns the loaded transaction records and the user's controls
//! into the rows to display:
//! - `derive_rows` pairs each record with its formatted amount,
//! - `filter_rows` applies the column filters and the free-text search,
//! - `sort_rows` orders the filtered rows,
//! - `paginate` picks the rows on the current page,
//! - `build_facets` lists the filter options for the loaded data,
//! - `export_csv` writes every filtered row as CSV.
//!
//! [render] runs the whole pipeline as a pure function and [TransactionTable]
//! holds the control state for one table.

mod columns;
mod export;
mod facets;
mod filter;
mod pagination;
mod sort;

pub use columns::{COLUMNS, Column, find_column};
pub use export::{EXPORT_HEADERS, export_csv, write_csv};
pub use facets::{FacetOption, Facets, build_facets};
pub use filter::{FilterState, filter_rows};
pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_LINKS, PageLink, PageState, page_count, page_links, paginate,
};
pub use sort::{SortDirection, SortKey, SortState, sort_rows};

use crate::{
    Error,
    transaction::{DerivedRow, TransactionRecord},
};

/// Derive the display rows for `records` in the currency `currency`.
pub fn derive_rows<'a>(records: &'a [TransactionRecord], currency: &str) -> Vec<DerivedRow<'a>> {
    records
        .iter()
        .map(|record| DerivedRow::new(record, currency))
        .collect()
}

/// The control state of one transaction table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// The column filters and search text.
    pub filter: FilterState,
    /// The sort keys.
    pub sort: SortState,
    /// The current page.
    pub page: PageState,
}

/// Everything needed to display one page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// The filtered and sorted rows on the current page.
    pub visible_rows: Vec<DerivedRow<'a>>,
    /// The filter options for the loaded data.
    pub facets: Facets,
    /// The number of pages, at least one.
    pub page_count: usize,
    /// The index of the page being shown.
    pub page_index: usize,
    /// The number of rows that passed the filters.
    pub filtered_count: usize,
    /// The number of loaded rows.
    pub total_count: usize,
    /// The page navigation.
    pub page_links: Vec<PageLink>,
}

/// Compute the table for `records` under `state`.
///
/// The result only depends on the arguments, so calling this again with the
/// same input gives the same view.
pub fn render<'a>(
    records: &'a [TransactionRecord],
    state: &TableState,
    currency: &str,
) -> TableView<'a> {
    let rows = derive_rows(records, currency);
    let mut filtered = filter_rows(&rows, &state.filter);
    sort_rows(&mut filtered, &state.sort);

    let page_count = page_count(filtered.len(), state.page.page_size());
    let page_index = state.page.page_index();

    TableView {
        visible_rows: paginate(&filtered, state.page).to_vec(),
        facets: build_facets(records),
        page_count,
        page_index,
        filtered_count: filtered.len(),
        total_count: records.len(),
        page_links: page_links(page_index, page_count, MAX_PAGE_LINKS),
    }
}

/// The state behind one transaction table and the actions a user can take on it.
///
/// A new table has no filters, no sort and shows the first page. Actions that
/// change the filters do not move the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    state: TableState,
}

impl TransactionTable {
    /// A table with no filters or sort, showing the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current control state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Set the free-text search.
    pub fn set_search(&mut self, search: &str) {
        self.state.filter.set_global(search);
    }

    /// Accept only rows whose `column` value is one of `values`.
    pub fn set_column_filter<I, S>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.filter.set_column_filter(column, values);
    }

    /// Select or deselect `value` in the filter for `column`.
    pub fn toggle_filter_value(&mut self, column: &str, value: &str) {
        self.state.filter.toggle_value(column, value);
    }

    /// Remove the filter on `column`.
    pub fn clear_column_filter(&mut self, column: &str) {
        self.state.filter.clear_column(column);
    }

    /// Remove all column filters and the search text.
    pub fn clear_filters(&mut self) {
        self.state.filter.clear();
    }

    /// Sort by a single column.
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) {
        self.state.sort = SortState::by(column, direction);
    }

    /// Replace the sort keys.
    pub fn set_sort(&mut self, sort: SortState) {
        self.state.sort = sort;
    }

    /// Cycle the sort on `column`, as clicking its header would.
    pub fn toggle_sort(&mut self, column: &str) {
        self.state.sort.toggle(column);
    }

    /// Go to the next page of `records`, if there is one.
    pub fn next_page(&mut self, records: &[TransactionRecord], currency: &str) {
        let page_count = self.page_count(records, currency);
        self.state.page.next(page_count);
    }

    /// Go to the previous page, if there is one.
    pub fn previous_page(&mut self) {
        self.state.page.previous();
    }

    /// Go to the first page.
    pub fn first_page(&mut self) {
        self.state.page.first();
    }

    /// Go to the last page of `records`.
    pub fn last_page(&mut self, records: &[TransactionRecord], currency: &str) {
        let page_count = self.page_count(records, currency);
        self.state.page.last(page_count);
    }

    /// Go to `page_index`, clamped to the pages of `records`.
    pub fn go_to_page(&mut self, page_index: usize, records: &[TransactionRecord], currency: &str) {
        let page_count = self.page_count(records, currency);
        self.state.page.go_to(page_index, page_count);
    }

    /// Compute the table for `records`.
    pub fn render<'a>(&self, records: &'a [TransactionRecord], currency: &str) -> TableView<'a> {
        render(records, &self.state, currency)
    }

    /// Export every row of `records` that passes the current filters as CSV,
    /// in filtered order.
    ///
    /// # Errors
    /// Returns [Error::Csv] if the document could not be written.
    pub fn export_csv(
        &self,
        records: &[TransactionRecord],
        currency: &str,
    ) -> Result<String, Error> {
        let rows = derive_rows(records, currency);
        let filtered = filter_rows(&rows, &self.state.filter);

        tracing::debug!("exporting {} of {} transactions", filtered.len(), rows.len());

        export_csv(&filtered)
    }

    fn page_count(&self, records: &[TransactionRecord], currency: &str) -> usize {
        let rows = derive_rows(records, currency);
        let filtered_count = rows
            .iter()
            .filter(|row| self.state.filter.matches(row))
            .count();

        page_count(filtered_count, self.state.page.page_size())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        test_utils::{record, ten_records},
        transaction::{DerivedRow, TransactionRecord, TransactionType},
    };

    use super::{PageLink, SortDirection, TableState, TransactionTable, render};

    fn ids(rows: &[DerivedRow<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.record.id.clone()).collect()
    }

    #[test]
    fn renders_first_page_of_ten_rows() {
        let records = ten_records();

        let got = render(&records, &TableState::default(), "USD");

        assert_eq!(got.page_count, 2);
        assert_eq!(got.page_index, 0);
        assert_eq!(got.total_count, 10);
        assert_eq!(got.filtered_count, 10);
        assert_eq!(
            ids(&got.visible_rows),
            ["1", "2", "3", "4", "5", "6", "7", "8"]
        );
        assert_eq!(
            got.page_links,
            [PageLink::Current(0), PageLink::Page(1), PageLink::Next(1)]
        );
    }

    #[test]
    fn second_page_shows_remaining_rows() {
        let records = ten_records();
        let mut table = TransactionTable::new();

        table.next_page(&records, "USD");
        let got = table.render(&records, "USD");

        assert_eq!(ids(&got.visible_rows), ["9", "10"]);
    }

    #[test]
    fn empty_data_renders_one_empty_page() {
        let records: Vec<TransactionRecord> = Vec::new();

        let got = render(&records, &TableState::default(), "USD");

        assert!(got.visible_rows.is_empty());
        assert!(got.facets.categories.is_empty());
        assert_eq!(got.facets.types.len(), 2);
        assert_eq!(got.page_count, 1);
        assert_eq!(got.page_links, [PageLink::Current(0)]);
    }

    #[test]
    fn facets_ignore_filters() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.set_column_filter("type", ["income"]);

        let got = table.render(&records, "USD");

        assert_eq!(ids(&got.visible_rows), ["2", "5", "7", "9"]);
        assert_eq!(got.facets.types.len(), 2);
        assert_eq!(got.facets.categories.len(), 5);
    }

    #[test]
    fn filters_then_sorts_then_pages() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.set_column_filter("type", ["expense"]);
        table.sort_by("amount", SortDirection::Descending);

        let got = table.render(&records, "USD");

        assert_eq!(got.filtered_count, 6);
        assert_eq!(got.page_count, 1);
        assert_eq!(ids(&got.visible_rows), ["3", "10", "1", "6", "4", "8"]);
    }

    #[test]
    fn narrowing_filters_keeps_page_index() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.last_page(&records, "USD");

        table.set_search("rent");
        let got = table.render(&records, "USD");

        assert_eq!(got.page_index, 1);
        assert_eq!(got.page_count, 1);
        assert_eq!(got.filtered_count, 1);
        assert!(got.visible_rows.is_empty());
    }

    #[test]
    fn page_navigation_is_clamped_to_filtered_rows() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.set_column_filter("type", ["income"]);

        table.next_page(&records, "USD");
        table.go_to_page(5, &records, "USD");

        assert_eq!(table.state().page.page_index(), 0);

        table.previous_page();
        assert_eq!(table.state().page.page_index(), 0);
    }

    #[test]
    fn export_includes_all_filtered_rows_in_filtered_order() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.set_column_filter("category", ["Groceries"]);
        table.sort_by("amount", SortDirection::Ascending);

        let got = table.export_csv(&records, "USD").unwrap();

        let descriptions = got
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(descriptions, ["Weekly shop", "Corner store", "Weekly shop"]);
    }

    #[test]
    fn clear_filters_restores_all_rows() {
        let records = vec![
            record("1", TransactionType::Expense, "Rent", 1.0),
            record("2", TransactionType::Income, "Salary", 2.0),
        ];
        let mut table = TransactionTable::new();
        table.toggle_filter_value("type", "income");
        table.set_search("salary");
        assert_eq!(table.render(&records, "USD").filtered_count, 1);

        table.clear_filters();

        assert_eq!(table.render(&records, "USD").filtered_count, 2);
    }

    #[test]
    fn render_is_repeatable() {
        let records = ten_records();
        let mut table = TransactionTable::new();
        table.set_search("bus");
        table.toggle_sort("date");

        assert_eq!(table.render(&records, "USD"), table.render(&records, "USD"));
    }
}
