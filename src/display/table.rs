//! Shared table rendering

use std::ops::RangeBounds;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Render `rows` as a psql-style table
pub(crate) fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}

/// Same as [`render`], right-aligning the amount columns
pub(crate) fn render_amounts<T, R>(rows: Vec<T>, amounts: R) -> String
where
    T: Tabled,
    R: RangeBounds<usize>,
{
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(amounts), Alignment::right());
    table.to_string()
}
