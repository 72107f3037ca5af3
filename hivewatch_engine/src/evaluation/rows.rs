//! Row aggregation

use super::severity::escalate;
use crate::results::{Cell, Row, RowStatus};
use uuid::Uuid;

/// `BLOCK` if any cell is ERROR, else `UNKNOWN` if any is UNKNOWN, else `OK`
pub fn row_status(cells: &[Cell]) -> RowStatus {
    escalate(cells.iter().map(|c| RowStatus::from(c.status)), RowStatus::Ok)
}

pub fn build_row(id: Uuid, label: String, link: Option<String>, cells: Vec<Cell>) -> Row {
    let status = row_status(&cells);
    Row {
        id,
        label,
        link,
        cells,
        status,
    }
}

/// Display order: label, then id
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
}
