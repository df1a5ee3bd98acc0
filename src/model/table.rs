//! Table types.

use serde::{Deserialize, Serialize};

use super::{Alignment, TableStyle};

/// Placeholder text for absent cell values.
pub const EMPTY_CELL: &str = "-";

/// Full table width in fiftieths of a percent.
pub const FULL_WIDTH_PCT: u32 = 5000;

/// Column emission order of a table.
///
/// `Natural` tables are listed in reading order and emitted reversed when
/// the layout is right-to-left. `PreReversed` tables are already listed in
/// the right-to-left convention (field name last) and are never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    /// Reverse under right-to-left
    Natural,
    /// Never reverse
    PreReversed,
}

impl ColumnOrder {
    /// Whether columns are reversed for the given direction.
    pub fn reverses(self, right_to_left: bool) -> bool {
        self == ColumnOrder::Natural && right_to_left
    }
}

/// A rectangular table whose first row is the header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in emission order, header first
    pub rows: Vec<TableRow>,

    /// Per-column width in fiftieths of a percent
    pub column_widths: Vec<u32>,

    /// Table alignment on the page
    pub alignment: Alignment,

    /// Whether cells are laid out right-to-left
    pub right_to_left: bool,

    /// Whether columns were reversed from their listed order
    pub reversed: bool,

    /// Header and border styling
    pub style: TableStyle,
}

impl Table {
    /// Build a table from a header and body rows.
    ///
    /// Body rows are padded with `-` (or truncated) to the header width,
    /// then every row is reversed if `order` calls for it.
    pub fn new(
        header: Vec<String>,
        body: Vec<Vec<String>>,
        order: ColumnOrder,
        right_to_left: bool,
        style: TableStyle,
    ) -> Self {
        let width = header.len().max(1);
        let reversed = order.reverses(right_to_left);
        let alignment = Alignment::for_direction(right_to_left);

        let arrange = |mut cells: Vec<String>| {
            cells.resize(width, EMPTY_CELL.to_string());
            if reversed {
                cells.reverse();
            }
            cells
        };

        let mut rows = Vec::with_capacity(body.len() + 1);
        rows.push(TableRow::header(arrange(header), alignment));
        rows.extend(
            body.into_iter()
                .map(|cells| TableRow::new(arrange(cells), alignment)),
        );

        Self {
            rows,
            column_widths: vec![FULL_WIDTH_PCT / width as u32; width],
            alignment,
            right_to_left,
            reversed,
            style,
        }
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Check that every row has the header's column count.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == width)
    }

    /// Row texts in emission order.
    pub fn texts(&self) -> Vec<Vec<&str>> {
        self.rows.iter().map(TableRow::texts).collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is the header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a body row from cell texts.
    pub fn new(cells: Vec<String>, alignment: Alignment) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|text| TableCell { text, alignment })
                .collect(),
            is_header: false,
        }
    }

    /// Create a header row from cell texts.
    pub fn header(cells: Vec<String>, alignment: Alignment) -> Self {
        Self {
            is_header: true,
            ..Self::new(cells, alignment)
        }
    }

    /// Cell texts.
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.texts().join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,

    /// Alignment of the cell paragraph
    pub alignment: Alignment,
}
