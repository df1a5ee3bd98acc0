//! Abstract document tree.
//!
//! This module defines the intermediate representation that bridges
//! document construction and rendering. It carries logical structure and
//! styling directives only; concrete container formats are the renderers'
//! concern.

mod block;
mod document;
mod style;
mod table;

pub use block::{Alignment, Block, CodeBlock, FieldInstruction, Heading, Paragraph};
pub use document::{Document, Metadata};
pub use style::{
    HeadingStyle, Margins, NumberingLevel, PageBorder, PageSetup, StyleSheet, TableStyle,
};
pub use table::{ColumnOrder, Table, TableCell, TableRow, EMPTY_CELL, FULL_WIDTH_PCT};
