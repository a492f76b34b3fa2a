//! Column-major grid placement for the answer key

use crate::Point;
use serde::{Deserialize, Serialize};

/// Where one item of a grid lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub position: Point,
    /// The row falls below the page bottom and must not be drawn
    pub clipped: bool,
}

/// Rows needed to fit `item_count` items into `columns` columns
pub fn rows_per_column(item_count: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    item_count.div_ceil(columns)
}

/// Place `item_count` items into a grid, filling each column top to bottom
/// before moving right.
///
/// Items whose row would start below `page_bottom` are marked clipped; the
/// grid never continues onto another page.
pub fn layout(
    item_count: usize,
    columns: usize,
    column_width: f32,
    row_height: f32,
    origin: Point,
    page_bottom: f32,
) -> Vec<GridPlacement> {
    let rows = rows_per_column(item_count, columns);
    if rows == 0 {
        return Vec::new();
    }

    (0..item_count)
        .map(|index| {
            let column = index / rows;
            let row = index % rows;
            let position = Point::new(
                origin.x + column as f32 * column_width,
                origin.y + row as f32 * row_height,
            );
            GridPlacement {
                index,
                column,
                row,
                position,
                clipped: position.y > page_bottom,
            }
        })
        .collect()
}
