use crate::extraction::graph::BlockGraph;
use crate::model::{Block, BlockType, Grid};
use crate::parsing::normalize::normalize;

/// Largest grid a single table may claim. A noisy index past this would
/// otherwise allocate the whole empty area.
const MAX_GRID_CELLS: usize = 100_000;

/// Rebuild every table in a block graph, in document order.
///
/// Tables without any resolvable CELL children are skipped. Cell text is
/// repaired with [`normalize`] once the whole grid is filled.
pub fn extract_tables(graph: &BlockGraph<'_>) -> Vec<Grid> {
    let tables = graph.blocks_of_type(BlockType::Table);
    log::debug!("found {} table block(s)", tables.len());

    tables
        .into_iter()
        .filter_map(|table| {
            let grid = build_grid(graph, table);
            if grid.is_none() {
                log::debug!("table '{}' has no cells, skipping", table.id);
            }
            grid
        })
        .collect()
}

/// Rebuild a single TABLE block into a grid.
///
/// Dimensions come from the largest row and column index among the cells,
/// not from anything the table itself declares. A spanning cell writes its
/// text to every position it covers. When two cells claim the same position
/// the one later in block order wins. A table whose indices claim more than
/// [`MAX_GRID_CELLS`] positions is skipped.
pub fn build_grid(graph: &BlockGraph<'_>, table: &Block) -> Option<Grid> {
    let cells: Vec<(&Block, usize, usize)> = graph
        .children_of(table)
        .into_iter()
        .filter(|b| b.block_type == BlockType::Cell)
        .filter_map(|cell| {
            let row = position(cell.row_index)?;
            let column = position(cell.column_index)?;
            Some((cell, row, column))
        })
        .collect();

    let row_count = cells.iter().map(|(_, r, _)| r + 1).max()?;
    let column_count = cells.iter().map(|(_, _, c)| c + 1).max()?;
    let area = row_count.checked_mul(column_count).unwrap_or(usize::MAX);
    if area > MAX_GRID_CELLS {
        log::warn!(
            "table '{}' claims {}x{} cells, skipping",
            table.id,
            row_count,
            column_count
        );
        return None;
    }
    let mut grid = Grid::new(row_count, column_count);

    for (cell, row, column) in cells {
        let content = cell_content(graph, cell);
        let row_end = (row + cell.rows_spanned() as usize).min(row_count);
        let column_end = (column + cell.columns_spanned() as usize).min(column_count);
        for r in row..row_end {
            for c in column..column_end {
                grid.set(r, c, &content);
            }
        }
    }

    grid.map_cells(normalize);
    Some(grid)
}

/// Text of a cell: its WORD and LINE children joined with single spaces.
fn cell_content(graph: &BlockGraph<'_>, cell: &Block) -> String {
    graph
        .children_of(cell)
        .into_iter()
        .filter(|b| matches!(b.block_type, BlockType::Word | BlockType::Line))
        .filter_map(|b| b.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 1-based service index to 0-based grid index. Zero cannot be placed.
fn position(index: Option<u32>) -> Option<usize> {
    index?.checked_sub(1).map(|i| i as usize)
}
