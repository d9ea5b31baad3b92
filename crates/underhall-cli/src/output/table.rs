use std::path::Path;
use underhall_core::model::{Grid, ProcessedDocument};

pub fn print_document(input: &Path, doc: &ProcessedDocument) {
    println!("=== {} ===\n", input.display());
    println!(
        "  Pages: {}   Tables: {}   Dropped rows: {}\n",
        doc.page_count,
        doc.tables.len(),
        doc.skipped_rows.len()
    );

    let plan = &doc.maintenance;
    if plan.is_empty() {
        println!("  No maintenance plan found.");
        return;
    }

    let rows: Vec<[String; 4]> = plan
        .yearly
        .iter()
        .flat_map(|(year, items)| {
            items.iter().map(move |item| {
                [
                    year.clone(),
                    item.category.clone(),
                    item.action.clone(),
                    item.cost.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                ]
            })
        })
        .collect();

    let header = ["Year", "Category", "Action", "Cost"];
    let widths = column_widths(
        std::iter::once(header.map(String::from).to_vec())
            .chain(rows.iter().map(|r| r.to_vec())),
    );

    print_row(&header.map(String::from), &widths);
    println!("  {}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len()));
    for row in &rows {
        print_row(row, &widths);
    }

    println!();
    for year in plan.yearly.keys() {
        println!("  {}: {}", year, plan.cost_for_year(year));
    }
    println!("  Total: {}", plan.total_cost);
    println!("  Categories: {}", plan.categories.iter().cloned().collect::<Vec<_>>().join(", "));
}

/// Print a grid as aligned columns.
pub fn print_grid(grid: &Grid) {
    if grid.is_empty() {
        println!("  (empty)");
        return;
    }
    let widths = column_widths(grid.rows().iter().cloned());
    for row in grid.rows() {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{:<w$}", c, w = w))
        .collect();
    println!("  {}", line.join("  ").trim_end());
}

fn column_widths(rows: impl Iterator<Item = Vec<String>>) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (w, cell) in widths.iter_mut().zip(&row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_count_chars() {
        let widths = column_widths(
            vec![
                vec!["År".to_string(), "x".to_string()],
                vec!["2024".to_string(), "Fönster".to_string()],
            ]
            .into_iter(),
        );
        assert_eq!(widths, vec![4, 7]);
    }
}
