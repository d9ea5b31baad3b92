use crate::model::{Grid, MaintenanceItem, MaintenanceRecord, SkippedRow};
use crate::parsing::header::{classify, infer_roles_from_content, is_maintenance_table, RoleColumns};
use crate::parsing::values::{extract_year, parse_cost};
use crate::profiles::schema::KeywordProfile;

/// Build a maintenance record from reconstructed grids.
pub fn aggregate(grids: &[Grid], profile: &KeywordProfile) -> MaintenanceRecord {
    aggregate_with_diagnostics(grids, profile).0
}

/// Build a maintenance record and report the data rows that were dropped.
///
/// Grids that do not look like maintenance tables are ignored. Within a
/// maintenance grid every data row needs a 20xx year in its year column;
/// rows without one cannot be bucketed and are dropped. A missing or
/// unparseable cost keeps the row with `cost: None` and adds nothing to the
/// total; so does a cost that would overflow the running total.
pub fn aggregate_with_diagnostics(
    grids: &[Grid],
    profile: &KeywordProfile,
) -> (MaintenanceRecord, Vec<SkippedRow>) {
    let mut record = MaintenanceRecord::default();
    let mut skipped = Vec::new();

    for (table_index, grid) in grids.iter().enumerate() {
        let classification = classify(grid, profile);
        if !is_maintenance_table(grid, &classification, profile) {
            log::debug!("table {} is not a maintenance table", table_index + 1);
            continue;
        }

        let data_start = classification.data_start();
        let columns = if classification.header_present {
            classification.columns
        } else {
            infer_roles_from_content(grid, data_start, profile)
        };
        log::debug!("table {}: columns {:?}", table_index + 1, columns);

        for (row_index, row) in grid.rows().iter().enumerate().skip(data_start) {
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }

            match row_item(row, &columns, profile) {
                Ok((year, mut item)) => {
                    if let Some(cost) = item.cost {
                        match record.total_cost.checked_add(cost) {
                            Some(total) => record.total_cost = total,
                            None => {
                                log::warn!(
                                    "table {} row {}: cost {} overflows the total, dropping it",
                                    table_index + 1,
                                    row_index + 1,
                                    cost
                                );
                                item.cost = None;
                            }
                        }
                    }
                    record.categories.insert(item.category.clone());
                    record.yearly.entry(year).or_default().push(item);
                }
                Err(reason) => {
                    log::debug!("table {} row {}: {}", table_index + 1, row_index + 1, reason);
                    skipped.push(SkippedRow {
                        table_index,
                        row_index,
                        reason,
                    });
                }
            }
        }
    }

    if !skipped.is_empty() {
        log::warn!("{} row(s) dropped without a plan year", skipped.len());
    }

    (record, skipped)
}

fn row_item(
    row: &[String],
    columns: &RoleColumns,
    profile: &KeywordProfile,
) -> Result<(String, MaintenanceItem), String> {
    let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).map(|s| s.trim());

    let year_cell = cell(columns.year).ok_or_else(|| "no year column".to_string())?;
    let year =
        extract_year(year_cell).ok_or_else(|| format!("no 20xx year in '{year_cell}'"))?;

    let category = cell(columns.category)
        .filter(|s| !s.is_empty())
        .unwrap_or(profile.default_category.as_str())
        .to_string();
    let action = cell(columns.action).unwrap_or_default().to_string();
    let cost = cell(columns.cost).and_then(parse_cost);

    Ok((
        year,
        MaintenanceItem {
            category,
            action,
            cost,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn sv() -> KeywordProfile {
        load_preset("sv").unwrap()
    }

    #[test]
    fn test_year_and_cost_parsed() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Kategori", "Åtgärd", "Pris"],
            vec!["2024 planerat", "Tak", "byte", "15 000 kr"],
        ]);
        let record = aggregate(&[grid], &sv());
        let items = &record.yearly["2024"];
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].cost, Some(dec!(15000)));
        assert_eq!(items[0].category, "Tak");
        assert_eq!(items[0].action, "byte");
        assert_eq!(record.total_cost, dec!(15000));
    }

    #[test]
    fn test_row_without_year_dropped() {
        let rows = vec![
            vec!["År", "Kategori", "Åtgärd", "Pris"],
            vec!["2024", "Tak", "Byte", "100 kr"],
            vec!["löpande", "Mark", "Sopning", "50 kr"],
        ];
        let with = Grid::from_rows(rows.clone());
        let without = Grid::from_rows(rows[..2].to_vec());

        let (full, skipped) = aggregate_with_diagnostics(&[with], &sv());
        let reduced = aggregate(&[without], &sv());

        assert_eq!(full.item_count(), 1);
        assert_eq!(full.item_count(), reduced.item_count());
        assert_eq!(full.total_cost, reduced.total_cost);
        assert!(!full.categories.contains("Mark"));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].row_index, 2);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Kategori", "Åtgärd", "Pris"],
            vec!["2023", "Tak", "Inspektion", "5000 kr"],
            vec!["2025", "Fönster", "Byte", "abc"],
        ]);
        let record = aggregate(&[grid], &sv());

        assert_eq!(record.yearly.len(), 2);
        assert_eq!(
            record.yearly["2023"],
            vec![MaintenanceItem {
                category: "Tak".into(),
                action: "Inspektion".into(),
                cost: Some(dec!(5000)),
            }]
        );
        assert_eq!(
            record.yearly["2025"],
            vec![MaintenanceItem {
                category: "Fönster".into(),
                action: "Byte".into(),
                cost: None,
            }]
        );
        assert_eq!(
            record.categories.iter().collect::<Vec<_>>(),
            vec!["Fönster", "Tak"]
        );
        assert_eq!(record.total_cost, dec!(5000));
    }

    #[test]
    fn test_missing_category_column_uses_default() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Kostnad"],
            vec!["2027", "Relining", "1 200 000"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.yearly["2027"][0].category, "Uncategorized");
        assert!(record.categories.contains("Uncategorized"));
    }

    #[test]
    fn test_empty_category_cell_uses_default() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Kategori", "Pris"],
            vec!["2027", " ", "10"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.yearly["2027"][0].category, "Uncategorized");
        assert_eq!(record.yearly["2027"][0].action, "");
    }

    #[test]
    fn test_no_cost_column() {
        let grid = Grid::from_rows(vec![vec!["År", "Åtgärd"], vec!["2030", "Stambyte"]]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.yearly["2030"][0].cost, None);
        assert_eq!(record.total_cost, dec!(0));
    }

    #[test]
    fn test_zero_cost_distinct_from_absent() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Pris"],
            vec!["2024", "Besiktning", "0 kr"],
            vec!["2024", "Städning", ""],
        ]);
        let record = aggregate(&[grid], &sv());
        let items = &record.yearly["2024"];
        assert_eq!(items[0].cost, Some(dec!(0)));
        assert_eq!(items[1].cost, None);
    }

    #[test]
    fn test_non_maintenance_grid_ignored() {
        let contacts = Grid::from_rows(vec![vec!["Namn", "Telefon"], vec!["Anna", "070-1234567"]]);
        let record = aggregate(&[contacts], &sv());
        assert!(record.is_empty());
        assert_eq!(record.total_cost, dec!(0));
    }

    #[test]
    fn test_headerless_grid_probed() {
        let grid = Grid::from_rows(vec![
            vec!["Tak", "2024", "15 000 kr"],
            vec!["Fasad", "2026", "80 000 kr"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.item_count(), 2);
        assert_eq!(record.yearly["2026"][0].cost, Some(dec!(80000)));
        assert_eq!(record.yearly["2026"][0].category, "Uncategorized");
        assert_eq!(record.total_cost, dec!(95000));
    }

    #[test]
    fn test_order_across_grids() {
        let a = Grid::from_rows(vec![vec!["År", "Åtgärd"], vec!["2024", "först"]]);
        let b = Grid::from_rows(vec![
            vec!["År", "Åtgärd"],
            vec!["2024", "sedan"],
            vec!["2024", "sist"],
        ]);
        let record = aggregate(&[a, b], &sv());
        let actions: Vec<_> = record.yearly["2024"].iter().map(|i| i.action.as_str()).collect();
        assert_eq!(actions, vec!["först", "sedan", "sist"]);
    }

    #[test]
    fn test_blank_rows_skipped_silently() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd"],
            vec!["", ""],
            vec!["2024", "Byte"],
        ]);
        let (record, skipped) = aggregate_with_diagnostics(&[grid], &sv());
        assert_eq!(record.item_count(), 1);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_cost_for_year() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Pris"],
            vec!["2024", "a", "100"],
            vec!["2024", "b", "50,5"],
            vec!["2025", "c", "1"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.cost_for_year("2024"), dec!(150.5));
        assert_eq!(record.cost_for_year("2099"), dec!(0));
    }

    #[test]
    fn test_overflowing_cost_dropped() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Pris"],
            vec!["2024", "a", "70000000000000000000000000000 kr"],
            vec!["2024", "b", "70000000000000000000000000000 kr"],
            vec!["2025", "c", "100 kr"],
        ]);
        let record = aggregate(&[grid], &sv());
        let items = &record.yearly["2024"];
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cost, Some(dec!(70000000000000000000000000000)));
        assert_eq!(items[1].cost, None);
        assert_eq!(record.yearly["2025"][0].cost, Some(dec!(100)));
        assert_eq!(record.total_cost, dec!(70000000000000000000000000100));
        assert_eq!(record.cost_for_year("2024"), dec!(70000000000000000000000000000));
    }

    #[test]
    fn test_cost_beyond_decimal_range_absent() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Pris"],
            vec!["2024", "a", "792281625142643375935439503350 kr"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.item_count(), 1);
        assert_eq!(record.yearly["2024"][0].cost, None);
        assert_eq!(record.total_cost, dec!(0));
    }

    #[test]
    fn test_abbreviation_period_kept_in_cost() {
        let grid = Grid::from_rows(vec![
            vec!["År", "Åtgärd", "Pris"],
            vec!["2024", "Målning", "ca. 5000"],
        ]);
        let record = aggregate(&[grid], &sv());
        assert_eq!(record.yearly["2024"][0].cost, Some(dec!(0.5)));
    }
}
