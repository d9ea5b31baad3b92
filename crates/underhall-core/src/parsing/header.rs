use crate::model::{ClassifiedColumn, ColumnRole, Grid};
use crate::parsing::values::{contains_year, parse_cost};
use crate::profiles::schema::{KeywordProfile, RoleKeywords};
use serde::{Deserialize, Serialize};

/// Column index per role. `None` means the role was not found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleColumns {
    pub year: Option<usize>,
    pub category: Option<usize>,
    pub action: Option<usize>,
    pub cost: Option<usize>,
}

impl RoleColumns {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Year => self.year,
            ColumnRole::Category => self.category,
            ColumnRole::Action => self.action,
            ColumnRole::Cost => self.cost,
            ColumnRole::Unknown => None,
        }
    }

    fn set(&mut self, role: ColumnRole, index: usize) {
        match role {
            ColumnRole::Year => self.year = Some(index),
            ColumnRole::Category => self.category = Some(index),
            ColumnRole::Action => self.action = Some(index),
            ColumnRole::Cost => self.cost = Some(index),
            ColumnRole::Unknown => {}
        }
    }

    /// Role assigned to a column, `Unknown` if none.
    pub fn role_of(&self, index: usize) -> ColumnRole {
        RoleKeywords::ORDER
            .into_iter()
            .find(|&role| self.get(role) == Some(index))
            .unwrap_or(ColumnRole::Unknown)
    }

    fn is_assigned(&self, index: usize) -> bool {
        self.role_of(index) != ColumnRole::Unknown
    }
}

/// Result of classifying one grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub header_present: bool,
    pub columns: RoleColumns,
}

impl Classification {
    /// Index of the first data row.
    pub fn data_start(&self) -> usize {
        usize::from(self.header_present)
    }

    /// Every column of a grid of the given width, tagged with its role.
    pub fn classified_columns(&self, width: usize) -> Vec<ClassifiedColumn> {
        (0..width)
            .map(|index| ClassifiedColumn {
                index,
                role: self.columns.role_of(index),
            })
            .collect()
    }
}

/// Whether the first row of a grid is a header row.
///
/// A single-row grid never has a header.
pub fn detect_header(grid: &Grid, profile: &KeywordProfile) -> bool {
    if grid.row_count() <= 1 {
        return false;
    }
    let first = grid.row(0).map(joined_lower).unwrap_or_default();
    contains_any(&first, &profile.header_keywords)
}

/// Guess which column plays which role from the header row.
///
/// Roles are resolved in the order year, category, action, cost. Each takes
/// the leftmost column whose header contains one of its keywords and has not
/// been claimed by an earlier role. Without a header every role is unknown.
pub fn classify(grid: &Grid, profile: &KeywordProfile) -> Classification {
    let header_present = detect_header(grid, profile);
    let mut columns = RoleColumns::default();

    if let (true, Some(header)) = (header_present, grid.row(0)) {
        let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
        for role in RoleKeywords::ORDER {
            let keywords = profile.roles.for_role(role);
            let found = lowered
                .iter()
                .enumerate()
                .find(|(i, text)| !columns.is_assigned(*i) && contains_any(text, keywords))
                .map(|(i, _)| i);
            if let Some(index) = found {
                columns.set(role, index);
            }
        }
    }

    Classification {
        header_present,
        columns,
    }
}

/// Infer year and cost columns from sampled data cells.
///
/// Used for grids without a header, where column names give no signal.
/// The year column is the first with a 19xx/20xx token; the cost column is
/// the first other column holding a currency marker next to a number.
pub fn infer_roles_from_content(
    grid: &Grid,
    data_start: usize,
    profile: &KeywordProfile,
) -> RoleColumns {
    let sample = sample_rows(grid, data_start, profile.sample_rows);
    let mut columns = RoleColumns::default();

    columns.year = (0..grid.column_count())
        .find(|&c| sample.iter().any(|row| row.get(c).is_some_and(|v| contains_year(v))));

    columns.cost = (0..grid.column_count())
        .filter(|&c| Some(c) != columns.year)
        .find(|&c| {
            sample.iter().any(|row| {
                row.get(c).is_some_and(|v| {
                    contains_any(&v.to_lowercase(), &profile.cost_markers)
                        && parse_cost(v).is_some()
                })
            })
        });

    columns
}

/// Whether a classified grid looks like a maintenance schedule.
///
/// True when the header mentions any maintenance keyword, or when the grid
/// has both a year-like column and a cost-like column. The second test looks
/// at header text and sampled cell values, since headers are often missing
/// or garbled by OCR.
pub fn is_maintenance_table(
    grid: &Grid,
    classification: &Classification,
    profile: &KeywordProfile,
) -> bool {
    let header = if classification.header_present {
        grid.row(0)
    } else {
        None
    };

    if let Some(header) = header {
        if contains_any(&joined_lower(header), &profile.maintenance_keywords) {
            return true;
        }
    }

    let lowered_header: Vec<String> = header
        .map(|h| h.iter().map(|c| c.to_lowercase()).collect())
        .unwrap_or_default();
    let sample = sample_rows(grid, classification.data_start(), profile.sample_rows);

    let year_like = lowered_header
        .iter()
        .any(|h| contains_any(h, &profile.roles.year) || contains_year(h))
        || sample.iter().flat_map(|r| r.iter()).any(|v| contains_year(v));

    let cost_like = lowered_header
        .iter()
        .any(|h| contains_any(h, &profile.cost_markers))
        || sample
            .iter()
            .flat_map(|r| r.iter())
            .any(|v| contains_any(&v.to_lowercase(), &profile.cost_markers));

    year_like && cost_like
}

fn sample_rows(grid: &Grid, start: usize, count: usize) -> &[Vec<String>] {
    let rows = grid.rows();
    let start = start.min(rows.len());
    let end = start.saturating_add(count).min(rows.len());
    &rows[start..end]
}

fn joined_lower(row: &[String]) -> String {
    row.join(" ").to_lowercase()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text.contains(kw.as_str()))
}
