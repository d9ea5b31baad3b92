use crate::model::ColumnRole;
use serde::{Deserialize, Serialize};

/// Locale keyword sets used to recognize and classify maintenance tables.
///
/// All keywords are lowercase; they are matched as substrings of lowercased
/// cell text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Any of these in the first row marks it as a header row.
    pub header_keywords: Vec<String>,
    /// Any of these in a header marks the grid as a maintenance table.
    pub maintenance_keywords: Vec<String>,
    pub roles: RoleKeywords,
    /// Currency and price markers used when probing cell contents.
    pub cost_markers: Vec<String>,
    /// Category given to items whose grid has no category column.
    pub default_category: String,
    /// Number of data rows inspected when probing cell contents.
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

/// Header keywords per column role, matched in field order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleKeywords {
    pub year: Vec<String>,
    pub category: Vec<String>,
    pub action: Vec<String>,
    pub cost: Vec<String>,
}

impl RoleKeywords {
    /// Roles in assignment order. An earlier role claims a column first.
    pub const ORDER: [ColumnRole; 4] = [
        ColumnRole::Year,
        ColumnRole::Category,
        ColumnRole::Action,
        ColumnRole::Cost,
    ];

    pub fn for_role(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Year => &self.year,
            ColumnRole::Category => &self.category,
            ColumnRole::Action => &self.action,
            ColumnRole::Cost => &self.cost,
            ColumnRole::Unknown => &[],
        }
    }
}

fn default_sample_rows() -> usize {
    5
}
