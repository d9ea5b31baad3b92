pub mod header;
pub mod normalize;
pub mod values;

pub use header::{
    classify, infer_roles_from_content, is_maintenance_table, Classification, RoleColumns,
};
pub use normalize::normalize;
