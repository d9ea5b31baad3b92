pub mod aggregate;

pub use aggregate::{aggregate, aggregate_with_diagnostics};
