pub mod month_grid;

pub use month_grid::{build_month_grid, GridDay, MonthGrid};
