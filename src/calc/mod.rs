pub mod date_key;
pub mod month_grid;
pub mod status;

pub use date_key::{date_key, parse_date_key};
pub use month_grid::{add_months, month_grid, month_name, WEEKDAY_HEADER};
pub use status::DayStatus;
