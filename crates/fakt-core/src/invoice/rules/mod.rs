//! Rule-based value extractors for invoice region text.

pub mod dates;
pub mod numbers;
pub mod patterns;
pub mod text;

pub use dates::{extract_date, extract_date_range, first_day_of_next_month, months_in_range};
pub use numbers::{extract_float, extract_unit};
pub use text::add_capital_spaces;
