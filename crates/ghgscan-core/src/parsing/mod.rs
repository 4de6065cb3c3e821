pub mod lines;
pub mod number;

pub use lines::{lines_from_pages, lines_from_text, normalize_line};
pub use number::normalize_quantity;
