//! HTML rendering for `/view`.

pub mod cards;
pub mod page;

pub use cards::{get_field, parse_flag, render_card, ViewOptions};
pub use page::{render_error_page, render_page};
