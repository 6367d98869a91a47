use chrono::{Datelike, Local};
use web_sys::Document;

use crate::error::Result;

pub const YEAR_ELEMENT_ID: &str = "year";

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Stamps the footer with the current year.
pub fn setup(document: &Document) -> Result<()> {
    if let Some(el) = document.get_element_by_id(YEAR_ELEMENT_ID) {
        let year = current_year().to_string();
        el.set_text_content(Some(year.as_str()));
    }
    Ok(())
}
