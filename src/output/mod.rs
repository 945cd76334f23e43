//! Output formats: CSV export, console/JSON reports, HTML pages

pub mod csv_export;
pub mod formatter;
pub mod pages;
pub mod report;
