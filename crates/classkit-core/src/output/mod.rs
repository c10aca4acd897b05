//! Report output: CSV grade file and console summary

pub mod csv_report;
pub mod summary;

pub use csv_report::GradeReportWriter;
pub use summary::render_histogram;
