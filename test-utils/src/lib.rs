//! Test helpers: CSV fixtures, presenter and destination picker doubles.

pub mod csv_loader;
pub mod picker_mock;
pub mod presenter_mock;
