pub mod file_picker;
pub mod mock;
