//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod drivers_table;
pub mod footer;
pub mod form;
pub mod header;
pub mod info_panel;
pub mod logs;
pub mod report;
pub mod rides_table;
pub mod summary;
pub mod toast;
