pub mod files;
pub mod menu;
