pub mod config;
pub mod editor;
pub mod history;
pub mod output;
pub mod scoring;
pub mod store;
