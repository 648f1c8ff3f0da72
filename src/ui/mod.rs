pub mod app;
pub mod detail;
pub mod draw;
pub mod form;
