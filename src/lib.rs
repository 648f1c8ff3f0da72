pub mod book;
pub mod bus;
pub mod command;
pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod notify;
pub mod palette;
pub mod phone;
pub mod submit;
pub mod ui;
