pub mod api;
pub mod config;
pub mod error;
pub mod list;
pub mod models;
pub mod portal;
pub mod session;
pub mod shell;
pub mod timetable;
