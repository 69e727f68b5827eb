pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod events;
pub mod sys;
pub mod view;
