// ABOUTME: Library crate for wc-status exposing the status panel, sources and UI for testing

pub mod app;
pub mod components;
pub mod config;
pub mod models;
pub mod panel;
pub mod source;
