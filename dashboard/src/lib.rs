//! FDE Dashboard server - in-memory task/link stores plus the terminal
//! execution bridge that streams shell output back over chunked HTTP.

pub mod api;
pub mod catalog;
pub mod config;
pub mod runner;
pub mod store;
pub mod stream;
