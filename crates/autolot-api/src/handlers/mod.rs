//! HTTP request handlers

pub mod cars;
pub mod images;
