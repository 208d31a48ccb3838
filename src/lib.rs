//! quillpress - A lightweight theme-driven CMS front end
//!
//! This library provides the public site surface of quillpress: a route
//! table over domain services that assembles per-request view models
//! and renders them through the active Tera theme.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod theme;
