//! Web surface for the octolens profile analyzer.
//!
//! Thin layers over `octolens-core`: [`config`] reads the environment,
//! [`pages`] holds the askama templates, [`handlers`] orchestrates
//! client -> stats -> store -> page, and [`server`] runs the tiny_http
//! worker loop.

pub mod config;
pub mod handlers;
pub mod pages;
pub mod server;
