#![recursion_limit = "512"]
#[macro_use]
extern crate diesel;

#[macro_use]
extern crate diesel_migrations;

pub mod core;
pub mod db;
pub mod error;
pub mod mapping;
pub mod store;
pub mod util;

pub use error::Error;
