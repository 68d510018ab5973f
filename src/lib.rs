//! Data layer of the iSafe incident map: tables for incident reports, partner
//! organizations and referrals, plus the GeoJSON formatter for the map.

#[macro_use] extern crate diesel;
#[macro_use] extern crate log;


pub mod config;
pub mod db;
pub mod error;
pub mod feature;
pub mod logger;


pub use config::Config;
pub use db::{connect_to_db, Database};
pub use error::{Error, Result};
