#[macro_use]
extern crate log;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate strum_macros;

pub mod api;
pub mod audio;
pub mod config;
pub mod database;
pub mod model;
pub mod path;
pub mod settings;
