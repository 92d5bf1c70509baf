//! `citydevs routes` — print the assembled route table.
//!
//! Because controllers declare routes as data, the table can be inspected
//! without binding a socket or touching the database.

use crate::controllers;
use crate::error::CitydevsError;

pub fn execute() -> Result<(), CitydevsError> {
    println!("{:<8}PATH", "METHOD");
    for (method, path) in controllers::route_table() {
        println!("{method:<8}{path}");
    }
    Ok(())
}
