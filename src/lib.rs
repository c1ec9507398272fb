//! Turns the GeoNames `MY.txt` postal-code dump into the Flyway seed
//! migration for the `postal_code_reference` table.

pub mod emit;
pub mod parse;
pub mod states;
pub mod stats;
