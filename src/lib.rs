//! simple-weather library crate

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod forecast;
pub mod options;
pub mod printer;
pub mod random;
pub mod reporting;
pub mod time;
