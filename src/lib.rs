#[macro_use]
extern crate nolog;

pub mod audio;
pub mod ax25;
pub mod config;
pub mod error;
pub mod hdlc;
pub mod modem;
pub mod node;

pub use error::{EncodingError, Error, IoFailure, Result};
