use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const CALLSIGN_LENGTH: usize = 6;
pub const ADDRESS_BYTES: usize = CALLSIGN_LENGTH + 1;
pub const MAX_STATION_NUMBER: u8 = 15;

const SSID_RESERVED_BITS: u8 = 0x60;
const LAST_ADDRESS_FLAG: u8 = 0x01;

/// Call sign plus SSID, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationId {
    name: String,
    station_number: u8,
}

impl StationId {
    pub fn new(name: &str, station_number: u8) -> Result<Self> {
        let name = name.trim().to_ascii_uppercase();

        if name.is_empty() {
            return Err(Error::invalid_identifier(name, "call sign is empty"));
        }
        if name.len() > CALLSIGN_LENGTH {
            return Err(Error::invalid_identifier(
                name,
                "call sign is longer than 6 characters",
            ));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::invalid_identifier(
                name,
                "call sign must be alphanumeric",
            ));
        }
        if station_number > MAX_STATION_NUMBER {
            return Err(Error::invalid_identifier(
                format!("{}-{}", name, station_number),
                "station number must be within 0-15",
            ));
        }

        Ok(Self {
            name,
            station_number,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn station_number(&self) -> u8 {
        self.station_number
    }

    /// Encodes into the 7-byte address field. `last` sets the extension bit
    /// that terminates the address chain.
    pub fn encode(&self, last: bool) -> Address {
        let mut bytes = [b' ' << 1; ADDRESS_BYTES];

        self.name
            .bytes()
            .zip(bytes.iter_mut())
            .for_each(|(c, byte)| *byte = c << 1);

        bytes[CALLSIGN_LENGTH] = SSID_RESERVED_BITS | (self.station_number << 1);
        if last {
            bytes[CALLSIGN_LENGTH] |= LAST_ADDRESS_FLAG;
        }

        Address(bytes)
    }
}

impl FromStr for StationId {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        match text.trim().split_once('-') {
            Some((name, ssid)) => {
                let station_number = ssid.parse::<u8>().map_err(|_| {
                    Error::invalid_identifier(text, "SSID must be a number within 0-15")
                })?;
                Self::new(name, station_number)
            }
            None => Self::new(text, 0),
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.station_number > 0 {
            write!(f, "{}-{}", self.name, self.station_number)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    pub fn is_last(&self) -> bool {
        self.0[CALLSIGN_LENGTH] & LAST_ADDRESS_FLAG != 0
    }

    /// Space-padded call sign and station number.
    pub fn decode(&self) -> (String, u8) {
        let name = self.0[..CALLSIGN_LENGTH]
            .iter()
            .map(|&byte| (byte >> 1) as char)
            .collect();
        let station_number = (self.0[CALLSIGN_LENGTH] >> 1) & 0x0F;

        (name, station_number)
    }
}
