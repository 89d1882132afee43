use super::address::{StationId, ADDRESS_BYTES};
use crate::error::{EncodingError, Error, Result};

pub const CONTROL_UI: u8 = 0x03;
pub const PID_NO_LAYER3: u8 = 0xF0;
pub const MAX_DIGIPEATERS: usize = 8;

/// Address chain, control, PID and information field, without the FCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8>,
}

impl RawFrame {
    pub fn build(
        destination: &StationId,
        source: &StationId,
        digipeaters: &[StationId],
        payload: &str,
    ) -> Result<Self> {
        if digipeaters.len() > MAX_DIGIPEATERS {
            return Err(Error::invalid_identifier(
                digipeaters
                    .iter()
                    .map(StationId::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                "digipeater path holds at most 8 addresses",
            ));
        }

        if let Some(c) = payload.chars().find(|c| !c.is_ascii()) {
            return Err(EncodingError::NonAsciiPayload(c).into());
        }

        let chain = [destination, source]
            .into_iter()
            .chain(digipeaters.iter())
            .collect::<Vec<_>>();
        let last_index = chain.len() - 1;

        let mut bytes =
            Vec::with_capacity(chain.len() * ADDRESS_BYTES + 2 + payload.len());

        chain.iter().enumerate().for_each(|(index, station)| {
            bytes.extend_from_slice(station.encode(index == last_index).as_bytes());
        });

        bytes.extend_from_slice(&[CONTROL_UI, PID_NO_LAYER3]);
        bytes.extend_from_slice(payload.as_bytes());

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(super) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ax25::address::CALLSIGN_LENGTH;

    fn station(text: &str) -> StationId {
        text.parse().unwrap()
    }

    #[test]
    fn test_frame_structure_without_path() {
        let frame =
            RawFrame::build(&station("APCSS"), &station("N0CALL"), &[], ">TEST").unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(frame.len(), 7 + 7 + 2 + 5);
        assert_eq!(bytes[CALLSIGN_LENGTH] & 0x01, 0);
        assert_eq!(bytes[ADDRESS_BYTES + CALLSIGN_LENGTH] & 0x01, 1);
        assert_eq!(&bytes[14..16], &[CONTROL_UI, PID_NO_LAYER3]);
        assert_eq!(&bytes[16..], b">TEST");
    }

    #[test]
    fn test_last_flag_on_final_digipeater() {
        let path = [station("WIDE1-1"), station("WIDE2-2")];
        let frame =
            RawFrame::build(&station("APRS"), &station("N0CALL"), &path, "hi").unwrap();
        let bytes = frame.as_bytes();

        let flags = (0..4)
            .map(|index| bytes[index * ADDRESS_BYTES + CALLSIGN_LENGTH] & 0x01)
            .collect::<Vec<_>>();
        assert_eq!(flags, vec![0, 0, 0, 1]);
        assert_eq!(bytes[3 * ADDRESS_BYTES + CALLSIGN_LENGTH], 0x65);
    }

    #[test]
    fn test_empty_payload_is_allowed() {
        let frame = RawFrame::build(&station("APRS"), &station("N0CALL"), &[], "").unwrap();
        assert_eq!(frame.len(), 16);
    }

    #[test]
    fn test_rejects_non_ascii_payload() {
        let result = RawFrame::build(&station("APRS"), &station("N0CALL"), &[], ">caf\u{e9}");
        assert!(matches!(
            result,
            Err(Error::Encoding(EncodingError::NonAsciiPayload('\u{e9}')))
        ));
    }

    #[test]
    fn test_rejects_long_path() {
        let path = vec![station("WIDE1-1"); MAX_DIGIPEATERS + 1];
        let result = RawFrame::build(&station("APRS"), &station("N0CALL"), &path, "x");
        assert!(matches!(result, Err(Error::InvalidIdentifier { .. })));
    }
}
