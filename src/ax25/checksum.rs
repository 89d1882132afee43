use crc::{Crc, CRC_16_IBM_SDLC};

use super::frame::RawFrame;

pub const FCS_BYTES: usize = 2;

// CRC-16/X-25: reflected 0x1021, init 0xFFFF, xorout 0xFFFF.
const FCS: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

pub fn frame_check_sequence(data: &[u8]) -> u16 {
    FCS.checksum(data)
}

/// A frame with its FCS appended. Only obtainable through [`RawFrame::append_crc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksummedFrame {
    bytes: Vec<u8>,
}

impl RawFrame {
    pub fn append_crc(self) -> ChecksummedFrame {
        let mut bytes = self.into_bytes();
        let fcs = frame_check_sequence(&bytes);
        bytes.extend_from_slice(&fcs.to_le_bytes());

        let frame = ChecksummedFrame { bytes };
        debug_assert!(frame.verify(), "appended FCS does not verify");
        frame
    }
}

impl ChecksummedFrame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn fcs(&self) -> u16 {
        let (_, fcs) = self.bytes.split_at(self.bytes.len() - FCS_BYTES);
        u16::from_le_bytes([fcs[0], fcs[1]])
    }

    pub fn verify(&self) -> bool {
        if self.bytes.len() < FCS_BYTES {
            return false;
        }
        let (data, _) = self.bytes.split_at(self.bytes.len() - FCS_BYTES);
        frame_check_sequence(data) == self.fcs()
    }
}
