//! HDLC bit-level framing: LSB-first expansion, zero-bit insertion and
//! flag delimiting.

use bitvec::prelude::*;

use crate::ax25::ChecksummedFrame;
use crate::error::{EncodingError, Result};

pub type Bits = BitVec<u8, Lsb0>;

pub const HDLC_FLAG: u8 = 0x7E;
pub const PREAMBLE_FLAGS: usize = 50;
pub const POSTAMBLE_FLAGS: usize = 5;

const MAX_CONSECUTIVE_ONES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HdlcFraming {
    pub preamble_flags: usize,
    pub postamble_flags: usize,
}

impl Default for HdlcFraming {
    fn default() -> Self {
        Self {
            preamble_flags: PREAMBLE_FLAGS,
            postamble_flags: POSTAMBLE_FLAGS,
        }
    }
}

/// Line-ready bits of one frame: flags, stuffed content, flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bits: Bits,
}

impl BitSequence {
    pub fn encode(frame: &ChecksummedFrame) -> Result<Self> {
        Self::encode_with(frame, HdlcFraming::default())
    }

    pub fn encode_with(frame: &ChecksummedFrame, framing: HdlcFraming) -> Result<Self> {
        if frame.is_empty() {
            return Err(EncodingError::EmptyFrame.into());
        }

        let stuffed = Self::stuff(frame.as_bytes().view_bits::<Lsb0>());
        let flag_byte = HDLC_FLAG;
        let flag = flag_byte.view_bits::<Lsb0>();

        let flags = framing.preamble_flags + framing.postamble_flags;
        let mut bits = Bits::with_capacity(flags * flag.len() + stuffed.len());

        (0..framing.preamble_flags).for_each(|_| bits.extend_from_bitslice(flag));
        bits.extend_from_bitslice(&stuffed);
        (0..framing.postamble_flags).for_each(|_| bits.extend_from_bitslice(flag));

        Ok(Self { bits })
    }

    /// Inserts a `0` after every run of five `1`s.
    pub fn stuff(bits: &BitSlice<u8, Lsb0>) -> Bits {
        let (_, stuffed) = bits.iter().by_vals().fold(
            (0usize, Bits::with_capacity(bits.len() + bits.len() / MAX_CONSECUTIVE_ONES)),
            |(ones, mut out), bit| {
                out.push(bit);
                match (bit, ones + 1) {
                    (true, MAX_CONSECUTIVE_ONES) => {
                        out.push(false);
                        (0, out)
                    }
                    (true, ones) => (ones, out),
                    (false, _) => (0, out),
                }
            },
        );
        stuffed
    }

    /// Drops the `0` that follows every run of five `1`s.
    pub fn unstuff(bits: &BitSlice<u8, Lsb0>) -> Bits {
        let (_, unstuffed) = bits.iter().by_vals().fold(
            (0usize, Bits::with_capacity(bits.len())),
            |(ones, mut out), bit| {
                if ones == MAX_CONSECUTIVE_ONES {
                    return (0, out);
                }
                out.push(bit);
                (if bit { ones + 1 } else { 0 }, out)
            },
        );
        unstuffed
    }

    pub fn as_bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }
}

impl From<Bits> for BitSequence {
    fn from(bits: Bits) -> Self {
        Self { bits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ax25::{RawFrame, StationId};

    const TEST_SEQUENCE_BYTES: usize = 500;
    const FLAG_BITS: usize = 8;

    fn longest_run_of_ones(bits: &BitSlice<u8, Lsb0>) -> usize {
        bits.iter()
            .by_vals()
            .fold((0, 0), |(run, longest), bit| {
                let run = if bit { run + 1 } else { 0 };
                (run, longest.max(run))
            })
            .1
    }

    fn test_frame(payload: &str) -> ChecksummedFrame {
        let destination = StationId::new("APCSS", 0).unwrap();
        let source = StationId::new("N0CALL", 0).unwrap();
        RawFrame::build(&destination, &source, &[], payload)
            .unwrap()
            .append_crc()
    }

    #[test]
    fn test_stuff_inserts_after_five_ones() {
        let bits = bits![u8, Lsb0; 1, 1, 1, 1, 1, 1, 1, 0];
        let stuffed = BitSequence::stuff(bits);
        assert_eq!(
            stuffed.as_bitslice(),
            bits![u8, Lsb0; 1, 1, 1, 1, 1, 0, 1, 1, 0]
        );
    }

    #[test]
    fn test_stuff_counter_resets_on_zero() {
        let bits = bits![u8, Lsb0; 1, 1, 1, 1, 0, 1, 1, 1, 1, 0];
        assert_eq!(BitSequence::stuff(bits).as_bitslice(), bits);
    }

    #[test]
    fn test_stuff_exactly_five_ones_at_end() {
        let bits = bits![u8, Lsb0; 0, 1, 1, 1, 1, 1];
        let stuffed = BitSequence::stuff(bits);
        assert_eq!(stuffed.as_bitslice(), bits![u8, Lsb0; 0, 1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn test_no_forbidden_run_and_unstuff() {
        let data = (0..TEST_SEQUENCE_BYTES)
            .map(|_| rand::random::<u8>() | 0x0F)
            .collect::<Vec<_>>();
        let bits = data.view_bits::<Lsb0>();

        let stuffed = BitSequence::stuff(bits);
        assert!(longest_run_of_ones(&stuffed) <= MAX_CONSECUTIVE_ONES);
        assert_eq!(BitSequence::unstuff(&stuffed).as_bitslice(), bits);

        let ones = Bits::repeat(true, 64);
        let stuffed = BitSequence::stuff(&ones);
        assert!(longest_run_of_ones(&stuffed) <= MAX_CONSECUTIVE_ONES);
        assert_eq!(
            BitSequence::unstuff(&stuffed).as_bitslice(),
            ones.as_bitslice()
        );
    }

    #[test]
    fn test_flags_wrap_stuffed_content() {
        let frame = test_frame(">TEST");
        let sequence = BitSequence::encode(&frame).unwrap();
        let bits = sequence.as_bits();

        let flag = bits![u8, Lsb0; 0, 1, 1, 1, 1, 1, 1, 0];
        let preamble_bits = PREAMBLE_FLAGS * FLAG_BITS;
        let postamble_bits = POSTAMBLE_FLAGS * FLAG_BITS;

        bits[..preamble_bits]
            .chunks(FLAG_BITS)
            .for_each(|chunk| assert_eq!(chunk, flag));
        bits[bits.len() - postamble_bits..]
            .chunks(FLAG_BITS)
            .for_each(|chunk| assert_eq!(chunk, flag));

        let content = &bits[preamble_bits..bits.len() - postamble_bits];
        assert!(longest_run_of_ones(content) <= MAX_CONSECUTIVE_ONES);

        let unstuffed = BitSequence::unstuff(content);
        assert_eq!(unstuffed.as_raw_slice(), frame.as_bytes());
    }

    #[test]
    fn test_custom_flag_counts() {
        let frame = test_frame(">X");
        let framing = HdlcFraming {
            preamble_flags: 3,
            postamble_flags: 2,
        };
        let short = BitSequence::encode_with(&frame, framing).unwrap();
        let long = BitSequence::encode(&frame).unwrap();

        assert_eq!(
            long.len() - short.len(),
            (PREAMBLE_FLAGS - 3 + POSTAMBLE_FLAGS - 2) * FLAG_BITS
        );
    }
}
