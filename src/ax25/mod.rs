//! AX.25 UI frame construction: address field, control/PID and FCS.

mod address;
pub use address::{Address, StationId, ADDRESS_BYTES, CALLSIGN_LENGTH, MAX_STATION_NUMBER};

mod frame;
pub use frame::{RawFrame, CONTROL_UI, MAX_DIGIPEATERS, PID_NO_LAYER3};

mod checksum;
pub use checksum::{frame_check_sequence, ChecksummedFrame, FCS_BYTES};
