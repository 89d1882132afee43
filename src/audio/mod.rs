mod player;
pub use player::Player;

mod wav;
pub use wav::WavFile;
