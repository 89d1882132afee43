mod encoder;
pub use encoder::AprsEncoder;
