//! Pipeline stages, one module per irreversible transform:
//! - **decode**: raw bytes → validated pixel buffer
//! - **strip**: pixel-only re-encode with no metadata segments
//! - **redact**: in-place face blur
//! - **stealth**: identity-resetting downscale + fresh encode
//! - **webp**: RIFF rewrap helper used by the encoders

pub mod decode;
pub mod redact;
pub mod stealth;
pub mod strip;
pub mod webp;

// Re-exports for convenient access
pub use decode::{DecodedImage, Decoder, FormatTag};
pub use redact::FaceRedactor;
pub use stealth::IdentityReset;
pub use strip::MetadataStripper;
