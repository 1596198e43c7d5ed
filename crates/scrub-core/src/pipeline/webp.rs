//! WebP container rewrapping.
//!
//! Encoders that emit the VP8X extended format attach auxiliary chunks
//! (ICCP color profiles, EXIF, XMP) alongside the image bitstream. The
//! rewrap below keeps only the VP8/VP8L image chunk inside a minimal RIFF
//! container, so the auxiliary segments are absent rather than zeroed.

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const VP8X_PAYLOAD_LEN: usize = 10;

/// Rewrap a WebP byte buffer into a minimal RIFF container holding only
/// the image bitstream.
///
/// Returns the input unchanged when it is not extended-format WebP (simple
/// VP8/VP8L files carry no auxiliary chunks to begin with) or when no image
/// chunk can be located.
pub fn rewrap_minimal(data: &[u8]) -> Vec<u8> {
    if data.len() < RIFF_HEADER_LEN + CHUNK_HEADER_LEN {
        return data.to_vec();
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"WEBP" {
        return data.to_vec();
    }
    if &data[12..16] != b"VP8X" {
        // Simple format, nothing to strip.
        return data.to_vec();
    }

    let mut offset = RIFF_HEADER_LEN + CHUNK_HEADER_LEN + VP8X_PAYLOAD_LEN;
    while offset + CHUNK_HEADER_LEN <= data.len() {
        let fourcc = &data[offset..offset + 4];
        let size = u32::from_le_bytes([
            data[offset + 4],
            data[offset + 5],
            data[offset + 6],
            data[offset + 7],
        ]) as usize;
        // RIFF chunks are padded to even length
        let padded = size + (size % 2);

        if fourcc == b"VP8 " || fourcc == b"VP8L" {
            let chunk_len = CHUNK_HEADER_LEN + padded;
            let chunk_end = (offset + chunk_len).min(data.len());

            let mut out = Vec::with_capacity(RIFF_HEADER_LEN + chunk_len);
            out.extend_from_slice(b"RIFF");
            out.extend_from_slice(&((4 + chunk_len) as u32).to_le_bytes());
            out.extend_from_slice(b"WEBP");
            out.extend_from_slice(&data[offset..chunk_end]);
            return out;
        }

        offset += CHUNK_HEADER_LEN + padded;
    }

    data.to_vec()
}
