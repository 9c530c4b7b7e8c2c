//! core/tags/flac.rs
//! FLAC metadata-block layout checks done before lofty writes the file.
//!
//! lofty rewrites the metadata blocks in place and keeps the last-block flag
//! only when the final block is PADDING. Files without one (padding is
//! optional) get a small PADDING block appended to their metadata first.

use std::path::Path;

use super::super::error::{Error, Result};

const MARKER: &[u8; 4] = b"fLaC";
const BLOCK_HEADER_LEN: usize = 4;
const LAST_BLOCK: u8 = 0x80;
const BLOCK_TYPE_MASK: u8 = 0x7F;
const PADDING: u8 = 1;
const PADDING_LEN: usize = 1024;

/// Header offset of the last metadata block and the end of the metadata.
/// `None` when the bytes do not start with a plain FLAC stream.
fn last_block(bytes: &[u8]) -> Option<(usize, usize)> {
    if bytes.get(..MARKER.len())? != MARKER {
        return None;
    }

    let mut pos = MARKER.len();
    loop {
        let header = bytes.get(pos..pos + BLOCK_HEADER_LEN)?;
        let len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let end = pos + BLOCK_HEADER_LEN + len;
        if end > bytes.len() {
            return None;
        }
        if header[0] & LAST_BLOCK != 0 {
            return Some((pos, end));
        }
        pos = end;
    }
}

/// Append a PADDING block when the metadata does not end with one.
/// Returns whether the bytes changed.
fn add_trailing_padding(bytes: &mut Vec<u8>) -> bool {
    let Some((header, end)) = last_block(bytes) else {
        return false;
    };
    if bytes[header] & BLOCK_TYPE_MASK == PADDING {
        return false;
    }

    bytes[header] &= !LAST_BLOCK;

    let mut block = vec![0u8; BLOCK_HEADER_LEN + PADDING_LEN];
    block[0] = LAST_BLOCK | PADDING;
    block[1..4].copy_from_slice(&(PADDING_LEN as u32).to_be_bytes()[1..]);
    bytes.splice(end..end, block);
    true
}

pub(super) fn ensure_trailing_padding(path: &Path) -> Result<()> {
    let mut bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    if add_trailing_padding(&mut bytes) {
        tracing::debug!(path = %path.display(), "added FLAC padding block");
        std::fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::flac_bytes;

    fn block_types(bytes: &[u8]) -> Vec<(u8, bool)> {
        let mut out = Vec::new();
        let mut pos = MARKER.len();
        loop {
            let h = &bytes[pos..pos + BLOCK_HEADER_LEN];
            let len = u32::from_be_bytes([0, h[1], h[2], h[3]]) as usize;
            out.push((h[0] & BLOCK_TYPE_MASK, h[0] & LAST_BLOCK != 0));
            if h[0] & LAST_BLOCK != 0 {
                return out;
            }
            pos += BLOCK_HEADER_LEN + len;
        }
    }

    #[test]
    fn streaminfo_only_gets_a_last_padding_block() {
        let mut bytes = flac_bytes(false);
        let audio_len = bytes.len() - last_block(&bytes).unwrap().1;

        assert!(add_trailing_padding(&mut bytes));
        assert_eq!(block_types(&bytes), vec![(0, false), (PADDING, true)]);

        // Audio frames after the metadata are untouched.
        let end = last_block(&bytes).unwrap().1;
        assert_eq!(bytes.len() - end, audio_len);
    }

    #[test]
    fn existing_trailing_padding_is_left_alone() {
        let mut bytes = flac_bytes(true);
        let before = bytes.clone();
        assert!(!add_trailing_padding(&mut bytes));
        assert_eq!(bytes, before);
    }

    #[test]
    fn non_flac_bytes_are_ignored() {
        let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
        assert!(!add_trailing_padding(&mut bytes));

        let mut truncated = b"fLaC\x80\x00\x00\x22".to_vec();
        assert!(!add_trailing_padding(&mut truncated));
    }
}
