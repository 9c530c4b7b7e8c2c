//! core/fixtures.rs
//! Smallest files lofty accepts for each container, built in memory for tests.
//! Every fixture describes three seconds of 44.1 kHz stereo audio.

use std::path::{Path, PathBuf};

const SAMPLE_RATE: u32 = 44_100;
const TOTAL_SAMPLES: u64 = 132_300;

pub(crate) fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// STREAMINFO, an optional trailing PADDING block, then a few frame bytes.
pub(crate) fn flac_bytes(padding: bool) -> Vec<u8> {
    let mut out = b"fLaC".to_vec();

    out.push(if padding { 0x00 } else { 0x80 });
    out.extend_from_slice(&[0, 0, 34]);
    out.extend_from_slice(&4096u16.to_be_bytes());
    out.extend_from_slice(&4096u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);
    // sample rate (20 bits), channels - 1 (3), bits per sample - 1 (5), total samples (36)
    let packed = (u64::from(SAMPLE_RATE) << 44) | (1 << 41) | (15 << 36) | TOTAL_SAMPLES;
    out.extend_from_slice(&packed.to_be_bytes());
    out.extend_from_slice(&[0; 16]);

    if padding {
        out.push(0x81);
        out.extend_from_slice(&[0x00, 0x04, 0x00]);
        out.extend_from_slice(&[0; 1024]);
    }

    out.extend_from_slice(&[0xFF, 0xF8, 0x69, 0x08]);
    out.extend_from_slice(&[0; 60]);
    out
}

/// One Ogg page holding one packet. Checksums stay zero; readers skip them.
fn ogg_page(flags: u8, granule: u64, sequence: u32, packet: &[u8]) -> Vec<u8> {
    let mut lacing = vec![255u8; packet.len() / 255];
    lacing.push((packet.len() % 255) as u8);

    let mut out = b"OggS".to_vec();
    out.push(0);
    out.push(flags);
    out.extend_from_slice(&granule.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.push(lacing.len() as u8);
    out.extend_from_slice(&lacing);
    out.extend_from_slice(packet);
    out
}

/// Vorbis identification, comment and setup headers, then one audio page.
pub(crate) fn vorbis_bytes() -> Vec<u8> {
    let mut ident = b"\x01vorbis".to_vec();
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.push(2);
    ident.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    ident.extend_from_slice(&0i32.to_le_bytes());
    ident.extend_from_slice(&128_000i32.to_le_bytes());
    ident.extend_from_slice(&0i32.to_le_bytes());
    ident.push(0xB8);
    ident.push(1);

    let vendor = b"tagwright fixture";
    let mut comment = b"\x03vorbis".to_vec();
    comment.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    comment.extend_from_slice(vendor);
    comment.extend_from_slice(&0u32.to_le_bytes());
    comment.push(1);

    let mut setup = b"\x05vorbis".to_vec();
    setup.extend_from_slice(&[0; 8]);

    let mut out = ogg_page(0x02, 0, 0, &ident);
    out.extend(ogg_page(0x00, 0, 1, &comment));
    out.extend(ogg_page(0x00, 0, 2, &setup));
    out.extend(ogg_page(0x04, TOTAL_SAMPLES, 3, &[0; 32]));
    out
}

fn atom(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(name);
    out.extend_from_slice(payload);
    out
}

/// ftyp, then moov with a single sound track (mdhd + hdlr), then mdat.
/// There is no udta yet; lofty creates udta.meta.ilst on the first save.
pub(crate) fn m4a_bytes() -> Vec<u8> {
    let mut ftyp = b"M4A ".to_vec();
    ftyp.extend_from_slice(&0u32.to_be_bytes());
    ftyp.extend_from_slice(b"M4A mp42isom");

    let mut mdhd = vec![0; 12];
    mdhd.extend_from_slice(&SAMPLE_RATE.to_be_bytes());
    mdhd.extend_from_slice(&(TOTAL_SAMPLES as u32).to_be_bytes());
    mdhd.extend_from_slice(&[0x55, 0xC4, 0, 0]);

    let mut hdlr = vec![0; 8];
    hdlr.extend_from_slice(b"soun");
    hdlr.extend_from_slice(&[0; 13]);

    let mut mdia = atom(b"mdhd", &mdhd);
    mdia.extend(atom(b"hdlr", &hdlr));
    let trak = atom(b"mdia", &mdia);
    let moov = atom(b"trak", &trak);

    let mut out = atom(b"ftyp", &ftyp);
    out.extend(atom(b"moov", &moov));
    out.extend(atom(b"mdat", &[0; 16]));
    out
}
