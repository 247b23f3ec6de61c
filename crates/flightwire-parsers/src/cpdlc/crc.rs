//! CRC-16/ARINC checksumming for ARINC-622 envelopes.
//!
//! Polynomial 0x1021, initial value 0xFFFF, MSB-first (non-reflected).
//! Verification runs the CRC over message-plus-checksum bytes and checks
//! for the residue 0x1D0F; calculation XORs the final remainder with
//! 0xFFFF and emits it big-endian.

use std::sync::LazyLock;

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;
const XOROUT: u16 = 0xFFFF;

/// Residue left in the register after running the CRC over a message
/// followed by its own (XOR-ed out) checksum.
pub const CRC_RESIDUE: u16 = 0x1D0F;

static CRC_TABLE: LazyLock<[u16; 256]> = LazyLock::new(|| {
    let mut table = [0u16; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut c = (i as u16) << 8;
        for _ in 0..8 {
            if c & 0x8000 != 0 {
                c = (c << 1) ^ POLY;
            } else {
                c <<= 1;
            }
        }
        *entry = c;
    }
    table
});

fn crc16(data: &[u8]) -> u16 {
    let mut rem = INIT;
    for byte in data {
        let idx = ((rem >> 8) ^ u16::from(*byte)) & 0xFF;
        rem = (rem << 8) ^ CRC_TABLE[idx as usize];
    }
    rem
}

/// Calculate the two CRC bytes for `data`, big-endian.
pub fn calculate_crc(data: &[u8]) -> [u8; 2] {
    (crc16(data) ^ XOROUT).to_be_bytes()
}

/// Verify a buffer whose last two bytes are the transmitted CRC.
///
/// The whole buffer (checksum included) is fed through the register; a
/// correct message leaves the residue [`CRC_RESIDUE`].
pub fn verify_crc(data_with_crc: &[u8]) -> bool {
    data_with_crc.len() >= 2 && crc16(data_with_crc) == CRC_RESIDUE
}

/// Verify a message against a separately-transmitted checksum value
/// (used for ASCII-hex checksums appended to FPN text).
pub fn verify_crc_value(data: &[u8], crc: u16) -> bool {
    let bytes = crc.to_be_bytes();
    let mut buf = Vec::with_capacity(data.len() + 2);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&bytes);
    verify_crc(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        for msg in [
            &b"FPN/RI:DA:KPHX:AA:KSLC"[..],
            b"A",
            b"",
            b"/AKLCDYA.AT1.VH-EBO",
        ] {
            let crc = calculate_crc(msg);
            let mut buf = msg.to_vec();
            buf.extend_from_slice(&crc);
            assert!(verify_crc(&buf), "{:?} should round-trip", msg);
        }
    }

    #[test]
    fn flipped_bit_fails() {
        let msg = b"FPN/ID12345S,TEST".to_vec();
        let crc = calculate_crc(&msg);
        let mut buf = msg.clone();
        buf.extend_from_slice(&crc);

        for byte in 0..buf.len() {
            for bit in 0..8 {
                let mut corrupt = buf.clone();
                corrupt[byte] ^= 1 << bit;
                assert!(!verify_crc(&corrupt), "flip at {byte}.{bit} must fail");
            }
        }
    }

    #[test]
    fn truncation_fails() {
        let msg = b"POSITION REPORT".to_vec();
        let crc = calculate_crc(&msg);
        let mut buf = msg;
        buf.extend_from_slice(&crc);
        assert!(verify_crc(&buf));
        assert!(!verify_crc(&buf[..buf.len() - 1]));
        assert!(!verify_crc(&buf[1..]));
    }

    #[test]
    fn verify_against_hex_value() {
        let msg = b"FPN/ID99999";
        let crc = u16::from_be_bytes(calculate_crc(msg));
        assert!(verify_crc_value(msg, crc));
        assert!(!verify_crc_value(msg, 0xFFFF));
        assert!(!verify_crc_value(msg, crc ^ 0x0001));
    }
}
