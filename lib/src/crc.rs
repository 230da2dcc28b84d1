// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Byte-wise CRC-32 (ISO-HDLC, reflected polynomial `0xEDB88320`).

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Lookup table of the reflected CRC-32 polynomial, one entry per byte value.
pub const CRC32_TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut index = 0;
    while index < 256 {
        let mut crc = index as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[index] = crc;
        index += 1;
    }
    table
}

/// Runs the table-driven CRC register over `buffer`, starting from `seed`.
///
/// No complement is applied on entry or exit, so the result of one call can be fed as the seed
/// of the next one. The platform serial number is derived with this function.
pub fn crc32_update(seed: u32, buffer: &[u8]) -> u32 {
    buffer.iter().fold(seed, |crc, &byte| {
        (crc >> 8) ^ CRC32_TABLE[((crc as u8) ^ byte) as usize]
    })
}

/// Computes the standard CRC-32 of `buffer`.
///
/// `seed` is 0 for a fresh checksum, or the result of a previous call to continue a running
/// checksum over several buffers.
pub fn crc32(seed: u32, buffer: &[u8]) -> u32 {
    !crc32_update(!seed, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        assert_eq!(CRC32_TABLE[0], 0);
        assert_eq!(CRC32_TABLE[1], 0x7707_3096);
        assert_eq!(CRC32_TABLE[128], POLYNOMIAL);
        assert_eq!(CRC32_TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn check_value() {
        assert_eq!(crc32(0, b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32_update(0, b"123456789"), 0x2DFD_2D88);
    }

    #[test]
    fn empty_buffer() {
        for seed in [0, 1, 0xCBF4_3926, u32::MAX] {
            assert_eq!(crc32(seed, &[]), seed);
            assert_eq!(crc32_update(seed, &[]), seed);
        }
    }

    #[test]
    fn chaining() {
        let running = crc32(crc32(0, b"12345"), b"6789");
        assert_eq!(running, crc32(0, b"123456789"));

        let running = crc32_update(crc32_update(0, b"1234"), b"56789");
        assert_eq!(running, crc32_update(0, b"123456789"));
    }
}
