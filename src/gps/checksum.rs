// src/gps/checksum.rs
//! NMEA checksum verification (`$...*HH`)

/// Result of checking a sentence's checksum.
///
/// `Incomplete` and `Mismatch` are kept apart because they are different
/// failure populations: the first is structurally broken text, the second is
/// a well-formed sentence that was corrupted in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumOutcome {
    Ok,
    /// Missing `$`, missing `*`, or no two hex digits after `*`
    Incomplete,
    Mismatch,
}

/// XOR of every byte in `body`
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, b| acc ^ b)
}

/// Verify the checksum of a single sentence.
///
/// The line must already be stripped of its trailing carriage return. The
/// XOR covers every byte strictly between the leading `$` and the last `*`.
pub fn verify(line: &str) -> ChecksumOutcome {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'$') {
        return ChecksumOutcome::Incomplete;
    }

    let star = match line.rfind('*') {
        Some(idx) => idx,
        None => return ChecksumOutcome::Incomplete,
    };
    if star + 3 > bytes.len() {
        return ChecksumOutcome::Incomplete;
    }

    let declared = match parse_hex_byte(bytes[star + 1], bytes[star + 2]) {
        Some(value) => value,
        None => return ChecksumOutcome::Incomplete,
    };

    if checksum(&bytes[1..star]) == declared {
        ChecksumOutcome::Ok
    } else {
        ChecksumOutcome::Mismatch
    }
}

fn parse_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
