/// Format a byte count as a human-readable size string (e.g., "8 KB", "2 MB").
///
/// Uses exact integer division. Values that aren't clean multiples of KB/MB
/// are shown in bytes.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes.is_multiple_of(1024 * 1024) {
        format!("{} MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 && bytes.is_multiple_of(1024) {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Read a zero-padded ASCII field from a header.
///
/// Stops at the first null byte and drops non-printable characters.
/// Trailing spaces are trimmed since some titles pad with 0x20.
pub fn read_ascii(buf: &[u8]) -> String {
    let s: String = buf
        .iter()
        .take_while(|&&b| b != 0)
        .filter(|&&b| (0x20..0x7F).contains(&b))
        .map(|&b| b as char)
        .collect();
    s.trim_end().to_string()
}

/// Render bytes as uppercase hex pairs separated by spaces.
pub fn hex_bytes(buf: &[u8]) -> String {
    buf.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(8192), "8 KB");
        assert_eq!(format_bytes(0x4000), "16 KB");
        assert_eq!(format_bytes(262144), "256 KB");
        assert_eq!(format_bytes(1048576), "1 MB");
        assert_eq!(format_bytes(8 * 1024 * 1024), "8 MB");
        assert_eq!(format_bytes(1025), "1025 bytes");
    }

    #[test]
    fn test_read_ascii() {
        assert_eq!(read_ascii(b"POKEMON RED\0\0\0\0\0"), "POKEMON RED");
        assert_eq!(read_ascii(b"\x01\x02ABC"), "ABC");
        assert_eq!(read_ascii(b"TETRIS   "), "TETRIS");
        assert_eq!(read_ascii(b""), "");
        assert_eq!(read_ascii(b"\0ABC"), "");
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(hex_bytes(&[0x01, 0xAB, 0x00]), "01 AB 00");
        assert_eq!(hex_bytes(&[]), "");
    }
}
