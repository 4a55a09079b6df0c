const BYTES_PER_LINE: usize = 16;

/// Formats bytes as offset, hex and printable ASCII columns.
///
/// # Examples
/// ```
/// use loracfg_core::hex_dump;
///
/// let dump = hex_dump(&[0xC1, 0x41]);
/// assert!(dump.starts_with("0000  c1 41 "));
/// assert!(dump.ends_with(" |.A|"));
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(line, chunk)| {
            let hex: Vec<String> = chunk
                .iter()
                .map(|byte| base16::encode_lower(&[*byte]))
                .collect();
            let ascii: String = chunk
                .iter()
                .map(|byte| {
                    if byte.is_ascii_graphic() || *byte == b' ' {
                        char::from(*byte)
                    } else {
                        '.'
                    }
                })
                .collect();
            format!(
                "{:04x}  {:<width$} |{}|",
                line * BYTES_PER_LINE,
                hex.join(" "),
                ascii,
                width = BYTES_PER_LINE * 3
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
