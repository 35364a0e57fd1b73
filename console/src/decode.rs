//! Incremental UTF-8 decoding for streamed response chunks.
//!
//! HTTP chunk boundaries do not respect character boundaries, so a chunk
//! may end mid-sequence. The carry buffer holds the incomplete tail until
//! the next chunk completes it.

#[derive(Debug, Default)]
pub struct Utf8Carry {
    carry: Vec<u8>,
}

impl Utf8Carry {
    /// Decode as much of `input` (plus any carried bytes) as possible.
    ///
    /// Invalid sequences decode to U+FFFD; an incomplete trailing sequence
    /// is held back for the next call.
    pub fn push(&mut self, input: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(input);

        let mut out = String::new();
        loop {
            match std::str::from_utf8(&buf) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&buf[..valid]) {
                        out.push_str(text);
                    }
                    match e.error_len() {
                        Some(bad) => {
                            out.push('\u{FFFD}');
                            buf.drain(..valid + bad);
                        }
                        None => {
                            // Incomplete tail; keep it for the next chunk.
                            self.carry = buf.split_off(valid);
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Drain any leftover bytes at end of stream.
    pub fn flush(&mut self) -> String {
        if self.carry.is_empty() {
            return String::new();
        }
        let leftover = std::mem::take(&mut self.carry);
        String::from_utf8_lossy(&leftover).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_straight_through() {
        let mut decoder = Utf8Carry::default();
        assert_eq!(decoder.push(b"hello\n"), "hello\n");
        assert_eq!(decoder.flush(), "");
    }

    #[test]
    fn multibyte_split_across_chunks_is_reassembled() {
        // U+3042 HIRAGANA A is e3 81 82.
        let mut decoder = Utf8Carry::default();
        assert_eq!(decoder.push(&[0xE3, 0x81]), "");
        assert_eq!(decoder.push(&[0x82, b'\n']), "\u{3042}\n");
    }

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let mut decoder = Utf8Carry::default();
        assert_eq!(decoder.push(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn flush_drains_an_unfinished_sequence() {
        let mut decoder = Utf8Carry::default();
        assert_eq!(decoder.push(&[0xE3, 0x81]), "");
        assert_eq!(decoder.flush(), "\u{FFFD}");
    }
}
