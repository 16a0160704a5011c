//! Stateful UTF-8 decoding for chunked byte streams
//!
//! Network chunks do not respect character boundaries. The decoder keeps the
//! trailing bytes of an incomplete multi-byte sequence and prepends them to the
//! next chunk, so a character split across two reads decodes exactly once.
//! Invalid sequences are replaced with U+FFFD, matching the browser's
//! non-fatal `TextDecoder`.

const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, holding back an incomplete trailing sequence
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if self.pending.is_empty() {
            return self.decode_owned(chunk);
        }
        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(chunk);
        self.decode_owned(&joined)
    }

    /// Flush whatever is still held back. Left-over bytes can only be a
    /// truncated sequence, so they decode to a replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        self.pending.clear();
        REPLACEMENT.to_string()
    }

    /// Bytes held back waiting for the rest of a character
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn decode_owned(&mut self, mut input: &[u8]) -> String {
        let mut output = String::with_capacity(input.len());

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    output.push_str(valid);
                    return output;
                }
                Err(error) => {
                    let (valid, rest) = input.split_at(error.valid_up_to());
                    // `valid_up_to` marks a valid prefix
                    output.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match error.error_len() {
                        Some(invalid_len) => {
                            output.push(REPLACEMENT);
                            input = &rest[invalid_len..];
                        }
                        None => {
                            // Incomplete sequence at the end of the input
                            self.pending.extend_from_slice(rest);
                            return output;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode(b"event: progress\n"), "event: progress\n");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let text = "Zürich → 東京 🚀";
        let bytes = text.as_bytes();

        for split in 0..=bytes.len() {
            let mut decoder = Utf8ChunkDecoder::new();
            let mut decoded = decoder.decode(&bytes[..split]);
            decoded.push_str(&decoder.decode(&bytes[split..]));
            decoded.push_str(&decoder.finish());
            assert_eq!(decoded, text, "split at byte {}", split);
        }
    }

    #[test]
    fn test_four_byte_char_fed_one_byte_at_a_time() {
        let mut decoder = Utf8ChunkDecoder::new();
        let mut decoded = String::new();
        for byte in "🚀".as_bytes() {
            decoded.push_str(&decoder.decode(&[*byte]));
        }
        assert_eq!(decoded, "🚀");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
    }

    #[test]
    fn test_truncated_sequence_flushed_on_finish() {
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode(&[b'x', 0xE6, 0x9D]), "x");
        assert_eq!(decoder.pending_len(), 2);
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.pending_len(), 0);
    }
}
