//! Chunk-boundary tests for the frame decoder
//!
//! The network may cut the stream anywhere: inside a multi-byte character,
//! inside a field name, or between the two newlines of a delimiter. The frames
//! recovered must not depend on where those cuts fall.

#[cfg(test)]
mod tests {
    use crate::services::client::ProgressStatus;
    use crate::services::streaming::{interpret_frame, parse_frame, SseFrameDecoder, StreamEvent};

    const STREAM: &str = concat!(
        "event: progress\n",
        "data: {\"step\":\"platform\",\"status\":\"started\",\"label\":\"Plateforme ✓\"}\n\n",
        "event: progress\n",
        "data: {\"step\":\"platform\",\"status\":\"completed\"}\n\n",
        ": keep-alive\n\n",
        "event: result\n",
        "data: {\"status\":\"ok\",\"schema\":\"maSMP\",\"results\":{\"name\":\"日本語リポジトリ\"}}\n\n",
    );

    fn decode_in_chunks(bytes: &[u8], cuts: &[usize]) -> Vec<StreamEvent> {
        let mut decoder = SseFrameDecoder::new();
        let mut blocks = Vec::new();
        let mut start = 0;
        let end = bytes.len();
        for &cut in cuts.iter().chain(std::iter::once(&end)) {
            blocks.extend(decoder.feed(&bytes[start..cut]));
            start = cut;
        }
        blocks.extend(decoder.finish());

        blocks
            .iter()
            .filter_map(|block| parse_frame(block))
            .map(|frame| interpret_frame(&frame).unwrap())
            .collect()
    }

    #[test]
    fn test_single_chunk_baseline() {
        let events = decode_in_chunks(STREAM.as_bytes(), &[]);
        assert_eq!(events.len(), 3);

        match &events[0] {
            StreamEvent::Progress(event) => {
                assert_eq!(event.status, ProgressStatus::Started);
                assert_eq!(event.label, "Plateforme ✓");
            }
            other => panic!("unexpected event {:?}", other),
        }
        match &events[2] {
            StreamEvent::Result(result) => {
                assert_eq!(result.results["name"], "日本語リポジトリ");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    /// Every single cut position yields the same events as one chunk
    #[test]
    fn test_every_two_way_split_matches_baseline() {
        let bytes = STREAM.as_bytes();
        let baseline = decode_in_chunks(bytes, &[]);

        for cut in 0..=bytes.len() {
            assert_eq!(
                decode_in_chunks(bytes, &[cut]),
                baseline,
                "split at byte {} changed the decoded events",
                cut
            );
        }
    }

    #[test]
    fn test_byte_at_a_time_matches_baseline() {
        let bytes = STREAM.as_bytes();
        let cuts: Vec<usize> = (1..bytes.len()).collect();
        assert_eq!(decode_in_chunks(bytes, &cuts), decode_in_chunks(bytes, &[]));
    }

    #[test]
    fn test_split_inside_multibyte_character() {
        let bytes = STREAM.as_bytes();
        let start = STREAM.find('日').unwrap();
        // '日' is three bytes; cut after the first and after the second
        let events = decode_in_chunks(bytes, &[start + 1, start + 2]);
        assert_eq!(events, decode_in_chunks(bytes, &[]));
    }

    #[test]
    fn test_split_between_delimiter_newlines() {
        let bytes = STREAM.as_bytes();
        let first_delimiter = STREAM.find("\n\n").unwrap();
        let events = decode_in_chunks(bytes, &[first_delimiter + 1]);
        assert_eq!(events, decode_in_chunks(bytes, &[]));
    }

    #[test]
    fn test_split_inside_field_name() {
        let bytes = STREAM.as_bytes();
        let result_event = STREAM.find("event: result").unwrap();
        let events = decode_in_chunks(bytes, &[result_event + 3, result_event + 9]);
        assert_eq!(events, decode_in_chunks(bytes, &[]));
    }
}
