//! Splitting of long text into transport-sized chunks.
//!
//! Lengths are counted in `char`s. Whitespace-delimited tokens are packed
//! greedily, joined by single spaces; a token longer than the limit is cut
//! into hard slices of `max_length` chars.

/// Splits `text` into chunks of at most `max_length` chars.
///
/// - empty input yields no chunks
/// - input within the limit is returned unchanged as the only chunk
/// - otherwise tokens are packed greedily without breaking any token that fits
///
/// # Panics
///
/// Panics if `max_length` is zero.
pub fn split_into_chunks(text: &str, max_length: usize) -> Vec<String> {
    assert!(max_length > 0, "max_length must be positive");

    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for token in text.split_whitespace() {
        let token_len = token.chars().count();
        let separator = usize::from(current_len > 0);

        if current_len + separator + token_len <= max_length {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(token);
            current_len += separator + token_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if token_len > max_length {
            chunks.extend(hard_slices(token, max_length));
        } else {
            current.push_str(token);
            current_len = token_len;
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

/// Cuts a single token into consecutive pieces of `max_length` chars.
fn hard_slices(token: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    chars
        .chunks(max_length)
        .map(|piece| piece.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_into_chunks("", 10).is_empty());
    }

    #[test]
    fn short_text_is_returned_unchanged() {
        let text = "keep   this\nformatting";
        assert_eq!(split_into_chunks(text, 100), vec![text.to_string()]);
    }

    #[test]
    fn text_exactly_at_limit_is_single_chunk() {
        assert_eq!(split_into_chunks("abcde", 5), vec!["abcde".to_string()]);
    }

    #[test]
    fn packs_words_greedily() {
        let chunks = split_into_chunks("one two three four five", 9);
        assert_eq!(chunks, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn collapses_whitespace_between_packed_words() {
        let chunks = split_into_chunks("alpha\n\nbeta    gamma", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn long_token_is_hard_sliced() {
        let chunks = split_into_chunks("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn long_token_flushes_pending_line_first() {
        let chunks = split_into_chunks("hi abcdefgh yo", 4);
        assert_eq!(chunks, vec!["hi", "abcd", "efgh", "yo"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 6 chars, 12 bytes
        let chunks = split_into_chunks("ééé ééé", 3);
        assert_eq!(chunks, vec!["ééé", "ééé"]);
    }

    #[test]
    fn whitespace_only_text_over_limit_yields_nothing() {
        assert!(split_into_chunks("          ", 3).is_empty());
    }

    #[test]
    #[should_panic(expected = "max_length must be positive")]
    fn zero_limit_panics() {
        split_into_chunks("abc", 0);
    }

    proptest! {
        #[test]
        fn no_chunk_exceeds_limit(text in "[a-z ]{0,200}", max in 1usize..40) {
            for chunk in split_into_chunks(&text, max) {
                prop_assert!(chunk.chars().count() <= max);
            }
        }

        #[test]
        fn rejoining_reproduces_tokens(text in "[a-z]{1,12}( [a-z]{1,12}){0,30}", max in 12usize..40) {
            let chunks = split_into_chunks(&text, max);
            let rejoined = chunks.join(" ");
            let expected: Vec<&str> = text.split_whitespace().collect();
            let actual: Vec<&str> = rejoined.split_whitespace().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn oversized_tokens_mixed_with_packed_lines_keep_token_order(
            tokens in prop::collection::vec("[a-z]{1,50}", 1..30),
            max in 1usize..20,
        ) {
            let text = tokens.join(" ");
            let chunks = split_into_chunks(&text, max);
            let mut remaining = chunks.iter();
            let mut line: VecDeque<&str> = VecDeque::new();

            for token in &tokens {
                if token.chars().count() > max {
                    // Slices stand alone, after the pending line was flushed
                    prop_assert!(line.is_empty());
                    for slice in hard_slices(token, max) {
                        prop_assert_eq!(remaining.next(), Some(&slice));
                    }
                } else {
                    if line.is_empty() {
                        let chunk = remaining.next();
                        prop_assert!(chunk.is_some(), "ran out of chunks at {}", token);
                        line = chunk.into_iter().flat_map(|c| c.split(' ')).collect();
                    }
                    prop_assert_eq!(line.pop_front(), Some(token.as_str()));
                }
            }

            prop_assert!(line.is_empty());
            prop_assert!(remaining.next().is_none());
            prop_assert!(chunks.iter().all(|c| c.chars().count() <= max));
        }

        #[test]
        fn oversized_token_slices_into_ceil_pieces(token in "[a-z]{1,100}", max in 1usize..20) {
            prop_assume!(token.chars().count() > max);
            let chunks = split_into_chunks(&token, max);
            let expected_pieces = (token.chars().count() + max - 1) / max;
            prop_assert_eq!(chunks.len(), expected_pieces);
            prop_assert_eq!(chunks.concat(), token);
        }

        #[test]
        fn rechunking_a_chunk_is_identity(text in "[a-z ]{0,200}", max in 1usize..40) {
            for chunk in split_into_chunks(&text, max) {
                prop_assert_eq!(split_into_chunks(&chunk, max), vec![chunk.clone()]);
            }
        }
    }
}
