//! Property-based tests for grade-text parsing

use classkit_core::harvest::{parse_score_text, Score};
use proptest::prelude::*;

proptest! {
    /// Any well-formed "label points/possible" line parses to exactly
    /// the embedded pair.
    #[test]
    fn well_formed_score_lines_round_trip(
        label in "[A-Za-z]{1,12}:?",
        points in any::<i64>(),
        possible in any::<i64>(),
    ) {
        let text = format!("{} {}/{}", label, points, possible);
        prop_assert_eq!(
            parse_score_text(&text),
            Ok(Score { points, possible })
        );
    }

    /// Trailing tokens never change the parsed score.
    #[test]
    fn trailing_tokens_are_ignored(
        points in -1000i64..1000,
        possible in -1000i64..1000,
        trailer in "[ -~]{0,40}",
    ) {
        let text = format!("Score: {}/{} {}", points, possible, trailer);
        prop_assert_eq!(
            parse_score_text(&text),
            Ok(Score { points, possible })
        );
    }

    /// Arbitrary text never panics — it parses or returns a typed error.
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC*") {
        let _ = parse_score_text(&text);
    }

    /// Text with fewer than two tokens never yields a score.
    #[test]
    fn single_token_never_parses(token in "[!-~]{1,20}") {
        prop_assert!(parse_score_text(&token).is_err());
    }
}
