//! Grade extraction from check-run output text
//!
//! The autograder convention puts the score in the second whitespace-delimited
//! token of the run's free text, as `points/possible` — e.g. `"Score: 7/10"`
//! or `"Result 3/5 (see log)"`. Anything after the second token is ignored.

use thiserror::Error;

/// A parsed `points/possible` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Awarded points
    pub points: i64,
    /// Maximum points
    pub possible: i64,
}

/// Why a check run's text did not yield a score.
///
/// Every variant is recoverable: the harvester skips the commit and keeps
/// scanning older ones.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreParseError {
    /// Text has fewer than two whitespace-delimited tokens
    #[error("no score token in check-run text")]
    MissingToken,
    /// The score token has no `/` separator
    #[error("score token '{0}' has no '/' separator")]
    MissingSeparator(String),
    /// One side of the `/` is not an integer
    #[error("score field '{0}' is not an integer")]
    NonInteger(String),
}

/// Parse a check run's output text into a [`Score`].
///
/// Splits on whitespace, takes the second token, splits that on `/` and
/// parses the first two fields as integers. Extra `/`-separated fields are
/// ignored, matching the lenient convention graders actually produce.
pub fn parse_score_text(text: &str) -> Result<Score, ScoreParseError> {
    let token = text
        .split_whitespace()
        .nth(1)
        .ok_or(ScoreParseError::MissingToken)?;

    let mut fields = token.split('/');
    let points_field = fields.next().unwrap_or_default();
    let possible_field = fields
        .next()
        .ok_or_else(|| ScoreParseError::MissingSeparator(token.to_string()))?;

    let points = points_field
        .parse::<i64>()
        .map_err(|_| ScoreParseError::NonInteger(points_field.to_string()))?;
    let possible = possible_field
        .parse::<i64>()
        .map_err(|_| ScoreParseError::NonInteger(possible_field.to_string()))?;

    Ok(Score { points, possible })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_standard_score_line() {
        assert_eq!(
            parse_score_text("Score: 7/10"),
            Ok(Score {
                points: 7,
                possible: 10
            })
        );
    }

    #[test]
    fn test_parse_alternate_label() {
        assert_eq!(
            parse_score_text("Result 3/5"),
            Ok(Score {
                points: 3,
                possible: 5
            })
        );
    }

    #[test]
    fn test_trailing_text_ignored() {
        assert_eq!(
            parse_score_text("Grade: 18/20 — autograder run #4 passed"),
            Ok(Score {
                points: 18,
                possible: 20
            })
        );
    }

    #[test]
    fn test_extra_slash_fields_ignored() {
        // "7/10/extra" still yields 7/10
        assert_eq!(
            parse_score_text("Score: 7/10/extra"),
            Ok(Score {
                points: 7,
                possible: 10
            })
        );
    }

    #[test]
    fn test_single_token_is_missing_token() {
        // The score must be the SECOND token; a bare "7/10" has no label
        assert_matches!(parse_score_text("7/10"), Err(ScoreParseError::MissingToken));
        assert_matches!(parse_score_text(""), Err(ScoreParseError::MissingToken));
        assert_matches!(
            parse_score_text("   \t  "),
            Err(ScoreParseError::MissingToken)
        );
    }

    #[test]
    fn test_no_separator() {
        assert_matches!(
            parse_score_text("Score: abc"),
            Err(ScoreParseError::MissingSeparator(t)) if t == "abc"
        );
    }

    #[test]
    fn test_non_integer_fields() {
        assert_matches!(
            parse_score_text("Score: a/10"),
            Err(ScoreParseError::NonInteger(f)) if f == "a"
        );
        assert_matches!(
            parse_score_text("Score: 7/"),
            Err(ScoreParseError::NonInteger(f)) if f.is_empty()
        );
        assert_matches!(
            parse_score_text("Score: 7/b"),
            Err(ScoreParseError::NonInteger(f)) if f == "b"
        );
    }

    #[test]
    fn test_negative_points_accepted() {
        // Rubrics with penalties can go below zero; int parsing allows it
        assert_eq!(
            parse_score_text("Score: -2/10"),
            Ok(Score {
                points: -2,
                possible: 10
            })
        );
    }
}
