//! Console summary rendering

use std::fmt::Write;

use crate::types::GradeHistogram;

/// Render the score distribution, one line per score, ascending.
///
/// Each line is the score right-aligned in ten columns followed by one `*`
/// per student, e.g. `"         7 **"`.
pub fn render_histogram(histogram: &GradeHistogram) -> String {
    let mut output = String::new();
    for (score, count) in histogram.iter() {
        let _ = writeln!(output, "{:>10} {}", score, "*".repeat(count as usize));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ascending_with_star_counts() {
        let mut h = GradeHistogram::new();
        for points in [7, 7, 3] {
            h.record(points);
        }

        let rendered = render_histogram(&h);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["         3 *", "         7 **"]);
    }

    #[test]
    fn test_render_empty_histogram() {
        assert_eq!(render_histogram(&GradeHistogram::new()), "");
    }

    #[test]
    fn test_wide_scores_still_aligned() {
        let mut h = GradeHistogram::new();
        h.record(100);
        let rendered = render_histogram(&h);
        assert_eq!(rendered, "       100 *\n");
    }
}
