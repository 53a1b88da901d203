//! Date bubbles, which OCR may split into one, two or three fragments on a single line.
use crate::cursor::TokenCursor;
use crate::geometry::same_line;
use crate::patterns::Patterns;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Fragments joined by single spaces, e.g. `"12 Jan 2023"`.
    pub text: String,
    /// Number of tokens the date spans.
    pub consumed: usize,
}

/// Tries the known date layouts at the cursor, most specific first. Does not move the cursor.
pub fn match_date(
    cursor: &TokenCursor<'_>,
    patterns: &Patterns,
    line_tolerance: f32,
) -> Option<DateMatch> {
    let first = cursor.peek(0)?;
    let t1 = first.text.as_str();

    // "12 Jan 2023"
    if patterns.full_date.is_match(t1) {
        return Some(DateMatch {
            text: t1.to_string(),
            consumed: 1,
        });
    }

    let on_line = |offset: usize| {
        cursor
            .peek(offset)
            .filter(|t| same_line(first.quad(), t.quad(), line_tolerance))
            .map(|t| t.text.as_str())
    };

    // "12 Jan" | "2023"
    if patterns.day_month.is_match(t1) {
        if let Some(t2) = on_line(1).filter(|t2| patterns.year.is_match(t2)) {
            return Some(DateMatch {
                text: format!("{} {}", t1, t2),
                consumed: 2,
            });
        }
    }

    if !patterns.day.is_match(t1) {
        return None;
    }

    // "12" | "Jan 2023"
    if let Some(t2) = on_line(1).filter(|t2| patterns.month_year.is_match(t2)) {
        return Some(DateMatch {
            text: format!("{} {}", t1, t2),
            consumed: 2,
        });
    }

    // "12" | "Jan" | "2023"
    match (on_line(1), on_line(2)) {
        (Some(t2), Some(t3)) if patterns.month.is_match(t2) && patterns.year.is_match(t3) => {
            Some(DateMatch {
                text: format!("{} {} {}", t1, t2, t3),
                consumed: 3,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlift_ocr::{Detection, Quad};

    fn det(text: &str, x: f32, y: f32) -> Detection {
        Detection::new(Quad::from_rect(x, y - 10.0, 60.0, 20.0), text, 0.9)
    }

    fn run(dets: &[Detection]) -> Option<DateMatch> {
        let ordered: Vec<&Detection> = dets.iter().collect();
        let cursor = TokenCursor::new(&ordered);
        match_date(&cursor, Patterns::get(), 10.0)
    }

    #[test]
    fn test_single_token_date() {
        let m = run(&[det("12  Jan 2023", 400.0, 300.0)]).unwrap();
        assert_eq!(m.text, "12 Jan 2023");
        assert_eq!(m.consumed, 1);
    }

    #[test]
    fn test_day_month_then_year() {
        let m = run(&[det("5 March", 380.0, 300.0), det("2024", 460.0, 302.0)]).unwrap();
        assert_eq!(m, DateMatch { text: "5 March 2024".into(), consumed: 2 });
    }

    #[test]
    fn test_day_then_month_year() {
        let m = run(&[det("05", 380.0, 300.0), det("Mar 2024", 420.0, 298.0)]).unwrap();
        assert_eq!(m, DateMatch { text: "05 Mar 2024".into(), consumed: 2 });
    }

    #[test]
    fn test_three_fragments() {
        let m = run(&[
            det("31", 380.0, 300.0),
            det("December", 420.0, 300.0),
            det("1999", 500.0, 305.0),
        ])
        .unwrap();
        assert_eq!(m, DateMatch { text: "31 December 1999".into(), consumed: 3 });
    }

    #[test]
    fn test_year_on_next_line_is_not_a_date() {
        assert_eq!(run(&[det("12 Jan", 380.0, 300.0), det("2023", 380.0, 340.0)]), None);
    }

    #[test]
    fn test_three_fragments_require_same_line() {
        assert_eq!(
            run(&[
                det("12", 380.0, 300.0),
                det("Jan", 420.0, 300.0),
                det("2023", 380.0, 350.0),
            ]),
            None
        );
    }

    #[test]
    fn test_bare_day_alone_is_message_text() {
        assert_eq!(run(&[det("12", 380.0, 300.0)]), None);
        assert_eq!(run(&[det("12", 380.0, 300.0), det("apples", 420.0, 300.0)]), None);
    }

    #[test]
    fn test_lowercase_month_is_rejected() {
        assert_eq!(run(&[det("12 jan 2023", 400.0, 300.0)]), None);
    }

    #[test]
    fn test_empty_cursor() {
        assert_eq!(run(&[]), None);
    }
}
