//! Natural ordering of file names.
//!
//! Names are split into alternating text and digit runs. Text runs compare
//! case-insensitively, digit runs compare by numeric value, so `rec2.csv`
//! sorts before `rec10.csv`.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Number(&'a str),
}

/// Split into runs, always starting with a (possibly empty) text run.
fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = s;

    loop {
        let text_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        tokens.push(Token::Text(&rest[..text_end]));
        rest = &rest[text_end..];
        if rest.is_empty() {
            break;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        tokens.push(Token::Number(rest[..digits_end].trim_start_matches('0')));
        rest = &rest[digits_end..];
        if rest.is_empty() {
            tokens.push(Token::Text(""));
            break;
        }
    }

    tokens
}

/// Compare two digit runs with leading zeros already stripped.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two text runs ignoring case.
fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn cmp_tokens(a: &Token<'_>, b: &Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Text(a), Token::Text(b)) => cmp_text(a, b),
        (Token::Number(a), Token::Number(b)) => cmp_numeric(a, b),
        // Runs alternate from a text run, so mixed pairs only arise if the
        // tokenizer changes; keep a total order anyway.
        (Token::Number(_), Token::Text(_)) => Ordering::Less,
        (Token::Text(_), Token::Number(_)) => Ordering::Greater,
    }
}

/// Natural-order comparison of two strings.
///
/// Names equal under the natural key (`File01` vs `file1`) fall back to plain
/// string order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);

    ta.iter()
        .zip(tb.iter())
        .map(|(x, y)| cmp_tokens(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| ta.len().cmp(&tb.len()))
        .then_with(|| a.cmp(b))
}

/// Collector output order: common name, then natural order of the file name.
pub fn detection_order(
    common_a: &str,
    file_a: &str,
    common_b: &str,
    file_b: &str,
) -> Ordering {
    common_a
        .cmp(common_b)
        .then_with(|| natural_cmp(file_a, file_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(
            sorted(vec!["f2.csv", "f10.csv", "f1.csv"]),
            vec!["f1.csv", "f2.csv", "f10.csv"]
        );
    }

    #[test]
    fn test_text_runs_ignore_case() {
        assert_eq!(
            sorted(vec!["b1.csv", "A2.csv", "a1.csv"]),
            vec!["a1.csv", "A2.csv", "b1.csv"]
        );
    }

    #[test]
    fn test_text_runs_compare_unicode_case_insensitively() {
        assert_eq!(natural_cmp("Öst2", "öst10"), Ordering::Less);
        assert_eq!(cmp_text("ÄBC", "äbc"), Ordering::Equal);
    }

    #[test]
    fn test_multiple_numeric_runs() {
        assert_eq!(
            sorted(vec!["site2_rec10", "site2_rec9", "site10_rec1"]),
            vec!["site2_rec9", "site2_rec10", "site10_rec1"]
        );
    }

    #[test]
    fn test_leading_zeros_and_long_numbers() {
        assert_eq!(natural_cmp("rec007", "rec7"), "rec007".cmp("rec7"));
        assert_eq!(
            natural_cmp("x99999999999999999999999", "x100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("rec", "rec1"), Ordering::Less);
        assert_eq!(natural_cmp("rec1", "rec1a"), Ordering::Less);
    }

    #[test]
    fn test_tokenize_starts_with_text() {
        let tokens = tokenize("12ab");
        assert_eq!(
            tokens,
            vec![
                Token::Text(""),
                Token::Number("12"),
                Token::Text("ab")
            ]
        );
    }

    #[test]
    fn test_detection_order_species_first() {
        assert_eq!(
            detection_order("Crow", "f10.csv", "Magpie", "f1.csv"),
            Ordering::Less
        );
        assert_eq!(
            detection_order("Crow", "f10.csv", "Crow", "f2.csv"),
            Ordering::Greater
        );
    }
}
