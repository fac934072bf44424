//! Text measurement for the standard Helvetica faces.
//!
//! Widths come from the Adobe font metrics of Helvetica and Helvetica-Bold,
//! in thousandths of an em, for the printable ASCII range. Accented Latin
//! letters measure as their base letter.

use super::canvas::FontWeight;

const PT_TO_MM: f64 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn base_letter(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' => 'a',
        'À' | 'Â' | 'Ä' | 'Á' | 'Ã' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'î' | 'ï' | 'í' | 'ì' => 'i',
        'Î' | 'Ï' | 'Í' | 'Ì' => 'I',
        'ô' | 'ö' | 'ó' | 'ò' | 'õ' => 'o',
        'Ô' | 'Ö' | 'Ó' | 'Ò' | 'Õ' => 'O',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'Ù' | 'Û' | 'Ü' | 'Ú' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ÿ' => 'y',
        '\u{2019}' | '\u{2018}' => '\'',
        '\u{a0}' => ' ',
        other => other,
    }
}

/// Width of one character in thousandths of an em.
#[must_use]
pub fn char_units(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &REGULAR,
        FontWeight::Bold => &BOLD,
    };
    match c {
        'œ' | 'Œ' | 'æ' | 'Æ' => 944,
        '…' | '—' => 1000,
        '–' => 556,
        _ => {
            let code = base_letter(c) as u32;
            code.checked_sub(32)
                .and_then(|i| table.get(i as usize))
                .copied()
                .unwrap_or(FALLBACK_WIDTH)
        }
    }
}

/// Width of `text` in millimetres at `size_pt`.
#[must_use]
pub fn text_width(text: &str, weight: FontWeight, size_pt: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_units(c, weight))).sum();
    f64::from(units) / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Explicit newlines start a new line. A word wider than the limit is
/// broken between characters. Only an empty paragraph yields an empty line.
#[must_use]
pub fn wrap_text(text: &str, weight: FontWeight, size_pt: f64, max_width: f64) -> Vec<String> {
    let fits = |candidate: &str| text_width(candidate, weight, size_pt) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // Break an oversized word into chunks.
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && !fits(&next) {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(char_units('A', FontWeight::Normal), 667);
        assert_eq!(char_units('A', FontWeight::Bold), 722);
        assert_eq!(char_units('é', FontWeight::Normal), char_units('e', FontWeight::Normal));
        assert_eq!(char_units('字', FontWeight::Bold), FALLBACK_WIDTH);

        // 1000 units at 72pt is one inch.
        let width = text_width("MM", FontWeight::Bold, 36.0);
        assert!((width - 2.0 * 833.0 / 1000.0 * 36.0 * PT_TO_MM).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(
            wrap_text("Le marché", FontWeight::Bold, 16.0, 80.0),
            vec!["Le marché".to_string()]
        );
        assert_eq!(wrap_text("", FontWeight::Normal, 8.0, 10.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap_text(
            "Une histoire qui se passe dans un sous-marin en panne",
            FontWeight::Bold,
            13.0,
            40.0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontWeight::Bold, 13.0) <= 40.0);
        }
        assert_eq!(
            lines.join(" "),
            "Une histoire qui se passe dans un sous-marin en panne"
        );
    }

    #[test]
    fn test_wrap_breaks_long_word_and_newlines() {
        let lines = wrap_text("aaaaaaaaaaaaaaaaaaaa", FontWeight::Normal, 12.0, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "aaaaaaaaaaaaaaaaaaaa");

        let lines = wrap_text("un\ndeux", FontWeight::Normal, 8.0, 100.0);
        assert_eq!(lines, vec!["un".to_string(), "deux".to_string()]);
    }
}
