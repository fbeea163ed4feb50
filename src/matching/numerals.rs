use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::title::{title_text, AsTitle};

/// Plain or decimal arabic number. ASCII digits only, so every match parses.
static ARABIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+|[0-9]+").expect("arabic numeral pattern"));

/// Subtractive roman numerals from I to MMMCMXCIX on word boundaries.
///
/// Each alternative forces one of the thousands/hundreds/tens/units groups
/// to be non-empty so the empty string never matches.
static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:",
        r"M{1,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})",
        r"|M{0,3}(?:CM|C?D|D?C{1,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})",
        r"|M{0,3}(?:CM|CD|D?C{0,3})(?:XC|X?L|L?X{1,3})(?:IX|IV|V?I{0,3})",
        r"|M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|I?V|V?I{1,3})",
        r")\b"
    ))
    .expect("roman numeral pattern")
});

static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("space run pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralKind {
    Number,
    Year,
    Roman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralPosition {
    Start,
    Middle,
    End,
}

/// A numeral found in a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Numeral {
    pub kind: NumeralKind,
    /// Resolved value; years keep only their last two digits
    pub value: f64,
    pub position: NumeralPosition,
    /// Character offset of the first occurrence of `raw`
    pub offset: usize,
    /// Matched text as it appears in the title
    pub raw: String,
}

/// All arabic and roman numerals in `a`, rightmost first.
///
/// Offsets refer to the first occurrence of each matched text. Arabic
/// numerals sort ahead of roman ones that share an offset.
pub fn extract_numerals(a: impl AsTitle) -> Vec<Numeral> {
    let text = title_text(&a);

    let mut numerals: Vec<Numeral> = ARABIC_RE
        .find_iter(text)
        .filter_map(|m| {
            let (kind, value) = classify_arabic(m.as_str())?;
            Some(locate(text, m.as_str(), kind, value))
        })
        .collect();

    numerals.extend(ROMAN_RE.find_iter(text).filter_map(|m| {
        let value = roman_to_int(m.as_str());
        if value.is_none() {
            log::error!("Roman pattern matched unparseable token '{}'", m.as_str());
        }
        Some(locate(text, m.as_str(), NumeralKind::Roman, f64::from(value?)))
    }));

    // stable: ties keep scan order
    numerals.sort_by(|x, y| y.offset.cmp(&x.offset));
    numerals
}

/// Deletes every arabic and roman numeral and tidies the leftover spacing
pub fn remove_all_numerals(a: impl AsTitle) -> String {
    let text = title_text(&a);
    let without_arabic = ARABIC_RE.replace_all(text, "");
    let without_roman = ROMAN_RE.replace_all(&without_arabic, "");
    let collapsed = SPACE_RUN_RE.replace_all(&without_roman, " ");
    collapsed.replace(" :", ":").trim().to_string()
}

fn classify_arabic(raw: &str) -> Option<(NumeralKind, f64)> {
    let is_decimal = raw.contains('.');
    let first = raw.chars().next()?;

    if !is_decimal && raw.len() == 4 && matches!(first, '1' | '2') {
        return Some((NumeralKind::Year, f64::from(raw[2..].parse::<u8>().ok()?)));
    }
    if !is_decimal && raw.len() == 2 && matches!(first, '8' | '9' | '0') {
        return Some((NumeralKind::Year, f64::from(raw.parse::<u8>().ok()?)));
    }

    match raw.parse::<f64>() {
        Ok(value) => Some((NumeralKind::Number, value)),
        Err(e) => {
            log::error!("Arabic pattern matched unparseable token '{}': {}", raw, e);
            None
        }
    }
}

fn locate(text: &str, raw: &str, kind: NumeralKind, value: f64) -> Numeral {
    let byte_offset = text.find(raw).unwrap_or(0);

    let position = if byte_offset == 0 {
        NumeralPosition::Start
    } else if byte_offset + raw.len() == text.len() {
        NumeralPosition::End
    } else {
        NumeralPosition::Middle
    };

    Numeral {
        kind,
        value,
        position,
        offset: text[..byte_offset].chars().count(),
        raw: raw.to_string(),
    }
}

/// Integer value of a well-formed roman numeral
fn roman_to_int(roman: &str) -> Option<u32> {
    let digit = |c: char| match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    };

    let digits = roman.chars().map(digit).collect::<Option<Vec<u32>>>()?;
    if digits.is_empty() {
        return None;
    }

    let mut total = 0;
    for (i, &value) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if next > value => total -= value as i64,
            _ => total += value as i64,
        }
    }

    u32::try_from(total).ok().filter(|&v| v > 0)
}
