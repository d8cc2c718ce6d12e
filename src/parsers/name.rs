use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z ]+").expect("Invalid name filter regex")
});

/// Reduce a car name to uppercase ASCII letters separated by single spaces.
///
/// Digits, punctuation and accented letters become word breaks, so
/// `"Rolls-Royce Cullinan (2021)"` turns into `"ROLLS ROYCE CULLINAN"`.
pub fn clean_car_name(raw: &str) -> String {
    let letters = NON_LETTERS.replace_all(raw, " ");
    letters
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Title-case a supplied brand: uppercase the first letter of each
/// alphabetic run and lowercase the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}
