//! Self-reported age ("I'm 24", "I am 31 years old", "I'm 19yo").
//!
//! Nothing is required after the number, so "25yrs" reads as 25. The digit
//! run is greedy up to three, so "I'm 123" is read whole and rejected.

use std::sync::LazyLock;

use regex::Regex;

static AGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bI(?:['’]m| am)\s+(\d{2,3})").expect("valid regex")
});

const MIN_AGE: u32 = 15;
const MAX_AGE: u32 = 80;

/// First plausible self-reported age, looking at the first match of each text.
pub fn infer_age<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<u32> {
    texts.into_iter().find_map(|text| {
        let captures = AGE_PATTERN.captures(text)?;
        let age: u32 = captures.get(1)?.as_str().parse().ok()?;
        (MIN_AGE..=MAX_AGE).contains(&age).then_some(age)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phrasings() {
        assert_eq!(infer_age(["I'm 24 and new here"]), Some(24));
        assert_eq!(infer_age(["i am 31 years old"]), Some(31));
        assert_eq!(infer_age(["I’m 19yo lol"]), Some(19));
    }

    #[test]
    fn accepts_suffix_glued_to_number() {
        assert_eq!(infer_age(["I'm 25years old"]), Some(25));
        assert_eq!(infer_age(["I am 25yrs and tired"]), Some(25));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(infer_age(["I'm 12"]), None);
        assert_eq!(infer_age(["I'm 95"]), None);
        assert_eq!(infer_age(["I'm 123 percent sure"]), None);
    }

    #[test]
    fn first_accepted_text_wins() {
        assert_eq!(infer_age(["I'm 12", "no age", "I am 40", "I'm 22"]), Some(40));
    }

    #[test]
    fn only_first_match_per_text() {
        assert_eq!(infer_age(["I'm 10 now, I'm 30 later"]), None);
    }
}
