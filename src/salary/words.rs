const UNITS: &[&str] = &[
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const TEENS: &[&str] = &[
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];
const TENS: &[&str] = &[
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scale words by chunk position, least significant first. Chunks past
/// "million" render without a scale word; salary ranges never reach them.
const SCALES: &[&str] = &["", "thousand", "million"];

/// English words for `amount`, e.g. `21` -> `"twenty-one"`.
pub fn words_of(amount: u64) -> String {
    if amount == 0 {
        return "zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = amount;
    let mut position = 0usize;
    while rest > 0 {
        let chunk = (rest % 1000) as usize;
        if chunk > 0 {
            let mut words = chunk_words(chunk);
            if let Some(scale) = SCALES.get(position).filter(|s| !s.is_empty()) {
                words.push(' ');
                words.push_str(scale);
            }
            parts.push(words);
        }
        rest /= 1000;
        position += 1;
    }

    parts.reverse();
    parts.join(" ")
}

fn chunk_words(chunk: usize) -> String {
    let hundreds = chunk / 100;
    let remainder = chunk % 100;

    let mut out: Vec<String> = Vec::new();
    if hundreds > 0 {
        out.push(format!("{} hundred", UNITS[hundreds]));
    }
    if remainder >= 20 {
        let unit = remainder % 10;
        if unit > 0 {
            out.push(format!("{}-{}", TENS[remainder / 10], UNITS[unit]));
        } else {
            out.push(TENS[remainder / 10].to_string());
        }
    } else if remainder >= 10 {
        out.push(TEENS[remainder - 10].to_string());
    } else if remainder > 0 {
        out.push(UNITS[remainder].to_string());
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::words_of;

    #[test]
    fn renders_reference_values() {
        assert_eq!(words_of(0), "zero");
        assert_eq!(words_of(7), "seven");
        assert_eq!(words_of(13), "thirteen");
        assert_eq!(words_of(21), "twenty-one");
        assert_eq!(words_of(40), "forty");
        assert_eq!(words_of(100), "one hundred");
        assert_eq!(words_of(300), "three hundred");
        assert_eq!(words_of(1000), "one thousand");
        assert_eq!(words_of(1_000_000), "one million");
        assert_eq!(
            words_of(999_999),
            "nine hundred ninety-nine thousand nine hundred ninety-nine"
        );
    }

    #[test]
    fn skips_zero_chunks() {
        assert_eq!(words_of(1_000_001), "one million one");
        assert_eq!(words_of(70_000_000), "seventy million");
        assert_eq!(words_of(350_000), "three hundred fifty thousand");
        assert_eq!(words_of(50_000), "fifty thousand");
        assert_eq!(words_of(2_005_010), "two million five thousand ten");
    }

    #[test]
    fn billions_lose_their_scale_word() {
        assert_eq!(words_of(1_000_000_000), "one");
        assert_eq!(words_of(2_000_000_001), "two one");
    }

    #[test]
    fn never_emits_stray_spaces() {
        let mut n: u64 = 0;
        while n <= 999_999_999 {
            let words = words_of(n);
            assert!(!words.contains("  "), "double space for {n}: {words:?}");
            assert_eq!(words.trim(), words, "untrimmed for {n}");
            n += 7_919;
        }
        for n in [10, 19, 20, 99, 101, 110, 999, 1_001, 100_100, 999_999_999] {
            let words = words_of(n);
            assert!(!words.contains("  "));
            assert_eq!(words.trim(), words);
        }
    }
}
