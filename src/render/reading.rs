/// Estimated reading effort for a markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub words: usize,
    /// Rounded up to the next whole minute.
    pub minutes: usize,
}

const WORDS_PER_MINUTE: usize = 200;

fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF
    )
}

/// Word count plus reading minutes. CJK ideographs count individually since
/// whitespace does not delimit them; everything else counts per
/// whitespace-delimited token containing at least one word character.
pub fn reading_time(text: &str) -> ReadingTime {
    let cjk = text.chars().filter(|c| is_cjk(*c)).count();
    let latin = text
        .split_whitespace()
        .filter(|token| token.chars().any(|c| c.is_alphanumeric() && !is_cjk(c)))
        .count();

    let words = cjk + latin;
    ReadingTime {
        words,
        minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
}
