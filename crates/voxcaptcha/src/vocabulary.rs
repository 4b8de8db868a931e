//! Spoken forms for captcha characters.

/// Inserted between spoken words; the engine renders it as a pause.
pub const PAUSE: &str = " .... ";

/// Uppercase letters with a spoken form. `I` and `O` are left out because
/// they are too easily heard as `1` and `0`.
pub const SPOKEN_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Returns the spoken word for a digit or supported uppercase letter.
pub fn spoken_word(c: char) -> Option<&'static str> {
    let word = match c {
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        'A' => "ay",
        'B' => "bee",
        'C' => "see",
        'D' => "dee",
        'E' => "ee",
        'F' => "eff",
        'G' => "jee",
        'H' => "aitch",
        'J' => "jay",
        'K' => "kay",
        'L' => "ell",
        'M' => "em",
        'N' => "en",
        'P' => "pee",
        'Q' => "queue",
        'R' => "are",
        'S' => "ess",
        'T' => "tee",
        'U' => "you",
        'V' => "vee",
        'W' => "double you",
        'X' => "ex",
        'Y' => "why",
        'Z' => "zed",
        _ => return None,
    };
    Some(word)
}

/// Builds the phrase handed to the speech engine.
///
/// Unmapped characters are spoken literally.
pub fn compose_phrase(text: &str) -> String {
    let words: Vec<String> = text
        .chars()
        .map(|c| match spoken_word(c) {
            Some(word) => word.to_string(),
            None => c.to_string(),
        })
        .collect();
    words.join(PAUSE)
}
