//! Phonetic encoding for similarity classes.
//!
//! Tokens sharing a Soundex code form one similarity class; the similarity
//! bundle of a category maps codes to the indexed tokens carrying them.

const CODE_LENGTH: usize = 4;

/// Compute the Soundex code of a token.
///
/// Returns `None` for tokens without any ASCII letter (numeric tokens,
/// bucketed location tokens), which therefore never join a similarity
/// class. Codes are lowercase, one letter plus three digits.
///
/// # Examples
///
/// ```
/// use crocus::analysis::phonetic::soundex;
///
/// assert_eq!(soundex("robert"), Some("r163".to_string()));
/// assert_eq!(soundex("rupert"), Some("r163".to_string()));
/// assert_eq!(soundex("1234"), None);
/// ```
pub fn soundex(token: &str) -> Option<String> {
    let letters: Vec<u8> = token
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    let first = *letters.first()?;

    let mut code = String::with_capacity(CODE_LENGTH);
    code.push(first as char);
    let mut last_digit = digit_of(first);

    for &letter in &letters[1..] {
        if code.len() == CODE_LENGTH {
            break;
        }
        match letter {
            // h and w do not separate identical codes
            b'h' | b'w' => {}
            // vowels separate identical codes but are not encoded
            b'a' | b'e' | b'i' | b'o' | b'u' | b'y' => last_digit = None,
            _ => {
                let digit = digit_of(letter);
                if digit != last_digit {
                    if let Some(d) = digit {
                        code.push((b'0' + d) as char);
                    }
                }
                last_digit = digit;
            }
        }
    }

    while code.len() < CODE_LENGTH {
        code.push('0');
    }
    Some(code)
}

fn digit_of(letter: u8) -> Option<u8> {
    match letter {
        b'b' | b'f' | b'p' | b'v' => Some(1),
        b'c' | b'g' | b'j' | b'k' | b'q' | b's' | b'x' | b'z' => Some(2),
        b'd' | b't' => Some(3),
        b'l' => Some(4),
        b'm' | b'n' => Some(5),
        b'r' => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_codes() {
        assert_eq!(soundex("robert").as_deref(), Some("r163"));
        assert_eq!(soundex("rupert").as_deref(), Some("r163"));
        assert_eq!(soundex("ashcraft").as_deref(), Some("a261"));
        assert_eq!(soundex("tymczak").as_deref(), Some("t522"));
        assert_eq!(soundex("pfister").as_deref(), Some("p236"));
        assert_eq!(soundex("honeyman").as_deref(), Some("h555"));
    }

    #[test]
    fn test_short_tokens_pad_with_zeros() {
        assert_eq!(soundex("a").as_deref(), Some("a000"));
        assert_eq!(soundex("ab").as_deref(), Some("a100"));
    }

    #[test]
    fn test_non_alphabetic_tokens() {
        assert_eq!(soundex(""), None);
        assert_eq!(soundex("42"), None);
        assert_eq!(soundex("-17"), None);
    }

    #[test]
    fn test_case_and_noise_insensitive() {
        assert_eq!(soundex("Robert"), soundex("robert"));
        assert_eq!(soundex("o'brien"), soundex("obrien"));
    }
}
