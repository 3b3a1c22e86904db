use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random alphanumeric string of the given length.
#[must_use]
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a password that satisfies the usual Moodle password policy:
/// mixed case, a digit, and a punctuation character.
///
/// Shape: four alphanumerics, an uppercase letter, a dash, a digit, four
/// alphanumerics, a lowercase letter.
#[must_use]
pub fn random_password() -> String {
    let mut rng = rand::thread_rng();
    let upper = char::from(rng.gen_range(b'A'..=b'Z'));
    let lower = char::from(rng.gen_range(b'a'..=b'z'));
    let digit = rng.gen_range(0..=9);
    format!(
        "{}{}-{}{}{}",
        random_string(4),
        upper,
        digit,
        random_string(4),
        lower
    )
}
