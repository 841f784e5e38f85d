use thiserror::Error;

/// Why a question-count draft could not start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    #[error("enter a number of questions")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("need at least one question, got {0}")]
    NotPositive(i64),

    #[error("'{0}' is too many questions")]
    TooLarge(String),
}

/// Parse the Start screen draft into a question count.
///
/// Surrounding whitespace is ignored and a leading `+` is accepted. Anything
/// else that is not a positive integer is an error.
pub fn parse_count(draft: &str) -> Result<usize, CountError> {
    let text = draft.trim();
    if text.is_empty() {
        return Err(CountError::Empty);
    }

    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CountError::NotANumber(text.to_string()));
    }

    if text.starts_with('-') {
        let n = text.parse::<i64>().unwrap_or(i64::MIN);
        return Err(CountError::NotPositive(n));
    }

    match digits.parse::<usize>() {
        Ok(0) => Err(CountError::NotPositive(0)),
        Ok(n) => Ok(n),
        Err(_) => Err(CountError::TooLarge(text.to_string())),
    }
}
