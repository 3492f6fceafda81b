use crate::error::PageInputError;

/// Validate raw jump-box text against the known page count.
///
/// Only the leading integer is read, so `"3.5"` is page 3 and `"2abc"` is
/// page 2. Text without leading digits is not a number.
pub fn parse_page_input(raw: &str, total_pages: u32) -> Result<u32, PageInputError> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return Err(PageInputError::NotANumber(trimmed.to_string()));
    }

    // Too many digits saturates, which the range check below rejects
    let magnitude = unsigned[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    let page = if negative { -magnitude } else { magnitude };

    if page < 1 || page > i64::from(total_pages) {
        return Err(PageInputError::OutOfRange { page, total_pages });
    }

    // Bounded by total_pages above
    Ok(page as u32)
}

/// Identifies one scheduled error-flash reset. Only the newest token resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashToken(u64);

/// View-side state of the "jump to page" box.
///
/// A rejection raises `is_error` until the view fires the timer it scheduled
/// for the returned token; anything that happens in between (another
/// rejection, an accepted jump) makes that timer stale.
#[derive(Debug, Clone, Default)]
pub struct JumpField {
    text: String,
    is_error: bool,
    generation: u64,
}

impl JumpField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn reject(&mut self) -> FlashToken {
        self.generation += 1;
        self.is_error = true;
        FlashToken(self.generation)
    }

    pub fn accept(&mut self) {
        self.generation += 1;
        self.is_error = false;
        self.text.clear();
    }

    /// Returns false when the token was superseded and nothing changed.
    pub fn reset_after(&mut self, token: FlashToken) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.is_error = false;
        self.text.clear();
        true
    }
}
