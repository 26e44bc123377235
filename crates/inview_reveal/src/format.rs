//! Integer display formatting
//!
//! Count-up displays come in two presentation modes: the simple inline span
//! renders plain digits, while the stat-grid variant renders with group
//! separators. Both modes display the same underlying value; formatting is
//! the only difference.

/// Presentation mode for a displayed integer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// Plain digit string: 12345 → "12345"
    #[default]
    Plain,
    /// Comma-grouped thousands: 12345 → "12,345"
    Grouped,
}

impl NumberFormat {
    /// Render a value in this format
    pub fn format(self, value: u64) -> String {
        match self {
            NumberFormat::Plain => value.to_string(),
            NumberFormat::Grouped => group_digits(value, ','),
        }
    }
}

/// Group the digits of `value` in threes with `separator`
///
/// Exposed for hosts whose locale groups with a different separator.
pub fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
