use std::{borrow::Cow, fmt};

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single scalar cell, as read from the source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// Missing or blank in the source. Distinct from `Text("")`.
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for `Empty` and for the empty string, the two values the sentinel replaces.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Text form written to the output file.
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(format_number(*n)),
            CellValue::Empty => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_field())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Integral values print without a fraction (`42`, not `42.0`).
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
