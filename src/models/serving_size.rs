use std::fmt;
use std::str::FromStr;

/// A serving description split into a count and a unit, like "3 cups".
///
/// Parsed from free text: the leading digit run is the amount and the rest
/// is the unit. `Display` renders the canonical form, which is what gets
/// persisted and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingSize {
    pub amount: u32,
    pub unit: String,
}

/// Error returned when a string is not a valid serving size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseServingSizeError(String);

impl fmt::Display for ParseServingSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid serving size '{}': must be '<number> <unit>', like '3 cups'.",
            self.0
        )
    }
}

impl std::error::Error for ParseServingSizeError {}

impl FromStr for ServingSize {
    type Err = ParseServingSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let digits = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if digits == 0 {
            // Empty input or no leading amount
            return Err(ParseServingSizeError(s.to_string()));
        }

        let amount: u32 = trimmed[..digits]
            .parse()
            .map_err(|_| ParseServingSizeError(s.to_string()))?;

        let rest = trimmed[digits..].trim();
        if rest.is_empty() || rest.contains(|c: char| c.is_ascii_digit()) {
            return Err(ParseServingSizeError(s.to_string()));
        }

        let unit = rest.split_whitespace().collect::<Vec<_>>().join(" ");

        Ok(Self { amount, unit })
    }
}

impl fmt::Display for ServingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
