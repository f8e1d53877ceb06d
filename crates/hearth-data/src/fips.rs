//! County identifiers.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A 5-character county FIPS code: 2-digit state part followed by 3-digit
/// county part, zero-padded.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Fips(String);

impl Fips {
    /// Build a key from separate state and county parts, zero-padding each
    /// to its census width.
    pub fn from_parts(state: &str, county: &str) -> Self {
        Self(format!("{state:0>2}{county:0>3}"))
    }

    /// Normalize a bare code (possibly shorter than 5 characters when the
    /// source stored it as a number) by zero-padding to 5.
    pub fn from_code(code: &str) -> Self {
        Self(format!("{code:0>5}"))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("6", "75", "06075")]
    #[case("06", "075", "06075")]
    #[case("48", "1", "48001")]
    #[case("1", "1", "01001")]
    fn from_parts_zero_pads(#[case] state: &str, #[case] county: &str, #[case] expected: &str) {
        let fips = Fips::from_parts(state, county);
        assert_eq!(fips.as_str(), expected);
        assert_eq!(fips.as_str().len(), 5);
    }

    #[rstest]
    #[case("6075", "06075")]
    #[case("06075", "06075")]
    #[case("1001", "01001")]
    fn from_code_zero_pads(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(Fips::from_code(code).as_str(), expected);
    }

    #[test]
    fn displays_as_code() {
        assert_eq!(Fips::from_code("6075").to_string(), "06075");
    }
}
