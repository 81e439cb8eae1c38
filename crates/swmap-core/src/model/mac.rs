use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// MAC address, normalized to uppercase colon-separated form
/// (`AA:BB:CC:DD:EE:FF`).
///
/// Accepts colon, dash, Cisco dotted (`0050.56a1.b2c3`) or bare hex.
/// Anything that is not twelve hex digits is kept upper-cased as reported,
/// so a malformed value can still be shown, just never matched against a
/// well-formed one. The empty address means "no MAC".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let upper = raw.as_ref().trim().to_ascii_uppercase();
        let digits: String = upper
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect();

        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self(upper);
        }

        let mut out = String::with_capacity(17);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && i % 2 == 0 {
                out.push(':');
            }
            out.push(c);
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for MacAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_common_notations_normalize_to_colon_form() {
        for raw in [
            "aa:bb:cc:dd:ee:ff",
            "AA-BB-CC-DD-EE-FF",
            "aabb.ccdd.eeff",
            "aabbccddeeff",
            "  Aa:Bb:cC:dd:EE:ff \n",
        ] {
            assert_eq!(MacAddress::new(raw).as_str(), "AA:BB:CC:DD:EE:FF", "input {raw:?}");
        }
    }

    #[test]
    fn cisco_and_bmc_forms_compare_equal() {
        assert_eq!(MacAddress::new("0050.56a1.b2c3"), MacAddress::new("00:50:56:A1:B2:C3"));
    }

    #[test]
    fn malformed_value_is_kept_uppercased() {
        assert_eq!(MacAddress::new("not-a-mac").as_str(), "NOT-A-MAC");
        assert_eq!(MacAddress::new("aa:bb:cc").as_str(), "AA:BB:CC");
    }

    #[test]
    fn empty_stays_empty() {
        assert!(MacAddress::new("").is_empty());
        assert!(MacAddress::new("   ").is_empty());
    }
}
