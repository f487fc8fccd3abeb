use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

impl Currency {
    /// Minor-unit digits shown when formatting. Naira prices are quoted whole.
    pub fn fraction_digits(&self) -> usize {
        match self.code {
            "NGN" => 0,
            _ => 2,
        }
    }
}

// First entry is the session default.
static CURRENCIES: [Currency; 4] = [
    Currency {
        code: "NGN",
        symbol: "₦",
        name: "Nigerian Naira",
    },
    Currency {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    Currency {
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    Currency {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
];

pub fn list_currencies() -> &'static [Currency] {
    &CURRENCIES
}

pub fn default_currency() -> &'static Currency {
    &CURRENCIES[0]
}

pub fn find_currency(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let codes: Vec<&str> = list_currencies().iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["NGN", "USD", "EUR", "GBP"]);
        assert_eq!(default_currency().code, "NGN");
    }

    #[test]
    fn test_codes_unique() {
        let mut codes: Vec<&str> = list_currencies().iter().map(|c| c.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), list_currencies().len());
    }

    #[test]
    fn test_find_currency() {
        assert_eq!(find_currency("usd").map(|c| c.symbol), Some("$"));
        assert_eq!(find_currency(" GBP ").map(|c| c.code), Some("GBP"));
        assert!(find_currency("JPY").is_none());
        assert!(find_currency("").is_none());
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(find_currency("NGN").unwrap().fraction_digits(), 0);
        assert_eq!(find_currency("EUR").unwrap().fraction_digits(), 2);
    }
}
