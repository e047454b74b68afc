//! Counterparty attribution from the three free-text company fields.
//!
//! The declared shipper is the seller. The buyer is whichever competitor
//! field names a *different* company once corporate suffixes are ignored,
//! preferring the international competitor.

/// Buyer assigned when no competitor field carries a name.
pub const UNKNOWN_BUYER: &str = "Unknown";

const CORPORATE_SUFFIXES: &[&str] = &["LTD", "LLC", "INC", "CO", "COMPANY", "LIMITED", "PRIVATE"];

/// Uppercase, trim, and drop whole-word corporate suffixes.
pub fn normalize_company(name: &str) -> String {
    name.trim()
        .to_uppercase()
        .split_whitespace()
        .filter(|token| {
            let bare = token.trim_end_matches(['.', ',']);
            !CORPORATE_SUFFIXES.contains(&bare)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Derive the buyer for one shipment. Returns the raw competitor text, or
/// [`UNKNOWN_BUYER`] when both competitor fields are blank.
pub fn resolve_buyer(
    shipper: &str,
    international: Option<&str>,
    domestic: Option<&str>,
) -> String {
    let international = present(international);
    let domestic = present(domestic);
    let shipper_norm = normalize_company(shipper);

    let differs = |candidate: &str| normalize_company(candidate) != shipper_norm;

    let chosen = international
        .filter(|&intl| differs(intl))
        .or_else(|| domestic.filter(|&dom| differs(dom)))
        .or(international)
        .or(domestic);

    chosen.unwrap_or(UNKNOWN_BUYER).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_suffixes_and_case() {
        assert_eq!(normalize_company("  Acme Ltd "), "ACME");
        assert_eq!(normalize_company("Global Traders Inc."), "GLOBAL TRADERS");
        assert_eq!(normalize_company("Wire Co, LLC"), "WIRE");
        assert_eq!(normalize_company("Costco Company Limited"), "COSTCO");
        assert_eq!(normalize_company("Tata Private   Limited"), "TATA");
    }

    #[test]
    fn suffix_tokens_only_match_whole_words() {
        assert_eq!(normalize_company("Incline Cables"), "INCLINE CABLES");
        assert_eq!(normalize_company("Co-Op Metals"), "CO-OP METALS");
    }

    #[test]
    fn domestic_wins_when_international_is_the_shipper() {
        let buyer = resolve_buyer("ACME LTD", Some("Acme Ltd"), Some("Global Traders Inc"));
        assert_eq!(buyer, "Global Traders Inc");
    }

    #[test]
    fn blank_competitors_yield_unknown() {
        assert_eq!(resolve_buyer("X", Some(""), Some("")), UNKNOWN_BUYER);
        assert_eq!(resolve_buyer("X", None, None), UNKNOWN_BUYER);
        assert_eq!(resolve_buyer("", Some("   "), None), UNKNOWN_BUYER);
    }

    #[test]
    fn international_preferred_when_both_differ() {
        let buyer = resolve_buyer("Shipper SA", Some("Nexans Inc"), Some("Southwire Co"));
        assert_eq!(buyer, "Nexans Inc");
    }

    #[test]
    fn falls_back_to_international_when_both_match_shipper() {
        let buyer = resolve_buyer("Acme", Some("ACME LTD"), Some("acme llc"));
        assert_eq!(buyer, "ACME LTD");
    }

    #[test]
    fn falls_back_to_domestic_when_only_it_is_present() {
        assert_eq!(resolve_buyer("Acme", None, Some("Acme Inc")), "Acme Inc");
        assert_eq!(resolve_buyer("Acme", Some(""), Some("Encore Wire")), "Encore Wire");
    }

    #[test]
    fn raw_value_is_returned_unnormalized() {
        let buyer = resolve_buyer("Other", Some("  Prysmian Group Ltd."), None);
        assert_eq!(buyer, "  Prysmian Group Ltd.");
    }
}
