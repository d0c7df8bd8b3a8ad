//! Domain reconstruction for advertiser items.
//!
//! `ads_advertiser` items carry only a display title in the form
//! `"CompanyName:CC"` (a two-letter country suffix), never a literal
//! domain. The heuristic here rebuilds a domain-like string from that
//! title; `ads_domain` items bypass it entirely.

use regex::Regex;

/// Derives a domain-like string from an advertiser display title:
/// strips a trailing `:XX` country suffix, lowercases, removes whitespace,
/// and appends `.com` as the commercial TLD marker.
///
/// `"AcmeCorp:IT"` becomes `"acmecorp.com"`. An empty title yields
/// `"unknown"` — there is nothing to reconstruct from.
pub(crate) fn domain_from_title(title: &str) -> String {
    if title.is_empty() {
        return "unknown".to_owned();
    }
    let suffix = Regex::new(r":[A-Z]{2}$").expect("valid country-suffix regex");
    let stripped = suffix.replace(title, "");
    let mut domain: String = stripped.to_lowercase().split_whitespace().collect();
    domain.push_str(".com");
    domain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_country_suffix_and_lowercases() {
        assert_eq!(domain_from_title("AcmeCorp:IT"), "acmecorp.com");
    }

    #[test]
    fn removes_interior_whitespace() {
        assert_eq!(domain_from_title("Acme Corp Srl:IT"), "acmecorpsrl.com");
    }

    #[test]
    fn title_without_suffix_is_kept_whole() {
        assert_eq!(domain_from_title("AcmeCorp"), "acmecorp.com");
    }

    #[test]
    fn lowercase_suffix_is_not_treated_as_country_code() {
        // Only an uppercase two-letter suffix is a country marker.
        assert_eq!(domain_from_title("acme:it"), "acme:it.com");
    }

    #[test]
    fn interior_colon_is_preserved() {
        assert_eq!(domain_from_title("A:B:FR"), "a:b.com");
    }

    #[test]
    fn empty_title_yields_unknown() {
        assert_eq!(domain_from_title(""), "unknown");
    }
}
