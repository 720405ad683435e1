//! Structural field validation patterns.
//!
//! The patterns follow the Dutch institutional form rules: diacritic-aware
//! name matching, `1234 AB` postcodes, street addresses with house numbers
//! and an email domain locked to hz.nl.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Names and prefixes: letters (including French/Dutch diacritics),
/// whitespace and hyphens.
pub static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-zàâçéèêëîïôûùüÿñæœ\s-]+$").unwrap());

/// Institutional email addresses only.
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@hz\.nl$").unwrap());

/// Dutch or international phone notation: +31.., +31(0).., (+31)(0)..,
/// 0031.. or a national 0-prefixed number.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^\+[0-9]{2}|^\+[0-9]{2}\(0\)|^\(\+[0-9]{2}\)\(0\)|^00[0-9]{2}|^0)([0-9]{9}$|[0-9\-\s]{10}$)")
        .unwrap()
});

/// Street address: optional ordinal ("1e "), street words, house number,
/// optional range or letter suffix.
pub static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([1-9][e][\s])*([a-zA-Z]+(([\.][\s])|([\s]))?)+[1-9][0-9]*(([-][1-9][0-9]*)|([\s]?[a-zA-Z]+))?$")
        .unwrap()
});

/// Postcode digits-and-letters shape; the excluded letter pairs are
/// checked separately because the regex crate has no lookahead.
static ZIP_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[1-9][0-9]{3} ?([a-z]{2})$").unwrap());

/// Letter pairs that never occur in Dutch postcodes.
const FORBIDDEN_ZIP_SUFFIXES: [&str; 3] = ["sa", "sd", "ss"];

/// City names: extended Latin letters with separators (space, hyphen,
/// apostrophe, abbreviating dot).
static CITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z\x{0080}-\x{024F}]+(?:. |-| |'))*[a-zA-Z\x{0080}-\x{024F}]*$").unwrap()
});

/// Validate a Dutch postcode, rejecting the SA/SD/SS letter pairs.
pub fn validate_zip_code(zip: &str) -> Result<(), ValidationError> {
    let invalid = || {
        let mut err = ValidationError::new("zip_code");
        err.message = Some("voer een geldige postcode in.".into());
        err
    };

    let captures = ZIP_SHAPE_RE.captures(zip).ok_or_else(invalid)?;
    let suffix = captures
        .get(1)
        .map(|m| m.as_str().to_lowercase())
        .ok_or_else(invalid)?;

    if FORBIDDEN_ZIP_SUFFIXES.contains(&suffix.as_str()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a city name. Custom function rather than a regex attribute so
/// the empty string is rejected: the pattern itself matches "".
pub fn validate_city(city: &str) -> Result<(), ValidationError> {
    if !city.is_empty() && CITY_RE.is_match(city) {
        return Ok(());
    }
    let mut err = ValidationError::new("city");
    err.message = Some("voer een geldige plaatsnaam in.".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_pattern_accepts_diacritics() {
        assert!(NAME_RE.is_match("Jan"));
        assert!(NAME_RE.is_match("Anne-Fleur"));
        assert!(NAME_RE.is_match("Zoë"));
        assert!(NAME_RE.is_match("van der Berg"));
    }

    #[test]
    fn name_pattern_rejects_digits_and_empty() {
        assert!(!NAME_RE.is_match("Jan3"));
        assert!(!NAME_RE.is_match(""));
        assert!(!NAME_RE.is_match("R2D2"));
    }

    #[test]
    fn email_pattern_is_domain_locked() {
        assert!(EMAIL_RE.is_match("j.jansen@hz.nl"));
        assert!(EMAIL_RE.is_match("piet+test@hz.nl"));
        assert!(!EMAIL_RE.is_match("j.jansen@gmail.com"));
        assert!(!EMAIL_RE.is_match("j.jansen@hz.nl.evil.com"));
        assert!(!EMAIL_RE.is_match("@hz.nl"));
    }

    #[test]
    fn phone_pattern_accepts_common_notations() {
        assert!(PHONE_RE.is_match("+31612345678"));
        assert!(PHONE_RE.is_match("0612345678"));
        assert!(PHONE_RE.is_match("0031612345678"));
        assert!(PHONE_RE.is_match("+31(0)612345678"));
    }

    #[test]
    fn phone_pattern_rejects_garbage() {
        assert!(!PHONE_RE.is_match("12345"));
        assert!(!PHONE_RE.is_match("phone"));
    }

    #[test]
    fn address_pattern_requires_house_number() {
        assert!(ADDRESS_RE.is_match("Edisonweg 4"));
        assert!(ADDRESS_RE.is_match("1e Looiersdwarsstraat 14"));
        assert!(ADDRESS_RE.is_match("Lange Noordstraat 10-12"));
        assert!(ADDRESS_RE.is_match("Kerkplein 3a"));
        assert!(!ADDRESS_RE.is_match("Edisonweg"));
        assert!(!ADDRESS_RE.is_match("4"));
    }

    #[test]
    fn zip_code_accepts_valid_postcodes() {
        assert!(validate_zip_code("4382 NW").is_ok());
        assert!(validate_zip_code("4382NW").is_ok());
        assert!(validate_zip_code("1011 ab").is_ok());
    }

    #[test]
    fn zip_code_rejects_forbidden_suffixes() {
        assert!(validate_zip_code("4382 SA").is_err());
        assert!(validate_zip_code("4382 SD").is_err());
        assert!(validate_zip_code("4382ss").is_err());
    }

    #[test]
    fn zip_code_rejects_malformed_input() {
        assert!(validate_zip_code("0382 NW").is_err());
        assert!(validate_zip_code("43821 NW").is_err());
        assert!(validate_zip_code("4382 N").is_err());
        assert!(validate_zip_code("postcode").is_err());
    }

    #[test]
    fn city_accepts_compound_names() {
        assert!(validate_city("Vlissingen").is_ok());
        assert!(validate_city("Den Haag").is_ok());
        assert!(validate_city("Sint-Oedenrode").is_ok());
        assert!(validate_city("Capelle aan den IJssel").is_ok());
    }

    #[test]
    fn city_rejects_empty() {
        assert!(validate_city("").is_err());
    }
}
