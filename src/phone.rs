//! International form of a stored phone number, shown next to it in the
//! detail panel. The stored number itself is never rewritten.

use rlibphonenumber::{PhoneNumberFormat, PHONE_NUMBER_UTIL};

/// E.164 form of `stored` read as a number local to `region`.
///
/// `None` without a region, when the number does not parse, or when the
/// international form reads the same as the stored one.
pub fn international(stored: &str, region: Option<&str>) -> Option<String> {
    let region = region.filter(|r| !r.is_empty())?;
    let number = PHONE_NUMBER_UTIL.parse(stored, region).ok()?;
    let e164 = PHONE_NUMBER_UTIL
        .format(&number, PhoneNumberFormat::E164)
        .into_owned();
    (e164 != stored).then_some(e164)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_region() {
        assert_eq!(international("98765432", None), None);
        assert_eq!(international("98765432", Some("")), None);
    }

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(
            international("98765432", Some("SG")).as_deref(),
            Some("+6598765432")
        );
    }
}
