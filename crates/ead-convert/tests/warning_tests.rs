//! Once-only warnings are scoped to a single conversion.
//!
//! Kept in its own test binary: the warning set is process-wide, and other
//! conversions running in parallel would clear it mid-test.

use ead_common::warning::was_warned;
use ead_convert::parse_markup_string;

const DUPLICATE: &str = "duplicate attribute 'level' on <c01>; keeping the last value";

#[test]
fn test_each_conversion_reports_its_own_warnings() {
    let _ = parse_markup_string(r#"<c01 level="file" level="item"/>"#).unwrap();
    assert!(was_warned("Tree Builder", DUPLICATE));

    let _ = parse_markup_string(r#"<c01 level="file"/>"#).unwrap();
    assert!(!was_warned("Tree Builder", DUPLICATE));

    let _ = parse_markup_string(r#"<c01 level="file" level="item"/>"#).unwrap();
    assert!(was_warned("Tree Builder", DUPLICATE));
}
