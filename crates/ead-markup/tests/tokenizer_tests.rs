//! Integration tests for the XML tokenizer.

use ead_markup::{Attribute, Event, TokenizeError, XmlTokenizer};

/// Helper to tokenize a string and return the events
fn tokenize(input: &str) -> Vec<Event> {
    XmlTokenizer::new(input)
        .collect::<Result<Vec<_>, _>>()
        .expect("input should tokenize")
}

/// Helper to tokenize a string that must fail
fn tokenize_err(input: &str) -> TokenizeError {
    XmlTokenizer::new(input)
        .collect::<Result<Vec<_>, _>>()
        .expect_err("input should be rejected")
}

#[test]
fn test_plain_text() {
    let events = tokenize("Hello");
    assert_eq!(events, vec![Event::text("Hello")]);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_start_and_end_tag() {
    let events = tokenize("<ead></ead>");
    assert_eq!(events, vec![Event::open("ead", &[]), Event::close("ead")]);
}

#[test]
fn test_self_closing_tag_yields_open_and_close() {
    let events = tokenize(r#"<extref href="a.pdf"/>"#);
    assert_eq!(
        events,
        vec![
            Event::open("extref", &[("href", "a.pdf")]),
            Event::close("extref")
        ]
    );
}

#[test]
fn test_attributes_in_source_order() {
    let events = tokenize(r#"<c01 level="series" id='ref1' audience = "external">"#);
    match &events[0] {
        Event::Open { name, attributes } => {
            assert_eq!(name, "c01");
            assert_eq!(
                attributes,
                &vec![
                    Attribute::new("level".to_string(), "series".to_string()),
                    Attribute::new("id".to_string(), "ref1".to_string()),
                    Attribute::new("audience".to_string(), "external".to_string()),
                ]
            );
        }
        other => panic!("Expected Open event, got {other:?}"),
    }
}

#[test]
fn test_namespace_prefixes_are_dropped() {
    let events = tokenize(r#"<ead:dao xlink:href="x.jpg"></ead:dao>"#);
    assert_eq!(
        events,
        vec![Event::open("dao", &[("href", "x.jpg")]), Event::close("dao")]
    );
}

#[test]
fn test_text_is_not_normalized() {
    let events = tokenize("<p>  two\n  lines </p>");
    assert_eq!(events[1], Event::text("  two\n  lines "));
}

#[test]
fn test_whitespace_between_elements_is_emitted() {
    let events = tokenize("<a>\n  <b/>\n</a>");
    assert_eq!(
        events,
        vec![
            Event::open("a", &[]),
            Event::text("\n  "),
            Event::open("b", &[]),
            Event::close("b"),
            Event::text("\n"),
            Event::close("a"),
        ]
    );
}

#[test]
fn test_carriage_returns_become_newlines() {
    let events = tokenize("<p>a\r\nb\rc</p>");
    assert_eq!(events[1], Event::text("a\nb\nc"));
}

#[test]
fn test_character_references_in_text() {
    let events = tokenize("<p>Smith &amp; Sons &lt;1900&gt; &#65;&#x42;</p>");
    assert_eq!(events[1], Event::text("Smith & Sons <1900> AB"));
}

#[test]
fn test_character_references_in_attribute() {
    let events = tokenize(r#"<title render="&quot;bold&quot;" alt='it&apos;s'/>"#);
    assert_eq!(
        events[0],
        Event::open("title", &[("render", "\"bold\""), ("alt", "it's")])
    );
}

#[test]
fn test_cdata_is_separate_text() {
    let events = tokenize("<p>before<![CDATA[<b>raw</b> & ]]]]>after</p>");
    assert_eq!(
        events,
        vec![
            Event::open("p", &[]),
            Event::text("before"),
            Event::text("<b>raw</b> & ]]"),
            Event::text("after"),
            Event::close("p"),
        ]
    );
}

#[test]
fn test_comments_and_processing_instructions_are_skipped() {
    let events =
        tokenize("<?xml version=\"1.0\"?><!-- header --><ead><?pi data?>a<!---->b</ead>");
    assert_eq!(
        events,
        vec![
            Event::open("ead", &[]),
            Event::text("a"),
            Event::text("b"),
            Event::close("ead"),
        ]
    );
}

#[test]
fn test_doctype_is_skipped() {
    let input = r#"<!DOCTYPE ead PUBLIC "+//ISBN 1-931666-00-8//DTD ead.dtd (EAD) Version 2002//EN" "ead.dtd"><ead/>"#;
    assert_eq!(tokenize(input), vec![Event::open("ead", &[]), Event::close("ead")]);
}

#[test]
fn test_doctype_internal_subset_is_skipped() {
    let input = "<!DOCTYPE ead [\n  <!ENTITY org \"Org\">\n]>\n<ead/>";
    assert_eq!(
        tokenize(input),
        vec![
            Event::text("\n"),
            Event::open("ead", &[]),
            Event::close("ead")
        ]
    );
}

#[test]
fn test_byte_order_mark_is_skipped() {
    assert_eq!(
        tokenize("\u{FEFF}<ead/>"),
        vec![Event::open("ead", &[]), Event::close("ead")]
    );
}

#[test]
fn test_references_join_surrounding_text() {
    let events = tokenize("<p>a &amp; b</p>");
    assert_eq!(
        events,
        vec![Event::open("p", &[]), Event::text("a & b"), Event::close("p")]
    );
}

#[test]
fn test_event_locations() {
    let mut tokenizer = XmlTokenizer::new("<ead>\n  <did>x</did>\n</ead>");

    let _ = tokenizer.next_event().unwrap();
    assert_eq!((tokenizer.location().line, tokenizer.location().column), (1, 1));

    let _ = tokenizer.next_event().unwrap(); // "\n  "
    assert_eq!((tokenizer.location().line, tokenizer.location().column), (1, 6));

    assert_eq!(tokenizer.next_event().unwrap(), Some(Event::open("did", &[])));
    assert_eq!((tokenizer.location().line, tokenizer.location().column), (2, 3));
    assert_eq!(tokenizer.location().byte_offset, 8);
}

#[test]
fn test_exhausted_tokenizer_keeps_returning_none() {
    let mut tokenizer = XmlTokenizer::new("<a>text</a>");
    while tokenizer.next_event().unwrap().is_some() {}
    assert_eq!(tokenizer.next_event().unwrap(), None);
    assert_eq!(tokenizer.input_location().byte_offset, 11);
}

// ========== lexical errors ==========

#[test]
fn test_unclosed_angle_bracket() {
    let err = tokenize_err("<ead");
    assert_eq!(err.location.line, 1);
}

#[test]
fn test_unmatched_end_tag() {
    let _ = tokenize_err("</a><b>");
}

#[test]
fn test_end_tag_must_match_prefix() {
    let _ = tokenize_err("<a:x></b:x>");
    assert_eq!(
        tokenize("<a:x></a:x>"),
        vec![Event::open("x", &[]), Event::close("x")]
    );
}

#[test]
fn test_attribute_without_value() {
    let _ = tokenize_err("<input checked>");
}

#[test]
fn test_unquoted_attribute_value() {
    let _ = tokenize_err("<c01 level=series>");
}

#[test]
fn test_less_than_in_attribute_value() {
    let err = tokenize_err(r#"<a title="x<y">"#);
    assert!(err.message.contains("'<' in value"), "{}", err.message);
}

#[test]
fn test_unknown_entity() {
    let err = tokenize_err("<p>&nbsp;</p>");
    assert!(err.message.contains("unknown entity '&nbsp;'"), "{}", err.message);
}

#[test]
fn test_invalid_numeric_reference() {
    let err = tokenize_err("<p>&#xD800;</p>");
    assert!(err.message.contains("invalid character reference"), "{}", err.message);
}

#[test]
fn test_reference_to_nul_is_rejected() {
    let err = tokenize_err("<a>&#0;</a>");
    assert_eq!(err.message, "invalid character reference '&#0;'");
    assert_eq!(err.location.column, 4);
}

#[test]
fn test_cdata_end_in_text_is_rejected() {
    let err = tokenize_err("<a>x ]]> y</a>");
    assert_eq!(err.message, "']]>' is not allowed in character data");
    assert_eq!(err.location.column, 6);
}

#[test]
fn test_double_dash_in_comment() {
    let _ = tokenize_err("<!-- a -- b -->");
}

#[test]
fn test_unterminated_comment() {
    let _ = tokenize_err("<a><!-- never closed");
}

#[test]
fn test_garbage_after_end_tag_name() {
    let _ = tokenize_err("<a></a b>");
}

#[test]
fn test_iterator_stops_after_error() {
    let mut tokenizer = XmlTokenizer::new("<a>&bogus;</a>");
    assert_eq!(tokenizer.next(), Some(Ok(Event::open("a", &[]))));
    assert!(matches!(tokenizer.next(), Some(Err(_))));
    assert_eq!(tokenizer.next(), None);
}
