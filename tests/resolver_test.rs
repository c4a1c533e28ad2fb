//! Integration tests for message resolution

mod common;

use utility_bar::config::BarConfig;
use utility_bar::parser::{plain_text, resolve, resolve_with_source, MessageSource};

#[test]
fn test_single_slot_is_verbatim() {
    let config = common::single_message("Summer sale: 20% off everything");
    let messages = resolve(&config);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].markup(), "Summer sale: 20% off everything");
}

#[test]
fn test_trailing_url_makes_whole_message_a_link() {
    let config = common::single_message("Sale ends soon @https://x.io");
    let messages = resolve(&config);
    assert_eq!(messages.len(), 1);

    let markup = messages[0].markup();
    assert_eq!(markup.matches("<a ").count(), 1);
    assert!(markup.contains(r#"href="https://x.io""#));
    assert_eq!(plain_text(markup), "Sale ends soon");
}

#[test]
fn test_inline_link_keeps_surrounding_spaces() {
    let config = common::single_message("Hello [shop @https://x.io] now");
    let messages = resolve(&config);
    let text = plain_text(messages[0].markup());
    assert_eq!(text, "Hello shop now");
    assert!(messages[0].markup().starts_with("Hello <a "));
    assert!(messages[0].markup().ends_with("</a> now"));
}

#[test]
fn test_malformed_brackets_pass_through() {
    let config = common::single_message("Use code [SAVE10] at checkout");
    let messages = resolve(&config);
    assert_eq!(messages[0].markup(), "Use code [SAVE10] at checkout");
}

#[test]
fn test_link_field_wraps_message() {
    let config = BarConfig {
        message2: "Free returns".to_string(),
        link2: "https://x.io/returns".to_string(),
        link_underline: false,
        ..Default::default()
    };
    let messages = resolve(&config);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].markup().contains("text-decoration: none"));
    assert!(messages[0].markup().contains(r#"href="https://x.io/returns""#));
}

#[test]
fn test_slots_win_over_multiple_text() {
    let config = BarConfig {
        message3: "Slot".to_string(),
        multiple_text: "A|B".to_string(),
        bar_text: "Bar".to_string(),
        ..Default::default()
    };
    let (source, messages) = resolve_with_source(&config);
    assert_eq!(source, MessageSource::Slots);
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_multiple_text_in_order_trimmed() {
    let config = BarConfig {
        multiple_text: " A |B|  C".to_string(),
        ..Default::default()
    };
    let markups: Vec<_> = resolve(&config)
        .into_iter()
        .map(|m| m.into_markup())
        .collect();
    assert_eq!(markups, vec!["A", "B", "C"]);
}

#[test]
fn test_link_marker_in_multiple_text() {
    let config = BarConfig {
        multiple_text: "Hi [LINK:https://x.io|there]|Bye".to_string(),
        ..Default::default()
    };
    let messages = resolve(&config);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].markup().contains(r#"href="https://x.io""#));
    assert_eq!(plain_text(messages[0].markup()), "Hi there");
    assert_eq!(messages[1].markup(), "Bye");
}

#[test]
fn test_unclosed_bracket_does_not_merge_segments() {
    let config = BarConfig {
        multiple_text: "Use code [SAVE10 | Free shipping | New arrivals".to_string(),
        ..Default::default()
    };
    let markups: Vec<_> = resolve(&config)
        .into_iter()
        .map(|m| m.into_markup())
        .collect();
    assert_eq!(markups, vec!["Use code [SAVE10", "Free shipping", "New arrivals"]);
}

#[test]
fn test_bar_text_fallback_has_no_substitution() {
    let config = BarConfig {
        bar_text: "Plain [shop @https://x.io]".to_string(),
        ..Default::default()
    };
    let (source, messages) = resolve_with_source(&config);
    assert_eq!(source, MessageSource::BarText);
    assert_eq!(messages[0].markup(), "Plain [shop @https://x.io]");
}

#[test]
fn test_resolve_is_idempotent() {
    let config = BarConfig {
        message1: "One @https://x.io".to_string(),
        message4: "Four [four @https://y.io]".to_string(),
        ..Default::default()
    };
    assert_eq!(resolve(&config), resolve(&config));
}

#[test]
fn test_empty_config_resolves_to_nothing() {
    let (source, messages) = resolve_with_source(&BarConfig::default());
    assert_eq!(source, MessageSource::Empty);
    assert!(messages.is_empty());
}
