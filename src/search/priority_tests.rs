use super::*;
use proptest::prelude::*;

#[test]
fn test_prefix_match_is_starts_with() {
    assert_eq!(priority(&["Camera"], None, "cam"), MatchPriority::StartsWith);
}

#[test]
fn test_non_matching_second_word_is_other() {
    // "gram" is inside the word, not after whitespace
    assert_eq!(priority(&["Instagram"], None, "cam"), MatchPriority::Other);
    assert_eq!(priority(&["Instagram"], None, "gram"), MatchPriority::Other);
}

#[test]
fn test_exact_match_ignores_case_and_whitespace() {
    assert_eq!(
        priority(&["  Camera "], None, "CAMERA"),
        MatchPriority::ExactMatch
    );
}

#[test]
fn test_second_word_prefix() {
    assert_eq!(
        priority(&["Google Maps"], None, "ma"),
        MatchPriority::SecondWordStartsWith
    );
    // Only the text after the first whitespace counts
    assert_eq!(priority(&["Open Street Maps"], None, "ma"), MatchPriority::Other);
}

#[test]
fn test_contains_only_is_other() {
    assert_eq!(priority(&["Calculator"], None, "cul"), MatchPriority::Other);
}

#[test]
fn test_blank_query_is_other() {
    assert_eq!(priority(&["Camera"], None, ""), MatchPriority::Other);
    assert_eq!(priority(&["Camera"], Some("cam"), "   "), MatchPriority::Other);
}

#[test]
fn test_nickname_wins_even_without_field_match() {
    assert_eq!(
        priority(&["John Smith"], Some("work phone"), "work"),
        MatchPriority::NicknameMatch
    );
    assert!(MatchPriority::NicknameMatch < MatchPriority::StartsWith);
}

#[test]
fn test_nickname_substring_anywhere() {
    assert_eq!(
        priority(&["Jane"], Some("My Boss"), "boss"),
        MatchPriority::NicknameMatch
    );
}

#[test]
fn test_blank_nickname_is_ignored() {
    assert_eq!(
        priority(&["Camera"], Some("   "), "cam"),
        MatchPriority::StartsWith
    );
}

#[test]
fn test_best_field_wins() {
    let fields = ["Photo Editor", "Camera", "Pictures"];
    assert_eq!(priority(&fields, None, "camera"), MatchPriority::ExactMatch);
    assert_eq!(
        priority(&fields, None, "ed"),
        MatchPriority::SecondWordStartsWith
    );
}

#[test]
fn test_priority_without_length_gate_allows_single_char() {
    assert_eq!(priority(&["Camera"], None, "c"), MatchPriority::StartsWith);
}

#[test]
fn test_search_query_gate() {
    assert!(SearchQuery::parse("c", 2).is_none());
    assert!(SearchQuery::parse("  c  ", 2).is_none());
    assert!(SearchQuery::parse("", 2).is_none());
    let q = SearchQuery::parse("  Ca Mera ", 2).unwrap();
    assert_eq!(q.as_str(), "ca mera");
    assert_eq!(q.tokens(), &["ca".to_string(), "mera".to_string()]);
}

#[test]
fn test_search_query_counts_characters_not_bytes() {
    // One two-byte character is still one character
    assert!(SearchQuery::parse("é", 2).is_none());
    assert!(SearchQuery::parse("éa", 2).is_some());
}

#[test]
fn test_token_aware_multi_word_query() {
    let fields = ["Budget", "quarterly budget report for finance"];
    assert_eq!(priority(&fields, None, "finance budget"), MatchPriority::Other);
    assert_eq!(
        priority_with_tokens(&fields, None, "finance budget"),
        MatchPriority::SecondWordStartsWith
    );
}

#[test]
fn test_token_aware_never_beats_direct_prefix() {
    assert_eq!(
        priority_with_tokens(&["notes app"], None, "notes app"),
        MatchPriority::ExactMatch
    );
    assert_eq!(
        priority_with_tokens(&["notes application"], None, "notes app"),
        MatchPriority::StartsWith
    );
}

#[test]
fn test_token_aware_single_token_falls_back_to_plain_rules() {
    assert_eq!(
        priority_with_tokens(&["Calculator"], None, "cul"),
        MatchPriority::Other
    );
}

#[test]
fn test_unicode_case_folding() {
    assert_eq!(priority(&["ÉCOLE"], None, "éco"), MatchPriority::StartsWith);
}

fn tier_of(fields: &[String], query: &str) -> MatchPriority {
    let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    priority(&refs, None, query)
}

proptest! {
    #[test]
    fn prop_priority_is_min_across_fields(
        fields in prop::collection::vec("[a-c ]{0,8}", 1..5),
        query in "[a-c]{1,3}",
    ) {
        let overall = tier_of(&fields, &query);
        let best_single = fields
            .iter()
            .map(|f| priority(&[f.as_str()], None, &query))
            .min()
            .unwrap_or(MatchPriority::Other);
        prop_assert_eq!(overall, best_single);
    }

    #[test]
    fn prop_adding_a_field_never_worsens(
        fields in prop::collection::vec("[a-c ]{0,8}", 1..4),
        extra in "[a-c ]{0,8}",
        query in "[a-c]{1,3}",
    ) {
        let before = tier_of(&fields, &query);
        let mut more = fields.clone();
        more.push(extra);
        let after = tier_of(&more, &query);
        prop_assert!(after <= before);
    }

    #[test]
    fn prop_nickname_containing_query_always_wins(
        field in "[a-z ]{0,10}",
        prefix in "[a-z]{0,4}",
        query in "[a-z]{1,4}",
    ) {
        let nickname = format!("{}{}", prefix, query);
        prop_assert_eq!(
            priority(&[field.as_str()], Some(&nickname), &query),
            MatchPriority::NicknameMatch
        );
    }
}
