//! End-to-end behaviour of the validators and the submission gate
use kahani_language_server::rules::{RuleRegistry, ViolationKind};
use kahani_language_server::validation::DiagnosticKind;
use kahani_language_server::{
    validate_content, validate_content_field, validate_identifier, RuleBook, SubmissionGate,
    ValidationOutcome,
};

fn rules() -> RuleBook {
    RuleRegistry::with_defaults()
        .get_active_profile()
        .cloned()
        .expect("default profile")
}

const STORY: &str = "एक समय की बात है, एक छोटे से गाँव में रामू नाम का लड़का रहता था।

वह रोज़ सुबह जल्दी उठकर खेतों में जाता था।

एक दिन उसने सोचा: “क्या मैं भी कुछ बड़ा कर सकता हूँ?”";

#[test]
fn empty_content_has_no_paragraphs() {
    let stats = validate_content("", &rules());

    assert_eq!(stats.paragraph_count(), 0);
    assert!(!stats.is_valid);
    assert_eq!(stats.messages(), vec!["No valid paragraph found"]);
}

#[test]
fn single_line_statistics() {
    let stats = validate_content("यह एक पंक्ति है", &rules());

    assert_eq!(stats.paragraph_count(), 1);
    assert_eq!(stats.total_word_count, 4);
    assert!(stats.is_valid);
    assert!(stats.diagnostics.is_empty());
}

#[test]
fn multi_paragraph_story() {
    let stats = validate_content(STORY, &rules());

    assert!(stats.is_valid, "{:?}", stats.diagnostics);
    assert_eq!(stats.paragraph_count(), 3);
    assert_eq!(stats.per_paragraph_word_counts(), vec![16, 9, 12]);
    assert_eq!(stats.total_word_count, 37);
}

#[test]
fn long_paragraph_reports_count_and_limit() {
    let paragraph = vec!["कहानी"; 71].join(" ");
    let stats = validate_content(&format!("छोटा अनुच्छेद\n\n{}", paragraph), &rules());

    assert!(!stats.is_valid);
    assert_eq!(stats.diagnostics.len(), 1);
    let diagnostic = &stats.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::ParagraphTooLong);
    assert_eq!(diagnostic.paragraph, Some(2));
    assert!(diagnostic.message.contains("71"));
    assert!(diagnostic.message.contains("70"));
}

#[test]
fn latin_letter_is_listed() {
    let stats = validate_content("राम ने aम खाया", &rules());

    assert!(!stats.is_valid);
    assert_eq!(stats.messages(), vec!["Paragraph 1 has invalid characters: a"]);
}

#[test]
fn identifier_reasons() {
    let rules = rules();

    assert_eq!(
        validate_identifier("-abc", &rules.identifier).kind(),
        Some(ViolationKind::StartEnd)
    );
    assert_eq!(
        validate_identifier("abc-", &rules.identifier).kind(),
        Some(ViolationKind::StartEnd)
    );
    assert_eq!(
        validate_identifier("ab--cd", &rules.identifier).kind(),
        Some(ViolationKind::Consecutive)
    );
    assert_eq!(
        validate_identifier("", &rules.identifier).kind(),
        Some(ViolationKind::Required)
    );
}

#[test]
fn validators_are_idempotent() {
    let rules = rules();
    let inputs = ["", "  ", "कथा", "-कथा", "a\nb", STORY];

    for input in inputs {
        assert_eq!(
            validate_identifier(input, &rules.identifier),
            validate_identifier(input, &rules.identifier)
        );
        assert_eq!(
            validate_content_field(input, &rules.content),
            validate_content_field(input, &rules.content)
        );
        assert_eq!(validate_content(input, &rules), validate_content(input, &rules));
    }
}

#[test]
fn statistics_invariants() {
    let rules = rules();
    let long = vec!["शब्द"; 90].join("-");
    let inputs = [
        "",
        "\n",
        STORY,
        "abc\n\nxyz\n\nक",
        "  \r\n एक \r\n\r\n दो तीन ",
        long.as_str(),
    ];

    for input in inputs {
        let stats = validate_content(input, &rules);
        let counts = stats.per_paragraph_word_counts();

        assert_eq!(counts.len(), stats.paragraph_count());
        assert_eq!(counts.iter().sum::<usize>(), stats.total_word_count);
        if stats.is_valid {
            assert!(stats.paragraph_count() >= 1);
            assert!(stats.diagnostics.is_empty());
        }
    }
}

#[test]
fn gate_requires_all_three_checks() {
    let rules = rules();
    let gate = SubmissionGate::new(&rules);

    // (story id, content, expected)
    let cases = [
        ("रामू की कहानी", STORY, true),
        ("", STORY, false),
        ("रामू-", STORY, false),
        ("रामू की कहानी", "", false),
        ("रामू की कहानी", "छोटी", false),
        ("रामू की कहानी", "यह कहानी <b>है</b>", false),
        ("रामू की कहानी", "this is not hindi at all", false),
    ];

    for (story_id, content, expected) in cases {
        let report = gate.evaluate(story_id, content);
        let all_pass = report.identifier == ValidationOutcome::Valid
            && report.content == ValidationOutcome::Valid
            && report.statistics.is_valid;

        assert_eq!(report.is_open(), expected, "{:?}", story_id);
        assert_eq!(report.is_open(), all_pass);
        assert_eq!(gate.can_submit(story_id, content), expected);
    }
}

#[test]
fn submission_payload_after_gate() {
    let rules = rules();
    let gate = SubmissionGate::new(&rules);

    let submission = gate
        .evaluate(" रामू की कहानी ", &format!("\n{}\n\n", STORY))
        .into_submission()
        .expect("gate open");
    let json: serde_json::Value = serde_json::from_str(&submission.to_json().unwrap()).unwrap();

    assert_eq!(json["storyId"], "रामू की कहानी");
    assert_eq!(json["storyContent"], STORY);
}
