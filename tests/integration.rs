//! Integration tests for the full pipeline with real files

use chatseed::core::output::read_dialogues;
use chatseed::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn fixture(name: &str) -> PathBuf {
    ensure_fixtures();
    Path::new(fixtures_dir()).join(name)
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Android dashed format, two conversations and a one-sided burst
        let android = "12/25/21, 12:51 PM - Razanius12: hey
12/25/21, 12:52 PM - My Partner: hi!
12/25/21, 12:52 PM - My Partner: what's up?
12/25/21, 12:53 PM - Razanius12: not much
just got home
12/25/21, 12:54 PM - My Partner: <Media omitted>
12/25/21, 12:55 PM - My Partner: nice
12/25/21, 3:10 PM - Razanius12: you there?
12/25/21, 3:11 PM - Razanius12: hello?
12/25/21, 3:12 PM - Razanius12: ok
12/25/21, 3:13 PM - Razanius12: bye
12/25/21, 8:00 PM - Razanius12: dinner?
12/25/21, 8:01 PM - My Partner: sure https://maps.example.com/place
12/25/21, 8:02 PM - Razanius12: see you
12/25/21, 8:03 PM - Friend: can I come
12/25/21, 8:04 PM - My Partner: see you there
12/25/21, 8:05 PM - Razanius12: 👍";
        fs::write(format!("{dir}/whatsapp_android.txt"), android).unwrap();

        // iOS bracketed format with seconds and the encryption banner
        let ios = "[1/15/24, 10:30:00 AM] Alice: \u{200E}Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.
[1/15/24, 10:30:05 AM] Alice: Hello!
[1/15/24, 10:31:00 AM] Bob: Hi Alice!
[1/15/24, 10:31:30 AM] Alice: How are you?
[1/15/24, 10:32:00 AM] Bob: Great, thanks
[1/15/24, 10:32:30 AM] Bob: \u{200E}image omitted";
        fs::write(format!("{dir}/whatsapp_ios.txt"), ios).unwrap();

        // EU dotted format with Cyrillic text
        let eu = "15.01.24, 10:30 - Алиса: Привет!
15.01.24, 10:31 - Борис: Привет, как дела?
15.01.24, 10:32 - Алиса: Хорошо
15.01.24, 10:33 - Борис: Отлично";
        fs::write(format!("{dir}/whatsapp_eu.txt"), eu).unwrap();
    });
}

fn run(config: PipelineConfig, content: &str) -> PipelineOutput {
    Pipeline::new(config.with_seed(42)).unwrap().run(content).unwrap()
}

fn turns(output: &PipelineOutput) -> Vec<Vec<(Role, String)>> {
    read_dialogues(&output.document, &RoleLabels::default())
        .unwrap()
        .into_iter()
        .map(|d| d.turns().iter().map(|t| (t.role, t.text.clone())).collect())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_gap_larger_than_threshold_gives_empty_output() {
    let content = "[1/15/24, 10:00:00 AM] Alice: first\n[1/15/24, 10:20:00 AM] Bob: second";
    let output = run(PipelineConfig::new("Alice", "Bob"), content);

    assert_eq!(output.report.blocks, 2);
    assert_eq!(output.report.rejected_short, 2);
    assert_eq!(output.report.selected, 0);
    assert!(turns(&output).is_empty());
}

#[test]
fn test_five_alternating_messages_one_block() {
    let content = "[1/15/24, 10:00:00 AM] Alice: one
[1/15/24, 10:00:10 AM] Bob: two
[1/15/24, 10:00:20 AM] Alice: three
[1/15/24, 10:00:30 AM] Bob: four
[1/15/24, 10:00:40 AM] Alice: five";
    let output = run(
        PipelineConfig::new("Alice", "Bob").with_character_limit(1_000_000),
        content,
    );

    let entries = turns(&output);
    assert_eq!(entries.len(), 1);
    let texts: Vec<&str> = entries[0].iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three", "four", "five"]);
    assert_eq!(entries[0][1].0, Role::Character);
}

#[test]
fn test_media_placeholder_removed() {
    let content = "[1/15/24, 10:00:00 AM] Alice: one
[1/15/24, 10:00:10 AM] Bob: <Media omitted>
[1/15/24, 10:00:20 AM] Alice: two
[1/15/24, 10:00:30 AM] Bob: three
[1/15/24, 10:00:40 AM] Alice: four";
    let output = run(PipelineConfig::new("Alice", "Bob"), content);

    let entries = turns(&output);
    assert_eq!(entries[0].len(), 4);
    assert!(!output.document.contains("Media omitted"));
}

#[test]
fn test_media_placeholder_replaced_in_place() {
    let content = "[1/15/24, 10:00:00 AM] Alice: one
[1/15/24, 10:00:10 AM] Bob: <Media omitted>
[1/15/24, 10:00:20 AM] Alice: two
[1/15/24, 10:00:30 AM] Bob: three";
    let config = PipelineConfig::new("Alice", "Bob")
        .with_filter(FilterPolicy::new().with_media_replacement("<sends an attachment>"));
    let output = run(config, content);

    let entries = turns(&output);
    assert_eq!(
        entries[0][1],
        (Role::Character, "<sends an attachment>".to_string())
    );
    assert_eq!(entries[0].len(), 4);
}

// =============================================================================
// Fixture files
// =============================================================================

#[test]
fn test_android_fixture_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("card.json");

    let pipeline = Pipeline::new(PipelineConfig::new("Razanius12", "My Partner").with_seed(1))
        .unwrap();
    let report = pipeline
        .run_file(&fixture("whatsapp_android.txt"), &output_path)
        .unwrap();

    assert_eq!(report.parsed, 16);
    assert_eq!(report.removed, 2);
    assert_eq!(report.unattributed, 1);
    assert_eq!(report.blocks, 3);
    assert_eq!(report.rejected_one_sided, 1);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.selected, 2);

    let document = fs::read_to_string(&output_path).unwrap();
    assert!(document.contains(r#""{{random_user_1}}": "not much just got home""#));
    assert!(document.contains(r#""{{char}}": "hi!",
      "{{char}}": "what's up?""#));
    assert!(!document.contains("Friend"));
    assert!(!document.contains("can I come"));
}

#[test]
fn test_ios_fixture_skips_banner_and_media() {
    let content = fs::read_to_string(fixture("whatsapp_ios.txt")).unwrap();
    let output = run(PipelineConfig::new("Alice", "Bob"), &content);

    assert_eq!(output.report.parsed, 5);
    assert_eq!(output.report.removed, 1);
    let entries = turns(&output);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0][0], (Role::User, "Hello!".to_string()));
    assert!(!output.document.contains("encrypted"));
}

#[test]
fn test_eu_fixture_with_cyrillic_names() {
    let content = fs::read_to_string(fixture("whatsapp_eu.txt")).unwrap();
    let output = run(PipelineConfig::new("Алиса", "Борис"), &content);

    assert_eq!(output.report.selected, 1);
    assert!(output.document.contains(r#""{{char}}": "Привет, как дела?""#));
}

// =============================================================================
// Properties on the fixtures
// =============================================================================

#[test]
fn test_parser_counts_header_lines() {
    let content = fs::read_to_string(fixture("whatsapp_android.txt")).unwrap();
    let headers = content
        .lines()
        .filter(|line| line.starts_with("12/25/21"))
        .count();
    assert_eq!(WhatsAppParser::new().parse_str(&content).len(), headers);
}

#[test]
fn test_segmentation_is_repeatable() {
    let content = fs::read_to_string(fixture("whatsapp_android.txt")).unwrap();
    let parser = WhatsAppParser::new();

    let boundaries = |split: u32| -> Vec<usize> {
        segment(parser.records(&content), split)
            .map(|c| c.len())
            .collect()
    };
    assert_eq!(boundaries(15), boundaries(15));
    assert_eq!(boundaries(15), vec![6, 4, 6]);
    assert_eq!(boundaries(1000), vec![16]);
}

#[test]
fn test_every_turn_belongs_to_a_participant() {
    let content = fs::read_to_string(fixture("whatsapp_android.txt")).unwrap();
    let output = run(
        PipelineConfig::new("Razanius12", "My Partner").with_min_messages(1),
        &content,
    );
    for dialogue in &output.dialogues {
        for turn in dialogue.turns() {
            assert!(matches!(turn.role, Role::User | Role::Character));
        }
    }
    assert!(!output.document.contains("can I come"));
}

#[test]
fn test_round_trip_matches_selected_dialogues() {
    let content = fs::read_to_string(fixture("whatsapp_android.txt")).unwrap();
    for style in [OutputStyle::DuplicateKeys, OutputStyle::TurnObjects] {
        let output = run(
            PipelineConfig::new("Razanius12", "My Partner").with_style(style),
            &content,
        );
        let read_back = read_dialogues(&output.document, &RoleLabels::default()).unwrap();
        let expected: Vec<Vec<Turn>> = output.dialogues.iter().map(|d| d.turns().to_vec()).collect();
        let actual: Vec<Vec<Turn>> = read_back.iter().map(|d| d.turns().to_vec()).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_limit_never_exceeded_on_fixture() {
    let content = fs::read_to_string(fixture("whatsapp_android.txt")).unwrap();
    for limit in [0, 40, 150, 300, 400, 1000, 20_000] {
        let output = run(
            PipelineConfig::new("Razanius12", "My Partner").with_character_limit(limit),
            &content,
        );
        if output.report.selected > 0 {
            assert!(output.document.chars().count() <= limit, "limit {limit}");
        }
    }
}

#[test]
fn test_missing_input_is_io_error() {
    let pipeline = Pipeline::new(PipelineConfig::new("A", "B")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("out.json");

    let err = pipeline
        .run_file(Path::new("tests/fixtures/does_not_exist.txt"), &output_path)
        .unwrap_err();
    assert!(err.is_io());
    assert!(!output_path.exists());
}
