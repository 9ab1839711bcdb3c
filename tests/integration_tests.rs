use stable_match::core::{ConfigProvider, OutputFormat, ReportSink};
use stable_match::{InMemorySource, LocalSink, LocalSource, MatchEngine, MatchError, TomlConfig};
use tempfile::TempDir;

struct TestConfig {
    input: String,
    proposer: Option<String>,
    verify: bool,
    show_preferences: bool,
}

impl TestConfig {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            proposer: None,
            verify: true,
            show_preferences: false,
        }
    }
}

impl ConfigProvider for TestConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn proposer(&self) -> Option<&str> {
        self.proposer.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn output_path(&self) -> Option<&str> {
        None
    }

    fn verify_stability(&self) -> bool {
        self.verify
    }

    fn show_preferences(&self) -> bool {
        self.show_preferences
    }
}

const MARKET: &str = "\
man Abe Cath Bea Ada
man Bob Ada Cath Bea
man Col Ada Bea Cath
woman Ada Abe Col Bob
woman Bea Bob Abe Col
woman Cath Col Bob Abe
";

#[test]
fn test_end_to_end_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("prefs.txt");
    std::fs::write(&input, MARKET).unwrap();
    let output = temp_dir.path().join("out/matches.csv");

    let config = TestConfig::new(input.to_str().unwrap());
    let engine = MatchEngine::new(LocalSource::new(config.input_path()), config);
    let report = engine.run().unwrap();

    assert_eq!(report.proposer_kind, "man");
    assert_eq!(report.receiver_kind, "woman");
    assert_eq!(report.matches.proposer_for("Ada"), Some("Col"));
    assert_eq!(report.matches.proposer_for("Bea"), Some("Abe"));
    assert_eq!(report.matches.proposer_for("Cath"), Some("Bob"));
    assert_eq!(report.stats.displacements, 2);
    assert_eq!(report.is_stable(), Some(true));

    let csv = report.render(OutputFormat::Csv).unwrap();
    LocalSink::new(output.to_str()).write(&csv).unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "receiver,proposer\nAda,Col\nBea,Abe\nCath,Bob\n"
    );
}

#[test]
fn test_receivers_can_propose_instead() {
    let mut config = TestConfig::new("inline");
    config.proposer = Some("woman".to_string());
    let engine = MatchEngine::new(InMemorySource::new(MARKET), config);

    let report = engine.run().unwrap();

    assert_eq!(report.proposer_kind, "woman");
    assert_eq!(report.matches.proposer_for("Abe"), Some("Ada"));
    assert_eq!(report.matches.proposer_for("Bob"), Some("Bea"));
    assert_eq!(report.matches.proposer_for("Col"), Some("Cath"));
    assert_eq!(report.is_stable(), Some(true));
}

#[test]
fn test_unlisted_suitor_stays_unmatched() {
    let input = "\
a Alice X Y
b X Alice Bob
b Y Alice
a Carol X
";
    let engine = MatchEngine::new(InMemorySource::new(input), TestConfig::new("inline"));
    let report = engine.run().unwrap();

    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches.proposer_for("X"), Some("Alice"));
    assert_eq!(report.unmatched_proposers, ["Carol"]);
    assert_eq!(report.unmatched_receivers, ["Y"]);
    assert_eq!(report.is_stable(), Some(true));
}

#[test]
fn test_show_preferences_dumps_pruned_lists() {
    let mut config = TestConfig::new("inline");
    config.show_preferences = true;
    let input = "\
p A X Y
p B X Y
r X B A
r Y A B
";
    let report = MatchEngine::new(InMemorySource::new(input), config).run().unwrap();

    let dump = report.preferences.as_ref().unwrap();
    assert_eq!(dump.before[0].by_name("A").unwrap().list(), ["X", "Y"]);
    assert_eq!(dump.after[0].by_name("A").unwrap().list(), ["Y"]);
    assert_eq!(dump.after[1].by_name("X").unwrap().list(), ["B"]);

    let text = report.to_text();
    assert!(text.contains("Preferences before matching:"));
    assert!(text.contains("Preferences after matching:"));
    assert!(text.contains("  A: [Y]"));
    assert!(text.contains("Stability check: passed"));
}

#[test]
fn test_single_type_input_matches_nothing() {
    let engine = MatchEngine::new(
        InMemorySource::new("man Abe Ada\nman Bob Ada\n"),
        TestConfig::new("inline"),
    );
    let report = engine.run().unwrap();

    assert!(report.matches.is_empty());
    assert_eq!(report.unmatched_proposers, ["Abe", "Bob"]);
    assert!(report.receiver_kind.is_empty());
}

#[test]
fn test_unknown_proposer_type_is_an_error() {
    let mut config = TestConfig::new("inline");
    config.proposer = Some("robot".to_string());
    let result = MatchEngine::new(InMemorySource::new(MARKET), config).run();

    assert!(matches!(result, Err(MatchError::UnknownGroupType { .. })));
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.txt");
    let config = TestConfig::new(missing.to_str().unwrap());

    let err = MatchEngine::new(LocalSource::new(config.input_path()), config)
        .run()
        .unwrap_err();
    assert!(matches!(err, MatchError::IoError(_)));
    assert_eq!(err.severity(), stable_match::utils::error::ErrorSeverity::Medium);
}

#[test]
fn test_toml_config_drives_engine() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("market.txt");
    std::fs::write(&input, MARKET).unwrap();

    let toml_content = format!(
        r#"
[input]
path = "{}"

[matching]
verify = true

[output]
format = "json"
"#,
        input.to_str().unwrap().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    let format = config.output_format();

    let engine = MatchEngine::new(LocalSource::new(config.input_path()), config);
    let json = engine.run().unwrap().render(format).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["matches"]["Ada"], "Col");
    assert_eq!(value["blocking_pairs"], serde_json::json!([]));
    assert_eq!(value["stats"]["displacements"], 2);
}

#[test]
fn test_repeated_agent_names_load_and_match() {
    let input = "\
man A X Y
man A X Y
woman X A
woman Y A
woman X
";
    let engine = MatchEngine::new(InMemorySource::new(input), TestConfig::new("inline"));
    let report = engine.run().unwrap();

    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches.proposer_for("X"), Some("A"));
    assert!(report.unmatched_proposers.is_empty());
    assert_eq!(report.unmatched_receivers, ["Y"]);
    assert_eq!(report.is_stable(), Some(true));
}
