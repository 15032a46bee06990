use std::fs;
use std::path::{Path, PathBuf};

use answerlist::{BuildArgs, GroupArgs, build_json, group_json};
use wordnet_lexicon::LoadMode;

const POOL: &str = r#"{
    "5": ["apple", "apples", "Paris", "paris", "house", "leaves"],
    "6": ["banana", "houses", "garden", "bright", "France"],
    "7": ["running", "gardens", "bananas", "happily"],
    "8": ["children"]
}"#;

const CORPUS: &str = "\
house 30000
run 9000
france 9000
paris 8000
child 7000
apple 5000
leaf 3000
garden 1500
banana 1200
bright 900
happily 850
";

const GAZETTEER: &str = r#"{
    "countries": { "FR": { "name": "France", "alternatenames": ["French Republic"] } },
    "cities": [ { "name": "Paris", "alternatenames": ["Lutetia"] } ]
}"#;

fn wordnet_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates")
        .join("wordnet-lexicon")
        .join("tests")
        .join("fixtures")
        .join("wn")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn make_args(dir: &Path) -> BuildArgs {
    BuildArgs {
        pool: write(dir, "words.json", POOL),
        frequency: write(dir, "en_50k.txt", CORPUS)
            .to_string_lossy()
            .into_owned(),
        wordnet_dir: Some(wordnet_fixture()),
        wordnet_mode: LoadMode::Owned,
        gazetteer: write(dir, "places.json", GAZETTEER),
        vocabulary: None,
        tags: None,
        supplement: None,
        min_len: 5,
        max_len: 7,
        threshold: 800,
        output: None,
    }
}

#[test]
fn builds_ranked_answer_set_from_wordnet_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let json = build_json(&make_args(dir.path())).unwrap();
    assert_eq!(
        json,
        r#"{
  "5": [
    "house",
    "child",
    "apple"
  ],
  "6": [
    "garden",
    "banana",
    "bright"
  ],
  "7": [
    "happily"
  ]
}"#
    );
}

#[test]
fn tag_table_and_word_list_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    args.tags = Some(write(dir.path(), "tags.tsv", "bright\tNNP\nParis\tNN\n"));
    args.vocabulary = Some(write(
        dir.path(),
        "vocab.txt",
        "house\napple\nbanana\nbright\nhappily\n",
    ));

    let json = build_json(&args).unwrap();
    let answers: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(answers["5"], serde_json::json!(["house", "apple"]));
    assert_eq!(answers["6"], serde_json::json!(["banana"]));
    assert_eq!(answers["7"], serde_json::json!(["happily"]));
}

#[test]
fn supplement_supplies_shortest_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    args.supplement = Some(write(dir.path(), "five.txt", "crane\nslate\n"));

    let json = build_json(&args).unwrap();
    let answers: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(answers["5"], serde_json::json!(["crane", "slate"]));
    assert_eq!(answers["6"], serde_json::json!(["garden", "banana", "bright"]));
}

#[test]
fn missing_corpus_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    args.frequency = dir.path().join("absent.txt").to_string_lossy().into_owned();
    let output = dir.path().join("answers.json");
    args.output = Some(output.clone());

    let err = answerlist::commands::build(&args).unwrap_err();
    assert!(format!("{err:#}").contains("frequency corpus unavailable"));
    assert!(!output.exists());
}

#[test]
fn unreachable_corpus_url_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    args.frequency = "http://127.0.0.1:1/en_50k.txt".to_string();
    let output = dir.path().join("answers.json");
    args.output = Some(output.clone());

    let err = answerlist::commands::build(&args).unwrap_err();
    assert!(format!("{err:#}").contains("frequency corpus unavailable"));
    assert!(!output.exists());
}

#[test]
fn malformed_pool_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    args.pool = write(dir.path(), "bad.json", r#"{"five": ["apple"]}"#);
    let output = dir.path().join("answers.json");
    args.output = Some(output.clone());

    let err = answerlist::commands::build(&args).unwrap_err();
    assert!(format!("{err:#}").contains("malformed input"));
    assert!(!output.exists());
}

#[test]
fn build_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = make_args(dir.path());
    let output = dir.path().join("out").join("answers.json");
    args.output = Some(output.clone());

    answerlist::commands::build(&args).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["7"], serde_json::json!(["happily"]));
}

#[test]
fn groups_word_list_by_length() {
    let dir = tempfile::tempdir().unwrap();
    let args = GroupArgs {
        wordlist: write(dir.path(), "words.txt", "\"apple\"\n\"banana\"\n\"cat\"\n\"dog\"\n"),
        output: None,
    };
    let json = group_json(&args).unwrap();
    let pool: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        pool,
        serde_json::json!({"3": ["cat", "dog"], "5": ["apple"], "6": ["banana"]})
    );
}
