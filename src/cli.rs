use std::path::{Path, PathBuf};

use answerlist_core::{
    DEFAULT_CORPUS_URL, DEFAULT_FREQ_THRESHOLD, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, INTAKE_WINDOW,
    PipelineConfig,
};
use clap::{Args, Parser, Subcommand};
use wordnet_lexicon::LoadMode;

const DEFAULT_POOL: &str = "words.json";
const DEFAULT_WORDNET_PATH: &str = "open_english_wordnet_2024/oewn2024";
const DEFAULT_WORDNET_IMAGE_PATH: &str = "/app/wordnet";

#[derive(Parser, Debug)]
#[command(name = "answerlist")]
#[command(about = "Builds frequency-ranked answer word lists for word-guessing games")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group a plain word list (one word per line) into a length-keyed pool.
    Group(GroupArgs),
    /// Filter, deduplicate, and rank a word pool into answer lists.
    Build(BuildArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GroupArgs {
    /// Word list, one (optionally double-quoted) word per line.
    pub wordlist: PathBuf,
    /// Write JSON here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Raw word pool JSON (`{"5": [...], "6": [...]}`).
    #[arg(long, env = "ANSWERLIST_POOL", default_value = DEFAULT_POOL)]
    pub pool: PathBuf,
    /// `word count` corpus: a file path or an http(s) URL.
    #[arg(long, env = "FREQUENCY_SOURCE", default_value = DEFAULT_CORPUS_URL)]
    pub frequency: String,
    /// WordNet dict directory with `index.*` and `*.exc` files.
    #[arg(long, env = "WORDNET_DIR")]
    pub wordnet_dir: Option<PathBuf>,
    #[arg(long, env = "WORDNET_LOAD_MODE", default_value = "mmap", value_parser = parse_load_mode)]
    pub wordnet_mode: LoadMode,
    /// Country/city names JSON.
    #[arg(long, env = "GAZETTEER_PATH")]
    pub gazetteer: PathBuf,
    /// Reference vocabulary word list. Defaults to the WordNet lemmas.
    #[arg(long, env = "VOCABULARY_PATH")]
    pub vocabulary: Option<PathBuf>,
    /// Precomputed `token<TAB>TAG` file. Defaults to capitalization tagging.
    #[arg(long, env = "TAGS_PATH")]
    pub tags: Option<PathBuf>,
    /// Pre-vetted words used verbatim for the `min-len` bucket.
    #[arg(long, env = "SUPPLEMENT_PATH")]
    pub supplement: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_MIN_LEN)]
    pub min_len: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    pub max_len: usize,
    #[arg(long, default_value_t = DEFAULT_FREQ_THRESHOLD)]
    pub threshold: u64,
    /// Write JSON here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            min_len: self.min_len,
            max_len: self.max_len,
            freq_threshold: self.threshold,
            intake: INTAKE_WINDOW,
        }
    }

    pub fn wordnet_path(&self) -> PathBuf {
        self.wordnet_dir.clone().unwrap_or_else(default_wordnet_path)
    }
}

fn default_wordnet_path() -> PathBuf {
    let local = Path::new(DEFAULT_WORDNET_PATH);
    if local.exists() {
        return local.to_path_buf();
    }
    PathBuf::from(DEFAULT_WORDNET_IMAGE_PATH)
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    LoadMode::parse(raw).ok_or_else(|| format!("unknown load mode {raw:?} (expected mmap or owned)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_flags_with_defaults() {
        let cli = Cli::try_parse_from([
            "answerlist",
            "build",
            "--gazetteer",
            "places.json",
            "--frequency",
            "corpus.txt",
            "--max-len",
            "8",
            "--wordnet-mode",
            "owned",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.pool, PathBuf::from("words.json"));
        assert_eq!(args.frequency, "corpus.txt");
        assert_eq!(args.wordnet_mode, LoadMode::Owned);
        let config = args.pipeline_config();
        assert_eq!((config.min_len, config.max_len, config.freq_threshold), (5, 8, 800));
        assert_eq!(config.intake, 5..=10);
    }

    #[test]
    fn rejects_unknown_load_mode() {
        let err = Cli::try_parse_from([
            "answerlist",
            "build",
            "--gazetteer",
            "places.json",
            "--wordnet-mode",
            "lazy",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("unknown load mode"));
    }

    #[test]
    fn parses_group_command() {
        let cli = Cli::try_parse_from(["answerlist", "group", "words.txt", "-o", "words.json"])
            .unwrap();
        let Commands::Group(args) = cli.command else {
            panic!("expected group");
        };
        assert_eq!(args.wordlist, PathBuf::from("words.txt"));
        assert_eq!(args.output, Some(PathBuf::from("words.json")));
    }
}
