use std::time::Instant;

use anyhow::{Context, Result};
use answerlist_core::{
    CaseTagger, Gazetteer, LemmaResolver, LexicalClassifier, Pipeline, RawWordPool, Supplement,
    TagTable, WordList,
};
use answerlist_types::{Tagger, Vocabulary};
use tracing::info;
use wordnet_lexicon::Lexicon;

use crate::cli::{BuildArgs, Cli, Commands, GroupArgs};
use crate::sources::{load_frequency, open_buffered, write_output};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Group(args) => group(&args),
        Commands::Build(args) => build(&args),
    }
}

pub fn group(args: &GroupArgs) -> Result<()> {
    let json = group_json(args)?;
    write_output(&json, args.output.as_deref())
}

pub fn group_json(args: &GroupArgs) -> Result<String> {
    let reader = open_buffered(&args.wordlist)?;
    let pool = RawWordPool::from_word_list(reader)
        .with_context(|| format!("read word list {}", args.wordlist.display()))?;
    Ok(pool.to_json_pretty()?)
}

pub fn build(args: &BuildArgs) -> Result<()> {
    let json = build_json(args)?;
    write_output(&json, args.output.as_deref())
}

/// Load every resource, run the pipeline, and render the answer set.
///
/// Any failure returns before output exists.
pub fn build_json(args: &BuildArgs) -> Result<String> {
    let config = args.pipeline_config();
    config.validate()?;

    let pool = RawWordPool::from_path(&args.pool)
        .with_context(|| format!("load word pool {}", args.pool.display()))?;
    info!(
        "pool: {} tokens in {} buckets",
        pool.token_count(),
        pool.buckets().count()
    );

    let freq = load_frequency(&args.frequency)?;

    let wordnet_path = args.wordnet_path();
    info!(
        "using wordnet at {} (mode: {:?})",
        wordnet_path.display(),
        args.wordnet_mode
    );
    let wn_start = Instant::now();
    let lexicon = Lexicon::load_with_mode(&wordnet_path, args.wordnet_mode)
        .with_context(|| format!("load WordNet from {}", wordnet_path.display()))?;
    info!(
        "wordnet loaded in {} ms ({} lemmas)",
        wn_start.elapsed().as_millis(),
        lexicon.word_count()
    );

    let gazetteer = Gazetteer::from_path(&args.gazetteer)?;
    let tagger: Box<dyn Tagger> = match &args.tags {
        Some(path) => Box::new(TagTable::from_path(path)?),
        None => Box::new(CaseTagger),
    };
    let word_list = args.vocabulary.as_ref().map(WordList::from_path).transpose()?;
    let vocabulary: &dyn Vocabulary = match &word_list {
        Some(list) => list,
        None => &lexicon,
    };
    let supplement = args
        .supplement
        .as_ref()
        .map(|path| Supplement::from_path(path, config.min_len))
        .transpose()?;

    let mut pipeline = Pipeline::new(
        LexicalClassifier::new(&*tagger, vocabulary),
        LemmaResolver::new(&lexicon),
        &gazetteer,
    );
    if let Some(supplement) = &supplement {
        pipeline = pipeline.with_supplement(supplement);
    }

    let start = Instant::now();
    let answers = pipeline.build_answer_set(&pool, &freq, &config)?;
    info!(
        "built {} answers in {} ms",
        answers.word_count(),
        start.elapsed().as_millis()
    );
    Ok(answers.to_json_pretty()?)
}
