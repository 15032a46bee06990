//! Where the pipeline's inputs come from and where its output goes.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use answerlist_core::{FrequencyTable, PipelineError};
use tempfile::NamedTempFile;
use tracing::info;

/// Load the frequency corpus from a file path or an http(s) URL.
pub fn load_frequency(source: &str) -> Result<FrequencyTable> {
    let start = Instant::now();
    let table = if is_url(source) {
        info!("fetching frequency corpus from {source}");
        fetch_frequency(source)?
    } else {
        info!("reading frequency corpus from {source}");
        FrequencyTable::from_path(source)?
    };
    info!("frequency table loaded in {} ms", start.elapsed().as_millis());
    Ok(table)
}

fn fetch_frequency(url: &str) -> Result<FrequencyTable, PipelineError> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| PipelineError::unavailable("frequency corpus", format!("{url}: {e}")))?;
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| PipelineError::unavailable("frequency corpus", format!("{url}: {e}")))?;
    FrequencyTable::from_corpus_str(&body)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn open_buffered(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Print `json` to stdout, or replace `path` atomically with it.
pub fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        println!("{json}");
        return Ok(());
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    temp.write_all(json.as_bytes())?;
    temp.write_all(b"\n")?;
    temp.persist(path)
        .with_context(|| format!("persist {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_urls_from_paths() {
        assert!(is_url("https://example.com/en_50k.txt"));
        assert!(is_url("http://localhost/corpus"));
        assert!(!is_url("corpus/en_50k.txt"));
        assert!(!is_url("ftp://example.com/x"));
    }

    #[test]
    fn writes_output_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("answers.json");
        write_output("{}", Some(&target)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}\n");

        write_output("{\"5\": []}", Some(&target)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{\"5\": []}\n");
        assert_eq!(fs::read_dir(dir.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn unreachable_corpus_url_is_resource_error() {
        let err = load_frequency("http://127.0.0.1:1/en_50k.txt").unwrap_err();
        assert!(err.to_string().contains("frequency corpus unavailable"));
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ResourceUnavailable {
                resource: "frequency corpus",
                ..
            })
        ));
    }

    #[test]
    fn missing_corpus_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = load_frequency(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("frequency corpus unavailable"));
    }
}
