use std::fs;
use std::path::Path;

use sentiment_core::lexicon::SentimentLexicon;
use tracing::info;

use crate::adapters::object_store::ObjectSource;
use crate::error::PipelineError;

const COMPONENT: &str = "lexicon_resource";

/// Object that holds the lexicon when it is not yet on local disk.
pub struct RemoteLexicon<'a> {
    pub key: &'a str,
    pub source: &'a dyn ObjectSource,
}

/// Loads the lexicon at `path`, fetching it from `remote` first when the file
/// is missing. A fetched copy is cached for later runs only once it parses.
pub fn load_lexicon(
    path: &Path,
    remote: Option<RemoteLexicon<'_>>,
) -> Result<SentimentLexicon, PipelineError> {
    let lexicon = match remote {
        Some(remote) if !path.is_file() => fetch_lexicon(path, &remote)?,
        _ => SentimentLexicon::load(path)?,
    };

    info!(
        component = COMPONENT,
        path = %path.display(),
        entries = lexicon.len(),
        fingerprint = lexicon.fingerprint(),
        "loaded sentiment lexicon"
    );
    Ok(lexicon)
}

fn fetch_lexicon(
    path: &Path,
    remote: &RemoteLexicon<'_>,
) -> Result<SentimentLexicon, PipelineError> {
    info!(
        component = COMPONENT,
        key = remote.key,
        path = %path.display(),
        "fetching sentiment lexicon"
    );

    let body = remote
        .source
        .read_object(remote.key)
        .map_err(PipelineError::ResourceFetch)?;
    let text = String::from_utf8(body).map_err(|error| {
        PipelineError::ResourceFetch(format!(
            "lexicon object {} is not valid UTF-8: {error}",
            remote.key
        ))
    })?;
    let lexicon = SentimentLexicon::from_text(&text)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            PipelineError::ResourceFetch(format!(
                "failed to create lexicon directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    // Write beside the target and rename so an interrupted download never
    // leaves a truncated lexicon behind.
    let partial_path = path.with_extension("partial");
    fs::write(&partial_path, text.as_bytes()).map_err(|error| {
        PipelineError::ResourceFetch(format!(
            "failed to write lexicon to {}: {error}",
            partial_path.display()
        ))
    })?;
    fs::rename(&partial_path, path).map_err(|error| {
        PipelineError::ResourceFetch(format!(
            "failed to move lexicon into place at {}: {error}",
            path.display()
        ))
    })?;

    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use sentiment_core::lexicon::LexiconError;

    use super::*;
    use crate::adapters::object_store::ObjectListing;

    const LEXICON_TEXT: &str = "love\t3.2\nterrible\t-2.1\n";

    struct CountingSource {
        body: Cell<Option<&'static str>>,
        reads: Cell<usize>,
    }

    impl CountingSource {
        fn new(body: Option<&'static str>) -> Self {
            Self {
                body: Cell::new(body),
                reads: Cell::new(0),
            }
        }
    }

    impl ObjectSource for CountingSource {
        fn list_keys(&self) -> Result<ObjectListing, String> {
            Ok(ObjectListing::default())
        }

        fn read_object(&self, key: &str) -> Result<Vec<u8>, String> {
            self.reads.set(self.reads.get() + 1);
            self.body
                .get()
                .map(|body| body.as_bytes().to_vec())
                .ok_or_else(|| format!("no such key: {key}"))
        }
    }

    #[test]
    fn loads_existing_file_without_fetching() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("vader_lexicon.txt");
        fs::write(&path, LEXICON_TEXT).expect("lexicon should be written");
        let source = CountingSource::new(Some("unused\t1.0\n"));

        let lexicon = load_lexicon(
            &path,
            Some(RemoteLexicon {
                key: "lexicons/vader_lexicon.txt",
                source: &source,
            }),
        )
        .expect("lexicon should load");

        assert_eq!(lexicon.len(), 2);
        assert_eq!(source.reads.get(), 0);
    }

    #[test]
    fn fetches_missing_file_into_nested_directory() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("sentiment_data").join("vader_lexicon.txt");
        let source = CountingSource::new(Some(LEXICON_TEXT));

        let lexicon = load_lexicon(
            &path,
            Some(RemoteLexicon {
                key: "lexicons/vader_lexicon.txt",
                source: &source,
            }),
        )
        .expect("lexicon should be fetched and loaded");

        assert_eq!(lexicon.valence("terrible"), Some(-2.1));
        assert_eq!(source.reads.get(), 1);
        assert_eq!(
            fs::read_to_string(&path).expect("cached lexicon should exist"),
            LEXICON_TEXT
        );
        assert!(!path.with_extension("partial").exists());
    }

    #[test]
    fn missing_file_without_remote_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("vader_lexicon.txt");

        let error = load_lexicon(&path, None).expect_err("missing lexicon should fail");
        assert!(matches!(
            error,
            PipelineError::Lexicon(LexiconError::Unavailable(_))
        ));
    }

    #[test]
    fn failed_fetch_is_a_resource_error() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("vader_lexicon.txt");
        let source = CountingSource::new(None);

        let error = load_lexicon(
            &path,
            Some(RemoteLexicon {
                key: "lexicons/missing.txt",
                source: &source,
            }),
        )
        .expect_err("fetch should fail");

        assert!(matches!(
            error,
            PipelineError::ResourceFetch(message) if message.contains("lexicons/missing.txt")
        ));
        assert!(!path.exists());
    }

    #[test]
    fn malformed_remote_body_is_not_cached() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("sentiment_data").join("vader_lexicon.txt");
        let source = CountingSource::new(Some("<Error>AccessDenied</Error>"));
        let remote = || RemoteLexicon {
            key: "lexicons/vader_lexicon.txt",
            source: &source,
        };

        let error = load_lexicon(&path, Some(remote())).expect_err("error page should not parse");
        assert!(matches!(
            error,
            PipelineError::Lexicon(LexiconError::Parse { line: 1, .. })
        ));
        assert!(!path.exists());
        assert!(!path.with_extension("partial").exists());

        source.body.set(Some(LEXICON_TEXT));
        let lexicon = load_lexicon(&path, Some(remote())).expect("fixed remote should load");

        assert_eq!(lexicon.len(), 2);
        assert_eq!(source.reads.get(), 2);
        assert!(path.is_file());
    }
}
