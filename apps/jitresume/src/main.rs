mod config;
mod content;
mod errors;
mod profile;
mod render;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, OutputFormat};
use crate::content::spelling::{DictionarySpellChecker, NoopSpellChecker, SpellChecker};
use crate::content::ContentModel;
use crate::errors::ResumeError;
use crate::profile::{LinkedInSource, ProfileSource, ProfileStore};
use crate::render::{DocumentFormatter, Formatter, MarkupFormatter, TextFormatter};

fn main() -> Result<()> {
    // Load configuration first; a missing config file just means defaults.
    let config = Config::load()?;

    // Initialize structured logging (stderr, so text/html on stdout stays clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting jitresume v{}", env!("CARGO_PKG_VERSION"));

    let store = ProfileStore::new(&config.cache_file, LazySource::new(&config));
    let raw = store
        .load(&config.fields)
        .map_err(|e| log_fatal(e, "Failed to load profile"))?;

    let checker = build_spell_checker(&config)?;
    let model = ContentModel::new(
        &raw,
        config.limits,
        config.layout.page_width,
        checker,
    )
    .map_err(|e| log_fatal(e, "Failed to decode profile"))?;

    let counts = model.counts();
    info!(
        skills = counts.skills,
        experience = counts.experience,
        education = counts.education,
        certifications = counts.certifications,
        languages = counts.languages,
        "Content model built"
    );
    for diagnostic in model.diagnostics() {
        warn!(
            section = diagnostic.section,
            word = %diagnostic.misspelling.word,
            offset = diagnostic.misspelling.offset,
            "Spelling warning"
        );
    }

    match config.output_format {
        OutputFormat::Text => {
            let text = TextFormatter::new(&model, config.layout).content()?;
            emit(&text, config.output_file.as_deref())?;
        }
        OutputFormat::Html => {
            let html = MarkupFormatter::new(&model, config.layout).content()?;
            emit(&html, config.output_file.as_deref())?;
        }
        OutputFormat::Odt => {
            let output = config
                .output_file
                .clone()
                .context("output_file is required for odt output")?;
            DocumentFormatter::new(&model, config.layout, output)
                .content()
                .map_err(|e| log_fatal(e, "Failed to write résumé document"))?;
        }
    }

    Ok(())
}

/// Defers building the HTTP source (and requiring a token) until the cache misses.
struct LazySource<'c> {
    config: &'c Config,
}

impl<'c> LazySource<'c> {
    fn new(config: &'c Config) -> Self {
        Self { config }
    }
}

impl ProfileSource for LazySource<'_> {
    fn fetch(&self, fields: &str) -> Result<String, ResumeError> {
        let token = self.config.access_token.clone().unwrap_or_default();
        LinkedInSource::new(token)?.fetch(fields)
    }
}

fn build_spell_checker(config: &Config) -> Result<Box<dyn SpellChecker>> {
    match &config.dictionary {
        Some(path) => {
            let checker = DictionarySpellChecker::from_file(path)
                .with_context(|| format!("Failed to read dictionary '{}'", path.display()))?;
            info!(words = checker.len(), "Spell checking enabled");
            Ok(Box::new(checker))
        }
        None => Ok(Box::new(NoopSpellChecker)),
    }
}

/// Writes a string artifact to the configured file, or stdout when there is none.
fn emit(artifact: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            profile::write_atomically(path, artifact.as_bytes())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(path = %path.display(), "Résumé written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(artifact.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn log_fatal(err: ResumeError, context: &str) -> anyhow::Error {
    tracing::error!(code = err.code(), "{context}: {err}");
    anyhow::Error::new(err).context(context.to_string())
}
