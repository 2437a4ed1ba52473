use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

/// Profile fields requested from the source when the config file names none.
pub const DEFAULT_FIELDS: &str = "first-name,last-name,industry,main-address,\
    email-address,member-url-resources,phone-numbers,headline,location,\
    num-recommenders,current-status,summary,skills,positions,educations,\
    certifications:(name,authority,start-date),interests,\
    languages:(language,proficiency)";

const CONFIG_FILE_NAME: &str = ".jitconfig";
const CACHE_FILE_NAME: &str = ".jitresume";
const DEFAULT_DOCUMENT_FILE: &str = "myresume.fodt";

/// Which formatter the driver hands the content model to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Odt,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "odt" | "fodt" | "odf" => Ok(OutputFormat::Odt),
            other => Err(anyhow!("unknown output_format '{other}' (expected text, html or odt)")),
        }
    }
}

/// Page geometry shared by every formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Fixed-width page width in characters; also the free-text wrap width.
    pub page_width: usize,
    /// Number of cells per skills grid row.
    pub skills_cols: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_width: 72,
            skills_cols: 5,
        }
    }
}

/// Caps applied by the content model to the truncated sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub skills_max: usize,
    pub experience_max: usize,
    pub certificates_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            skills_max: 1000,
            experience_max: 1000,
            certificates_max: 1000,
        }
    }
}

/// Run configuration, read once at startup from `~/.jitconfig` and passed by reference.
/// A missing config file is not an error: every key has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub layout: Layout,
    pub limits: Limits,
    /// Comma-separated field selector sent to the profile source.
    pub fields: String,
    pub access_token: Option<String>,
    pub cache_file: PathBuf,
    pub output_format: OutputFormat,
    /// Destination of the artifact. `None` means stdout for text and html.
    pub output_file: Option<PathBuf>,
    /// Word list for the spell checker; spell checking is off without one.
    pub dictionary: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env`, then the config file (`JIT_CONFIG` or `~/.jitconfig`),
    /// then fills the access token from `JIT_ACCESS_TOKEN` if the file has none.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let home = dirs::home_dir().context("Could not determine the home directory")?;
        let path = std::env::var("JIT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(CONFIG_FILE_NAME));

        let mut config = Config::from_file(&path, &home)?;

        if config.access_token.is_none() {
            config.access_token = std::env::var("JIT_ACCESS_TOKEN").ok();
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.rust_log = level;
        }

        Ok(config)
    }

    /// Reads `path` if it exists; a missing file yields the defaults.
    pub fn from_file(path: &Path, home: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Config::parse(&text, home)
                .with_context(|| format!("Invalid config file '{}'", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Config::parse("", home)
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read config file '{}'", path.display()))
            }
        }
    }

    /// Builds a config from key/value text. `home` anchors default paths and `~/` values.
    pub fn parse(text: &str, home: &Path) -> Result<Self> {
        let pairs = parse_pairs(text);

        let layout = Layout {
            page_width: positive(&pairs, "page_width", Layout::default().page_width)?,
            skills_cols: positive(&pairs, "skills_cols", Layout::default().skills_cols)?,
        };
        let defaults = Limits::default();
        let limits = Limits {
            skills_max: number(&pairs, "skills_max", defaults.skills_max)?,
            experience_max: number(&pairs, "experience_max", defaults.experience_max)?,
            certificates_max: number(&pairs, "certificates_max", defaults.certificates_max)?,
        };

        let output_format = match pairs.get("output_format") {
            Some(v) => v.parse()?,
            None => OutputFormat::Odt,
        };
        let output_file = match pairs.get("output_file") {
            Some(v) => Some(expand_home(v, home)),
            None if output_format == OutputFormat::Odt => Some(PathBuf::from(DEFAULT_DOCUMENT_FILE)),
            None => None,
        };

        Ok(Config {
            layout,
            limits,
            fields: pairs
                .get("fields")
                .cloned()
                .unwrap_or_else(|| DEFAULT_FIELDS.to_string()),
            access_token: pairs.get("access_token").cloned(),
            cache_file: pairs
                .get("cache_file")
                .map(|v| expand_home(v, home))
                .unwrap_or_else(|| home.join(CACHE_FILE_NAME)),
            output_format,
            output_file,
            dictionary: pairs.get("dictionary").map(|v| expand_home(v, home)),
            rust_log: pairs
                .get("rust_log")
                .cloned()
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Splits each meaningful line at its first whitespace run.
/// Blank lines and `#` comments are skipped; a key with no value is ignored.
fn parse_pairs(text: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once(char::is_whitespace) {
            Some((key, value)) => {
                pairs.insert(key.to_string(), value.trim_start().to_string());
            }
            None => warn!(key = line, "Config key has no value, ignoring"),
        }
    }
    pairs
}

fn number(pairs: &HashMap<String, String>, key: &str, default: usize) -> Result<usize> {
    match pairs.get(key) {
        Some(v) => v
            .parse::<usize>()
            .with_context(|| format!("'{key}' must be a non-negative integer, got '{v}'")),
        None => Ok(default),
    }
}

fn positive(pairs: &HashMap<String, String>, key: &str, default: usize) -> Result<usize> {
    let value = number(pairs, key, default)?;
    if value == 0 {
        bail!("'{key}' must be greater than zero");
    }
    Ok(value)
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(value),
    }
}
