//! Demo data for trying the `check` command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

pub const SAMPLE_CSV: &str = "users.csv";
pub const SAMPLE_MODEL: &str = "users.toml";

const SAMPLE_ROWS: &[[&str; 3]] = &[
    ["Username", "Email", "Age"],
    ["alice", "alice@example.com", "30"],
    ["bob", "bob_at_example.com", "25"],
    ["c", "short@example.com", "17"],
    ["dave", "dave@example.com", "notanumber"],
    ["eva,smith", "eva.smith@example.com", "22"],
    ["frank", " ", "40"],
];

const SAMPLE_MODEL_TOML: &str = r#"# Model for users.csv
[[field]]
name = "Username"
column = "Username"
type = "string"
rules = [
    { kind = "required" },
    { kind = "string_length", min = 3, max = 50 },
]

[[field]]
name = "Email"
column = "Email"
type = "string"
rules = [
    { kind = "required" },
    { kind = "string_length", min = 5, max = 100 },
]

[[field]]
name = "Age"
column = "Age"
type = "int"
optional = true
rules = [
    { kind = "required" },
    { kind = "range", min = 0.0, max = 150.0 },
]
"#;

/// Paths of the files written by [`write_sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFiles {
    pub csv: PathBuf,
    pub model: PathBuf,
}

/// Writes the demo CSV and its model declaration into `dir`.
///
/// Existing files are only replaced when `force` is set.
pub fn write_sample(dir: &Path, force: bool) -> Result<SampleFiles> {
    let files = SampleFiles {
        csv: dir.join(SAMPLE_CSV),
        model: dir.join(SAMPLE_MODEL),
    };
    if !force {
        for path in [&files.csv, &files.model] {
            if path.exists() {
                bail!("{} already exists (use --force to replace it)", path.display());
            }
        }
    }

    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut writer = csv::Writer::from_path(&files.csv)
        .with_context(|| format!("create {}", files.csv.display()))?;
    for row in SAMPLE_ROWS {
        writer
            .write_record(row)
            .with_context(|| format!("write {}", files.csv.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", files.csv.display()))?;

    fs::write(&files.model, SAMPLE_MODEL_TOML)
        .with_context(|| format!("write {}", files.model.display()))?;

    tracing::info!(
        csv = %files.csv.display(),
        model = %files.model.display(),
        "wrote sample files"
    );
    Ok(files)
}
