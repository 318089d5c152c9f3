//! Run settings for cost-splitter
//!
//! Settings are read from a YAML file. Every key except `debug` is required;
//! a file that misses any of them is rejected as a whole, listing every
//! missing key so the user can fix the file in one pass.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CostSplitError, CostSplitResult};
use crate::models::{ClassificationRule, RuleSet, RESERVED_BUCKETS};

/// Settings file as written by the user, before validation
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    bucket_name: Option<String>,
    file_pattern: Option<String>,
    save_folder: Option<PathBuf>,
    linked_account_id: Option<serde_yaml::Value>,
    searchable_column: Option<Vec<String>>,
    reports: Option<Vec<BTreeMap<String, Vec<String>>>>,
    #[serde(default)]
    debug: bool,
}

/// Validated settings for one run
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Remote bucket holding the monthly archives
    pub bucket_name: String,

    /// File name prefix of the export, e.g. "123456789012-aws-billing-detailed-line-items"
    pub file_pattern: String,

    /// Local working folder for the archive and the extracted export
    pub save_folder: PathBuf,

    /// Linked account whose rows are reported
    pub linked_account_id: String,

    /// Export columns searched for rule substrings
    pub searchable_columns: Vec<String>,

    /// Classification rules in priority order
    pub rules: RuleSet,

    /// Route zero-cost rows to "Free" and print unmatched rows
    pub debug: bool,
}

impl Settings {
    /// Load and validate settings from a YAML file
    pub fn load(path: &Path) -> CostSplitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CostSplitError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml_str(contents: &str) -> CostSplitResult<Self> {
        let raw: RawSettings = serde_yaml::from_str(contents).map_err(|e| {
            CostSplitError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        Self::validate(raw)
    }

    fn validate(raw: RawSettings) -> CostSplitResult<Self> {
        let mut missing = Vec::new();
        if raw.bucket_name.as_deref().map_or(true, str::is_empty) {
            missing.push("bucket_name");
        }
        if raw.file_pattern.as_deref().map_or(true, str::is_empty) {
            missing.push("file_pattern");
        }
        if raw.save_folder.is_none() {
            missing.push("save_folder");
        }
        let linked_account_id = raw.linked_account_id.as_ref().and_then(scalar_to_string);
        if linked_account_id.is_none() {
            missing.push("linked_account_id");
        }
        if raw.searchable_column.as_ref().map_or(true, Vec::is_empty) {
            missing.push("searchable_column");
        }
        if raw.reports.as_ref().map_or(true, Vec::is_empty) {
            missing.push("reports");
        }

        if !missing.is_empty() {
            return Err(CostSplitError::Config(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }

        let rules = parse_rules(raw.reports.unwrap_or_default())?;

        Ok(Self {
            bucket_name: raw.bucket_name.unwrap_or_default(),
            file_pattern: raw.file_pattern.unwrap_or_default(),
            save_folder: raw.save_folder.unwrap_or_default(),
            linked_account_id: linked_account_id.unwrap_or_default(),
            searchable_columns: raw.searchable_column.unwrap_or_default(),
            rules,
            debug: raw.debug,
        })
    }
}

/// Account ids are often written unquoted, so accept numbers as well
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_rules(entries: Vec<BTreeMap<String, Vec<String>>>) -> CostSplitResult<RuleSet> {
    let mut seen = HashSet::new();
    let mut rules = Vec::with_capacity(entries.len());

    for (position, entry) in entries.into_iter().enumerate() {
        if entry.len() != 1 {
            return Err(CostSplitError::Config(format!(
                "reports entry {} must map exactly one bucket name to its substrings (found {} keys)",
                position + 1,
                entry.len()
            )));
        }

        let Some((bucket, substrings)) = entry.into_iter().next() else {
            continue;
        };

        if RESERVED_BUCKETS.contains(&bucket.as_str()) {
            return Err(CostSplitError::Config(format!(
                "'{}' is a reserved bucket name",
                bucket
            )));
        }
        if !seen.insert(bucket.clone()) {
            return Err(CostSplitError::Config(format!(
                "bucket '{}' is listed more than once in reports",
                bucket
            )));
        }
        if substrings.iter().any(String::is_empty) {
            return Err(CostSplitError::Config(format!(
                "bucket '{}' has an empty match substring",
                bucket
            )));
        }

        rules.push(ClassificationRule::new(bucket, substrings));
    }

    Ok(RuleSet::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL: &str = r#"
bucket_name: billing-exports
file_pattern: 123456789012-aws-billing-detailed-line-items
save_folder: /tmp/billing
linked_account_id: "210987654321"
searchable_column:
  - user:Project
  - ProductName
reports:
  - Website: ["www", "Frontend"]
  - Analytics: ["emr", "redshift"]
debug: true
"#;

    #[test]
    fn test_load_full_settings() {
        let settings = Settings::from_yaml_str(FULL).unwrap();
        assert_eq!(settings.bucket_name, "billing-exports");
        assert_eq!(settings.save_folder, PathBuf::from("/tmp/billing"));
        assert_eq!(settings.linked_account_id, "210987654321");
        assert_eq!(settings.searchable_columns, vec!["user:Project", "ProductName"]);
        assert!(settings.debug);

        let names: Vec<_> = settings.rules.bucket_names().collect();
        assert_eq!(names, vec!["Website", "Analytics"]);
        let website = settings.rules.iter().next().unwrap();
        assert_eq!(website.substrings, vec!["www", "frontend"]);
    }

    #[test]
    fn test_debug_defaults_to_false() {
        let yaml = FULL.replace("debug: true\n", "");
        let settings = Settings::from_yaml_str(&yaml).unwrap();
        assert!(!settings.debug);
    }

    #[test]
    fn test_numeric_account_id() {
        let yaml = FULL.replace("\"210987654321\"", "210987654321");
        let settings = Settings::from_yaml_str(&yaml).unwrap();
        assert_eq!(settings.linked_account_id, "210987654321");
    }

    #[test]
    fn test_missing_keys_are_all_reported() {
        let err = Settings::from_yaml_str("bucket_name: exports\ndebug: false\n").unwrap_err();
        assert!(err.is_config());
        let message = err.to_string();
        for key in [
            "file_pattern",
            "save_folder",
            "linked_account_id",
            "searchable_column",
            "reports",
        ] {
            assert!(message.contains(key), "{} not in '{}'", key, message);
        }
        assert!(!message.contains("bucket_name"));
    }

    #[test]
    fn test_multi_key_report_entry_rejected() {
        let yaml = FULL.replace(
            "  - Analytics: [\"emr\", \"redshift\"]",
            "  - Analytics: [\"emr\"]\n    Extra: [\"x\"]",
        );
        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("exactly one bucket name"));
    }

    #[test]
    fn test_reserved_bucket_rejected() {
        let yaml = FULL.replace("Website:", "Shared:");
        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_duplicate_bucket_rejected() {
        let yaml = FULL.replace("Analytics:", "Website:");
        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.rules.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Settings::load(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.is_config());
    }
}
