//! CLI command for inspecting configuration
//!
//! Loads the settings file the same way a run would and prints what it
//! resolved to, without touching the network.

use std::path::Path;

use crate::config::{ExportPaths, Settings};
use crate::models::BillingPeriod;

/// Format the resolved settings for terminal display
pub fn format_settings(settings: &Settings, config_path: &Path, period: BillingPeriod) -> String {
    let paths = ExportPaths::new(settings, period);
    let mut output = String::new();

    output.push_str("cost-splitter Configuration\n");
    output.push_str("===========================\n");
    output.push_str(&format!("Config file:       {}\n", config_path.display()));
    output.push_str(&format!("Bucket:            {}\n", settings.bucket_name));
    output.push_str(&format!("Linked account:    {}\n", settings.linked_account_id));
    output.push_str(&format!("Save folder:       {}\n", paths.save_folder().display()));
    output.push_str(&format!("Archive ({}): {}\n", period, paths.archive_name()));
    output.push_str(&format!("Debug:             {}\n", settings.debug));
    output.push('\n');

    output.push_str("Searchable columns:\n");
    for column in &settings.searchable_columns {
        output.push_str(&format!("  - {}\n", column));
    }
    output.push('\n');

    output.push_str("Rules (first match wins):\n");
    for (position, rule) in settings.rules.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {}: {}\n",
            position + 1,
            rule.bucket,
            rule.substrings.join(", ")
        ));
    }

    output
}

/// Handle the `config` command
pub fn handle_config_command(settings: &Settings, config_path: &Path) {
    print!(
        "{}",
        format_settings(settings, config_path, BillingPeriod::last_month())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationRule, RuleSet};
    use std::path::PathBuf;

    #[test]
    fn test_format_settings() {
        let settings = Settings {
            bucket_name: "billing-exports".into(),
            file_pattern: "acct-aws-billing".into(),
            save_folder: PathBuf::from("/tmp/billing"),
            linked_account_id: "111".into(),
            searchable_columns: vec!["user:Project".into(), "ProductName".into()],
            rules: RuleSet::new(vec![
                ClassificationRule::new("Website", ["www"]),
                ClassificationRule::new("Data", ["emr", "redshift"]),
            ]),
            debug: false,
        };

        let text = format_settings(
            &settings,
            Path::new("config.yml"),
            BillingPeriod::monthly(2025, 1),
        );

        assert!(text.contains("Archive (2025-01): acct-aws-billing-2025-01.csv.zip\n"));
        assert!(text.contains("  - user:Project\n  - ProductName\n"));
        assert!(text.contains("  1. Website: www\n  2. Data: emr, redshift\n"));
    }
}
