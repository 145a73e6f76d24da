use super::*;
use crate::clumps::Clump;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.grouping.flat_clumps, vec![Clump::Passed]);
    assert!(config.output.show_passed);
    assert!(!config.output.no_color);
    assert_eq!(config.output.format, None);
}

#[test]
fn test_default_config_text_parses() {
    let config: ProjectConfig = toml::from_str(DEFAULT_CONFIG).expect("parse default config");
    assert_eq!(config.grouping.flat_clumps, vec![Clump::Passed]);
    assert_eq!(config.output.format.as_deref(), Some("text"));
}

#[test]
fn test_parse_grouping_policy() {
    let config: ProjectConfig = toml::from_str(
        r#"
[grouping]
flat_clumps = ["passed", "notApplicable", "manual"]

[output]
no_color = true
"#,
    )
    .expect("parse");
    assert_eq!(
        config.grouping.flat_clumps,
        vec![Clump::Passed, Clump::NotApplicable, Clump::Manual]
    );
    assert!(!config.grouping.is_grouped(Clump::Manual));
    assert!(config.grouping.is_grouped(Clump::Failed));
    assert!(config.output.no_color);
    assert!(config.output.show_passed);
}

#[test]
fn test_missing_sections_use_defaults() {
    let config: ProjectConfig = toml::from_str("[output]\nformat = \"json\"\n").expect("parse");
    assert_eq!(config.grouping, GroupingPolicy::default());
    assert_eq!(config.output.format.as_deref(), Some("json"));
}

#[test]
fn test_load_project_config_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[grouping]\nflat_clumps = []\n",
    )
    .expect("write config");

    let config = load_project_config(dir.path());
    assert!(config.grouping.flat_clumps.is_empty());
    assert!(config.grouping.is_grouped(Clump::Passed));
}

#[test]
fn test_load_project_config_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(".lhr-reportrc.json"),
        r#"{"output": {"show_passed": false}}"#,
    )
    .expect("write config");

    let config = load_project_config(dir.path());
    assert!(!config.output.show_passed);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[grouping]\nflat_clumps = [\"bogus\"]\n",
    )
    .expect("write config");

    let config = load_project_config(dir.path());
    assert_eq!(config.grouping, GroupingPolicy::default());
}

#[test]
fn test_no_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_project_config(dir.path());
    assert_eq!(config.grouping, GroupingPolicy::default());
}
