use classplan::config::Config;
use classplan::core::types::OverlapPolicy;
use classplan::errors::Error;

use crate::common::{build_context, make_temp_dir, read_log_contents, write_valid_config};
use std::fs;

#[test]
fn context_requires_config_file() {
    let dir = make_temp_dir("config");
    let err = classplan::core::context::PlannerContext::new_with_paths(
        &dir.join("config.json"),
        dir.join("state.json"),
        &dir.join("logs"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn config_edit_persists_overlap_policy() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    ctx.config.set("overlap_policy", "first-wins").unwrap();
    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.overlap_policy(), OverlapPolicy::FirstWins);
}

#[test]
fn disabled_file_logging_writes_no_log() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let raw = fs::read_to_string(dir.join("config.json"))
        .unwrap()
        .replace("\"True\"", "\"False\"");
    fs::write(dir.join("config.json"), raw).unwrap();

    let mut ctx = build_context(&dir);
    ctx.add_task("quiet", Default::default());
    assert!(!ctx.logger.file_logging_enabled());
    assert!(read_log_contents(&dir).is_none());
}
