//! Check command implementation - validates a sink config

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use rotalog_core::TimeWindow;

use crate::cli::CheckArgs;
use crate::output::{is_json_mode, print_field, print_success, print_success_json};

/// Files and limits derived from a config
#[derive(Debug, Serialize)]
pub struct SinkReport {
    pub config: PathBuf,
    pub size_file: PathBuf,
    pub size_limit_mb: u64,
    pub max_backups: usize,
    pub compress: bool,
    pub time_files: String,
    pub link: PathBuf,
    pub rotation_hours: u64,
    pub rotate_every: &'static str,
    pub max_age_days: u64,
}

impl SinkReport {
    pub fn new(config_path: PathBuf, cfg: &rotalog::Config) -> Self {
        Self {
            config: config_path,
            size_file: cfg.size_path(),
            size_limit_mb: cfg.max_size_mb(),
            max_backups: cfg.max_backups,
            compress: cfg.compress,
            time_files: cfg.time_files(),
            link: cfg.filename.clone(),
            rotation_hours: cfg.rotation_time,
            rotate_every: match cfg.time_window() {
                TimeWindow::Hourly => "hour",
                TimeWindow::Daily => "day",
            },
            max_age_days: cfg.max_age,
        }
    }
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let path = super::resolve_config_path(args.config)?;
    let cfg = super::load_config(&path)?;
    let report = SinkReport::new(path, &cfg);

    if is_json_mode() {
        print_success_json("Config is valid", Some(&report));
        return Ok(());
    }

    print_success(&format!("{} is valid", report.config.display()));
    print_field("size file", report.size_file.display());
    print_field("rotate at", format!("{} MB", report.size_limit_mb));
    let backups = if report.max_backups == 0 {
        "all".to_string()
    } else {
        report.max_backups.to_string()
    };
    print_field("backups", backups);
    print_field("compress", report.compress);
    print_field("time files", &report.time_files);
    print_field("link", report.link.display());
    print_field("rotate every", report.rotate_every);
    if report.max_age_days == 0 {
        print_field("keep", "forever");
    } else {
        print_field("keep", format!("{} days", report.max_age_days));
    }
    Ok(())
}
