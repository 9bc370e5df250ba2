//! Terminal output helpers

use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// `label: value` line with the label dimmed
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{}:", label).dimmed(), value);
}

#[derive(Serialize)]
struct ResponseJson<'a, T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

pub fn print_success_json<T: Serialize>(message: &str, data: Option<T>) {
    let response = ResponseJson {
        success: true,
        message: Some(message),
        data,
    };
    if let Ok(json) = serde_json::to_string_pretty(&response) {
        println!("{}", json);
    }
}

/// Report a failure on stderr, as JSON in JSON mode
pub fn print_error_json(message: &str) {
    if is_json_mode() {
        let response: ResponseJson<()> = ResponseJson {
            success: false,
            message: Some(message),
            data: None,
        };
        if let Ok(json) = serde_json::to_string_pretty(&response) {
            eprintln!("{}", json);
        }
    } else {
        print_error(message);
    }
}
