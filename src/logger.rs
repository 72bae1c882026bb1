//! Console logging with consistent formatting
//!
//! Every line is prefixed with a scope (a repository identity, `runner`,
//! `retry`, ...) in cyan/bold so interleaved output stays readable.

use colored::*;

#[derive(Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn info(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg);
    }

    pub fn success(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg.green());
    }

    pub fn warn(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, scope: &str, msg: &str) {
        eprintln!("{} | {}", scope.cyan().bold(), msg.red());
    }
}
