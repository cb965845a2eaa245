//! Commit-time validation of candidate configurations.
//!
//! # Responsibilities
//! - Semantic checks on the candidate document (names, references, ports)
//! - Handing the candidate file to the proxy binary's check mode
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validators are chained; the first failing validator aborts the commit

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::{Configuration, RuleCondition};
use crate::store::error::{StoreError, StoreResult};

/// A check run against every candidate before it is published.
pub trait Validator: Send + Sync {
    /// `candidate` is the on-disk copy of `config` that would replace the live file.
    fn validate(&self, candidate: &Path, config: &Configuration) -> StoreResult<()>;
}

/// Referential and range checks on the configuration model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticValidator;

impl Validator for SemanticValidator {
    fn validate(&self, _candidate: &Path, config: &Configuration) -> StoreResult<()> {
        let errors = semantic_errors(config);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

fn semantic_errors(config: &Configuration) -> Vec<String> {
    let mut errors = Vec::new();

    let mut backend_names = HashSet::new();
    for section in &config.backends {
        let name = &section.backend.name;
        if name.is_empty() {
            errors.push("backend with empty name".to_string());
        }
        if !backend_names.insert(name.as_str()) {
            errors.push(format!("duplicate backend {}", name));
        }

        let mut server_names = HashSet::new();
        for server in &section.servers {
            if !server_names.insert(server.name.as_str()) {
                errors.push(format!("duplicate server {} in backend {}", server.name, name));
            }
            if server.address.is_empty() {
                errors.push(format!("server {}/{} has no address", name, server.name));
            }
            if server.port == 0 {
                errors.push(format!("server {}/{} has port 0", name, server.name));
            }
        }
        for rule in &section.http_request_rules {
            check_condition(&mut errors, rule.cond, rule.cond_test.as_deref(), name);
        }
    }

    let mut frontend_names = HashSet::new();
    for section in &config.frontends {
        let name = &section.frontend.name;
        if name.is_empty() {
            errors.push("frontend with empty name".to_string());
        }
        if !frontend_names.insert(name.as_str()) {
            errors.push(format!("duplicate frontend {}", name));
        }
        if let Some(default) = &section.frontend.default_backend {
            if !backend_names.contains(default.as_str()) {
                errors.push(format!(
                    "frontend {} default_backend {} does not exist",
                    name, default
                ));
            }
        }

        let mut bind_names = HashSet::new();
        for bind in &section.binds {
            if !bind_names.insert(bind.name.as_str()) {
                errors.push(format!("duplicate bind {} in frontend {}", bind.name, name));
            }
            if bind.address.is_empty() {
                errors.push(format!("bind {}/{} has no address", name, bind.name));
            }
            if bind.port == Some(0) {
                errors.push(format!("bind {}/{} has port 0", name, bind.name));
            }
        }

        for rule in &section.switching_rules {
            if !backend_names.contains(rule.name.as_str()) {
                errors.push(format!(
                    "frontend {} switches to unknown backend {}",
                    name, rule.name
                ));
            }
            check_condition(&mut errors, rule.cond, rule.cond_test.as_deref(), name);
        }
        for rule in &section.http_request_rules {
            check_condition(&mut errors, rule.cond, rule.cond_test.as_deref(), name);
        }
        for rule in &section.http_response_rules {
            check_condition(&mut errors, rule.cond, rule.cond_test.as_deref(), name);
        }
        for rule in &section.tcp_request_rules {
            check_condition(&mut errors, rule.cond, rule.cond_test.as_deref(), name);
        }
    }

    errors
}

fn check_condition(
    errors: &mut Vec<String>,
    cond: Option<RuleCondition>,
    test: Option<&str>,
    owner: &str,
) {
    if cond.is_some() && test.map_or(true, str::is_empty) {
        errors.push(format!("rule in {} has a condition without a test", owner));
    }
}

/// Runs the proxy binary in check mode (`-c -f <candidate>`).
///
/// The candidate is the store's TOML document, not the proxy's native
/// configuration syntax. A stock proxy binary rejects it, so `program` must
/// be a checker that understands this document (or a wrapper that renders it
/// to native syntax before calling the proxy). Zero exit status accepts.
#[derive(Debug, Clone)]
pub struct ProgramValidator {
    program: PathBuf,
}

impl ProgramValidator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Validator for ProgramValidator {
    fn validate(&self, candidate: &Path, _config: &Configuration) -> StoreResult<()> {
        let output = Command::new(&self.program)
            .arg("-c")
            .arg("-f")
            .arg(candidate)
            .output()
            .map_err(|source| StoreError::Io {
                path: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut messages: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .chain(String::from_utf8_lossy(&output.stdout).lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if messages.is_empty() {
            messages.push(format!("{} exited with {}", self.program.display(), output.status));
        }
        tracing::warn!(
            program = %self.program.display(),
            candidate = %candidate.display(),
            status = %output.status,
            "Configuration check rejected candidate"
        );
        Err(StoreError::Validation(messages))
    }
}
