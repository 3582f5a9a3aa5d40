use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::EnvFilter;

use crate::models::employee::Role;
use crate::services::ApprovalPolicy;
use crate::telemetry;
use crate::types::PositionId;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOG_FILTER: &str = "portal_core=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub approver_roles: Vec<Role>,
    pub approver_position_ids: Vec<PositionId>,
    pub page_size: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            approver_roles: vec![Role::Manager, Role::Admin],
            approver_position_ids: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Reads `.env` and the process environment, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let approver_roles = match lookup("PORTAL_APPROVER_ROLES") {
            Some(raw) => parse_list(&raw)
                .map(|s| s.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow!("Invalid PORTAL_APPROVER_ROLES value: {}", e))?,
            None => defaults.approver_roles,
        };

        let approver_position_ids = match lookup("PORTAL_APPROVER_POSITION_IDS") {
            Some(raw) => parse_list(&raw)
                .map(|s| s.parse::<PositionId>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid PORTAL_APPROVER_POSITION_IDS value: {}", raw))?,
            None => defaults.approver_position_ids,
        };

        let page_size = match lookup("PORTAL_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size >= 1)
                .ok_or_else(|| anyhow!("Invalid PORTAL_PAGE_SIZE value: {}", raw))?,
            None => defaults.page_size,
        };

        let log_filter = lookup("PORTAL_LOG_FILTER").unwrap_or(defaults.log_filter);

        Ok(Config {
            approver_roles,
            approver_position_ids,
            page_size,
            log_filter,
        })
    }

    pub fn approval_policy(&self) -> ApprovalPolicy {
        ApprovalPolicy::new(
            self.approver_roles.iter().copied(),
            self.approver_position_ids.iter().copied(),
        )
    }

    /// Filter built from `log_filter`, overridden by `rust_log` when that is
    /// set and parseable.
    pub fn env_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        telemetry::resolve_filter(rust_log, &self.log_filter)
    }

    /// Installs the global subscriber using `RUST_LOG` or `log_filter`.
    pub fn init_tracing(&self) -> bool {
        let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
        telemetry::init_tracing(self.env_filter(rust_log.as_deref()))
    }
}

fn parse_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
