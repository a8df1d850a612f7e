use crate::error::LookupError;
use std::collections::HashSet;

pub const DNS_PORT: u16 = 53;
pub const MAX_QUERIES: u32 = 30;
pub const MAX_CONSECUTIVE_TIMEOUTS: u32 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    pub server_port: u16,
    pub max_queries: u32,
    pub max_consecutive_timeouts: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            server_port: DNS_PORT,
            max_queries: MAX_QUERIES,
            max_consecutive_timeouts: MAX_CONSECUTIVE_TIMEOUTS,
        }
    }
}

/// Counters shared by one top-level lookup and every sub-lookup it starts.
#[derive(Debug)]
pub struct ResolutionSession {
    original_fqdn: String,
    limits: Limits,
    queries_sent: u32,
    consecutive_timeouts: u32,
}

impl ResolutionSession {
    pub fn new(original_fqdn: &str, limits: Limits) -> Self {
        Self {
            original_fqdn: original_fqdn.to_string(),
            limits,
            queries_sent: 0,
            consecutive_timeouts: 0,
        }
    }

    pub fn original_fqdn(&self) -> &str {
        &self.original_fqdn
    }

    pub fn queries_sent(&self) -> u32 {
        self.queries_sent
    }

    /// Charges one query to the budget. Must succeed before anything is sent.
    pub fn begin_query(&mut self) -> Result<(), LookupError> {
        if self.queries_sent >= self.limits.max_queries {
            return Err(LookupError::QueryBudgetExceeded(self.limits.max_queries));
        }
        self.queries_sent += 1;

        Ok(())
    }

    pub fn record_timeout(&mut self) -> Result<(), LookupError> {
        self.consecutive_timeouts += 1;
        if self.consecutive_timeouts >= self.limits.max_consecutive_timeouts {
            return Err(LookupError::Timeout(self.consecutive_timeouts));
        }

        Ok(())
    }

    pub fn record_response(&mut self) {
        self.consecutive_timeouts = 0;
    }
}

/// Names known to be aliases of one lookup's target, and the smallest TTL
/// seen along that alias chain.
#[derive(Debug, Clone)]
pub struct ChainScope {
    names: HashSet<String>,
    min_ttl: u32,
}

impl ChainScope {
    pub fn new(name: &str) -> Self {
        let mut scope = Self {
            names: HashSet::new(),
            min_ttl: u32::MAX,
        };
        scope.insert(name);

        scope
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_ascii_lowercase())
    }

    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_ascii_lowercase());
    }

    pub fn fold_ttl(&mut self, ttl: u32) {
        self.min_ttl = self.min_ttl.min(ttl);
    }

    pub fn min_ttl(&self) -> u32 {
        self.min_ttl
    }
}
