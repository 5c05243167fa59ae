use crate::budget::SolverConfig;
use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const BIND_ADDR_VAR: &str = "TIMETABLE_BIND_ADDR";
pub const MAX_NODES_VAR: &str = "TIMETABLE_MAX_NODES";
pub const TIME_LIMIT_VAR: &str = "TIMETABLE_TIME_LIMIT_MS";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub solver: SolverConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source. A limit of `0` disables it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                var: BIND_ADDR_VAR,
                source,
            })?;

        let max_nodes = match parse_u64(&lookup, MAX_NODES_VAR)? {
            Some(0) => None,
            Some(n) => Some(n),
            None => Some(SolverConfig::DEFAULT_MAX_NODES),
        };
        let time_limit = match parse_u64(&lookup, TIME_LIMIT_VAR)? {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => Some(SolverConfig::DEFAULT_TIME_LIMIT),
        };

        Ok(Self {
            bind_addr,
            solver: SolverConfig {
                max_nodes,
                time_limit,
            },
        })
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| raw.trim().parse())
        .transpose()
        .map_err(|source| ConfigError::Number { var, source })
}
