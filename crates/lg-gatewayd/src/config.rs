//! Daemon configuration, read once from `LABELGATE_*` environment variables.
use std::{fmt, net::SocketAddr, str::FromStr};

use thiserror::Error;

use lg_core::DispatchConfig;
use lg_exec::ecs::EcsConfig;
use lg_model::{Flag, RemoteHost, TimeoutMs};
use lg_observe::{LogFilter, LogFormat, LoggerConfig};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001/predict";
pub const DEFAULT_BACKEND_TIMEOUT_MS: TimeoutMs = 300_000;
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost,http://131.255.22.222,http://localhost:8000,https://go.imside.ai";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How `POST /infer/{model}` is served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InferMode {
    /// Acknowledge and launch a worker job.
    #[default]
    Dispatch,
    /// Forward to a synchronous inference backend.
    Proxy,
}

impl FromStr for InferMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dispatch" => Ok(Self::Dispatch),
            "proxy" => Ok(Self::Proxy),
            _ => Err("expected dispatch|proxy".into()),
        }
    }
}

impl fmt::Display for InferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InferMode::Dispatch => "dispatch",
            InferMode::Proxy => "proxy",
        })
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: SocketAddr,
    pub mode: InferMode,
    pub remote: RemoteHost,
    pub ecs: EcsConfig,
    pub dispatch: DispatchConfig,
    pub backend_url: String,
    pub backend_timeout_ms: TimeoutMs,
    pub cors_origins: Vec<String>,
    pub logger: LoggerConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let remote_defaults = RemoteHost::default();
        let ecs_defaults = EcsConfig::default();
        let dispatch_defaults = DispatchConfig::default();
        let logger_defaults = LoggerConfig::default();

        let ecs = EcsConfig {
            program: var("LABELGATE_AWS_CLI").unwrap_or(ecs_defaults.program),
            region: var("LABELGATE_ECS_REGION").unwrap_or(ecs_defaults.region),
            cluster: var("LABELGATE_ECS_CLUSTER").unwrap_or(ecs_defaults.cluster),
            launch_type: ecs_defaults.launch_type,
            task_definition: var("LABELGATE_ECS_TASK_DEFINITION")
                .unwrap_or(ecs_defaults.task_definition),
            container_name: var("LABELGATE_ECS_CONTAINER"),
            subnet_id: var("LABELGATE_ECS_SUBNET_ID").unwrap_or(ecs_defaults.subnet_id),
            assign_public_ip: parse(
                "LABELGATE_ECS_ASSIGN_PUBLIC_IP",
                var("LABELGATE_ECS_ASSIGN_PUBLIC_IP"),
                ecs_defaults.assign_public_ip,
            )?,
            payload_var: var("LABELGATE_ECS_PAYLOAD_VAR").unwrap_or(ecs_defaults.payload_var),
        };
        ecs.validate().map_err(|e| ConfigError::Invalid {
            var: "LABELGATE_ECS_*",
            value: String::new(),
            reason: e.to_string(),
        })?;

        let use_color: Flag = parse(
            "LABELGATE_LOG_COLOR",
            var("LABELGATE_LOG_COLOR"),
            Flag::enabled(),
        )?;
        let logger = LoggerConfig {
            format: parse::<LogFormat>(
                "LABELGATE_LOG_FORMAT",
                var("LABELGATE_LOG_FORMAT"),
                logger_defaults.format,
            )?,
            filter: parse::<LogFilter>("LABELGATE_LOG", var("LABELGATE_LOG"), logger_defaults.filter)?,
            with_targets: logger_defaults.with_targets,
            use_color: use_color.is_enabled(),
        };

        Ok(Self {
            bind: parse(
                "LABELGATE_BIND",
                var("LABELGATE_BIND"),
                SocketAddr::from(([0, 0, 0, 0], 8000)),
            )?,
            mode: parse("LABELGATE_INFER_MODE", var("LABELGATE_INFER_MODE"), InferMode::default())?,
            remote: RemoteHost {
                url: var("LABELGATE_REMOTE_HOST").unwrap_or(remote_defaults.url),
                principal: var("LABELGATE_REMOTE_USER").unwrap_or(remote_defaults.principal),
            },
            ecs,
            dispatch: DispatchConfig {
                ack_timeout_ms: parse(
                    "LABELGATE_ACK_TIMEOUT_MS",
                    var("LABELGATE_ACK_TIMEOUT_MS"),
                    dispatch_defaults.ack_timeout_ms,
                )?,
                ..dispatch_defaults
            },
            backend_url: var("LABELGATE_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            backend_timeout_ms: parse(
                "LABELGATE_BACKEND_TIMEOUT_MS",
                var("LABELGATE_BACKEND_TIMEOUT_MS"),
                DEFAULT_BACKEND_TIMEOUT_MS,
            )?,
            cors_origins: split_list(
                &var("LABELGATE_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            logger,
        })
    }
}

fn parse<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
