use std::time::Duration;

use serde::Deserialize;

use crate::domain::Metric;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the RAG backend (e.g., http://localhost:5000)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin serving `/web/html/*` fragments; defaults to `base_url`
    #[serde(default)]
    pub fragment_base_url: Option<String>,
    /// Request timeout; unset means requests wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Refresh periods of the polling widgets
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_metrics_interval")]
    pub metrics_interval_secs: u64,
    #[serde(default = "default_logs_interval")]
    pub logs_interval_secs: u64,
}

/// Usage percentages at which a gauge is flagged
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_cpu_threshold")]
    pub cpu_threshold: f64,
    #[serde(default = "default_memory_threshold")]
    pub memory_threshold: f64,
    #[serde(default = "default_disk_threshold")]
    pub disk_threshold: f64,
    #[serde(default = "default_gpu_threshold")]
    pub gpu_threshold: f64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_metrics_interval() -> u64 {
    3
}

fn default_logs_interval() -> u64 {
    60
}

fn default_cpu_threshold() -> f64 {
    80.0
}

fn default_memory_threshold() -> f64 {
    80.0
}

fn default_disk_threshold() -> f64 {
    90.0
}

fn default_gpu_threshold() -> f64 {
    90.0
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fragment_base_url: None,
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            metrics_interval_secs: default_metrics_interval(),
            logs_interval_secs: default_logs_interval(),
        }
    }
}

impl PollingConfig {
    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs(self.metrics_interval_secs.max(1))
    }

    pub fn logs_interval(&self) -> Duration {
        Duration::from_secs(self.logs_interval_secs.max(1))
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: default_cpu_threshold(),
            memory_threshold: default_memory_threshold(),
            disk_threshold: default_disk_threshold(),
            gpu_threshold: default_gpu_threshold(),
        }
    }
}

impl MonitoringConfig {
    pub fn threshold(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cpu => self.cpu_threshold,
            Metric::Memory => self.memory_threshold,
            Metric::Disk => self.disk_threshold,
            Metric::Gpu => self.gpu_threshold,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.polling.metrics_interval(), Duration::from_secs(3));
        assert_eq!(config.polling.logs_interval(), Duration::from_secs(60));
        assert_eq!(config.monitoring.threshold(Metric::Disk), 90.0);
    }

    #[test]
    fn test_partial_source_fills_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("backend.base_url", "http://10.0.0.5:5000")
            .unwrap()
            .set_override("polling.logs_interval_secs", 30)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://10.0.0.5:5000");
        assert!(config.backend.timeout_secs.is_none());
        assert_eq!(config.polling.logs_interval_secs, 30);
        assert_eq!(config.polling.metrics_interval_secs, 3);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_zero_interval_clamped() {
        let polling = PollingConfig {
            metrics_interval_secs: 0,
            logs_interval_secs: 0,
        };
        assert_eq!(polling.metrics_interval(), Duration::from_secs(1));
    }
}
