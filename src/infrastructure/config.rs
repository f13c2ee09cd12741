// Site configuration: optional config file, environment overrides, defaults
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub influx: InfluxSettings,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub address: String,
    pub debug: bool,
    pub gzip: bool,
    /// Shown to users when an internal error replaces the detail.
    pub contact: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:65432".to_string(),
            debug: false,
            gzip: false,
            contact: "webmaster@example.org".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InfluxSettings {
    pub address: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Database holding the system/probe/net measurements.
    pub database: String,
    /// Database holding the bpm measurement.
    pub body_database: String,
    /// Host tag of the heart rate series. Must be configured.
    pub bpm_host: String,
}

impl Default for InfluxSettings {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8086".to_string(),
            username: None,
            password: None,
            database: "telegraf".to_string(),
            body_database: "body".to_string(),
            bpm_host: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    pub name: String,
    /// Host tag the node reports its metrics under.
    pub host: String,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    /// Interface to compute upstream utilization for, if any.
    #[serde(default)]
    pub upstream_interface: Option<String>,
    /// Bytes per second of the configured uplink.
    #[serde(default = "default_upstream_max_rate")]
    pub upstream_max_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
    /// The `server` tag of the corresponding http_response series.
    pub server: String,
}

fn default_upstream_max_rate() -> f64 {
    50_000_000.0
}

pub fn load_site_config() -> anyhow::Result<SiteConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/site").required(false))
        .add_source(config::Environment::with_prefix("HOMELAB").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

impl SiteConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.influx.bpm_host.is_empty() {
            anyhow::bail!("influx.bpm_host cannot be empty");
        }
        if self.influx.address.is_empty() {
            anyhow::bail!("influx.address cannot be empty");
        }
        if reqwest::Url::parse(&self.influx.address).is_err() {
            anyhow::bail!("influx.address must be a valid URI");
        }
        Ok(())
    }
}
