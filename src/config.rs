use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("data/timings.json"),
        }
    }
}

impl Config {
    /// Read `PRAYER_BIND_ADDR` / `PRAYER_DATA_PATH`, keeping defaults for
    /// anything unset or unparseable.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: try_load("PRAYER_BIND_ADDR", env::var("PRAYER_BIND_ADDR").ok())
                .unwrap_or(defaults.bind_addr),
            data_path: try_load("PRAYER_DATA_PATH", env::var("PRAYER_DATA_PATH").ok())
                .unwrap_or(defaults.data_path),
        }
    }
}

fn try_load<T: FromStr>(key: &str, raw: Option<String>) -> Option<T>
where
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default");
        return None;
    };

    raw.parse()
        .map_err(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default");
        })
        .ok()
}
