use std::{
    env, error,
    net::{IpAddr, Ipv4Addr},
};

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    threads: usize,
    max_body_size: usize,
}

fn var_map<T, E: error::Error>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    mut f: impl FnMut(&str) -> Result<T, E>,
    default: T,
) -> Result<T, String> {
    match lookup(key) {
        Some(value) => f(&value).map_err(|_| format!("Invalid {} {}", key, value)),
        None => Ok(default),
    }
}

impl Configuration {
    /// Reads `HOST`, `PORT`, `THREADS` and `MAX_BODY_SIZE` from the environment.
    pub fn new() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = var_map(&lookup, "HOST", |host| host.parse::<IpAddr>(), IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port = var_map(&lookup, "PORT", |port| port.parse::<u16>(), 8000)?;
        let threads = var_map(&lookup, "THREADS", |threads| threads.parse::<usize>(), 4)?;
        if threads == 0 {
            return Err("Invalid THREADS 0".to_string());
        }
        let max_body_size = var_map(&lookup, "MAX_BODY_SIZE", |size| size.parse::<usize>(), 1 << 20)?;
        Ok(Self {
            host,
            port,
            threads,
            max_body_size,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }
}
