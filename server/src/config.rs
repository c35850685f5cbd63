//! Server configuration.

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Lower bound of the stub gateway's delay window, in milliseconds.
    pub stub_min_delay_ms: u64,
    /// Upper bound of the stub gateway's delay window, in milliseconds.
    pub stub_max_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 3000,
            stub_min_delay_ms: 200,
            stub_max_delay_ms: 400,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CAMBIO_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = std::env::var("CAMBIO_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.stub_min_delay_ms > self.stub_max_delay_ms {
            return Err("Stub delay window is inverted".to_string());
        }

        Ok(())
    }
}
