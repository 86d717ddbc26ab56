//! Server command implementation

use std::path::Path;

use anyhow::Result;
use mindbody_server::{parse_list, parse_trusted_networks, ServerConfig};

use super::open_db;

/// Environment variable with comma-separated API keys
pub const API_KEYS_ENV: &str = "MINDBODY_API_KEYS";
/// Environment variable with comma-separated trusted networks
pub const TRUSTED_NETWORKS_ENV: &str = "MINDBODY_TRUSTED_NETWORKS";
/// Environment variable with comma-separated CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "MINDBODY_ALLOWED_ORIGINS";

/// Server configuration from the environment
pub fn server_config_from_env(no_auth: bool) -> ServerConfig {
    let env = |name: &str| std::env::var(name).unwrap_or_default();
    ServerConfig {
        require_auth: !no_auth,
        allowed_origins: parse_list(&env(ALLOWED_ORIGINS_ENV)),
        api_keys: parse_list(&env(API_KEYS_ENV)),
        trusted_networks: parse_trusted_networks(&env(TRUSTED_NETWORKS_ENV)),
    }
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting mindbody web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = server_config_from_env(no_auth);

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        if !config.api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured ({})",
                config.api_keys.len(),
                API_KEYS_ENV
            );
        }
        if !config.trusted_networks.is_empty() {
            println!(
                "   🏠 Trusted networks: {} ({})",
                config
                    .trusted_networks
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                TRUSTED_NETWORKS_ENV
            );
        }
    }
    if !config.allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", config.allowed_origins.join(", "));
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;
    mindbody_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
