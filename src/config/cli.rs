use crate::config::RelayConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "lead-relay")]
#[command(about = "Landing page contact form relay to the Telegram Bot API")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve POST /api/submit
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Send one lead through the contact form flow
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        /// Post to a relay endpoint instead of calling Telegram directly
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Format raw phone input the way the form does on every keystroke
    Format { raw: String },

    /// Check a phone number against the accepted +380XXXXXXXXX pattern
    Check { phone: String },
}

impl CliConfig {
    /// 載入設定檔 (若有)，再套用環境變數與命令列覆蓋
    pub fn load_relay_config(&self) -> Result<RelayConfig> {
        let mut config = match &self.config {
            Some(path) => RelayConfig::from_file(path)?,
            None => RelayConfig::from_env(),
        };

        if let Command::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}
