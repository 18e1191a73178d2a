use anyhow::Context;
use checkers_p2p::rules::Rules;
use serde::{Deserialize, Serialize};

use crate::network;


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub port: u16,
    pub rules: Rules,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            port: network::DEFAULT_PORT,
            rules: Rules::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn read_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{path}'."))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file '{path}'."))
    }

    fn parse(contents: &str) -> Result<Self, serde_yaml::Error> { serde_yaml::from_str(contents) }
}
