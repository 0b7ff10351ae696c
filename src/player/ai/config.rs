use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub search: SearchConfig,
    pub selfplay: SelfPlayDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// ミニマックスの探索深さ上限の初期値 (1..=9)
    pub default_depth_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayDefaults {
    pub num_games: usize,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = "ai_config.json";
        let config_str = std::fs::read_to_string(config_path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            search: SearchConfig {
                default_depth_limit: super::minimax::MAX_DEPTH,
            },
            selfplay: SelfPlayDefaults { num_games: 100 },
        }
    }
}
