use hupoker_ai::available_ais;
use hupoker_engine::game::GameConfig;
use hupoker_engine::rules::BettingLimit;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub big_blind: u32,
    pub limit: BettingLimit,
    pub max_hands: u32,
    pub opponent: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub big_blind: ValueSource,
    pub limit: ValueSource,
    pub max_hands: ValueSource,
    pub opponent: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            big_blind: ValueSource::Default,
            limit: ValueSource::Default,
            max_hands: ValueSource::Default,
            opponent: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 100,
            big_blind: 10,
            limit: BettingLimit::FixedLimit,
            max_hands: 100,
            opponent: "fish".into(),
            seed: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Defaults, then the TOML file named by `HUPOKER_CONFIG`, then the
/// `HUPOKER_*` variables. `env` looks a variable up by name.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = var("HUPOKER_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.limit {
            cfg.limit = v;
            sources.limit = ValueSource::File;
        }
        if let Some(v) = f.max_hands {
            cfg.max_hands = v;
            sources.max_hands = ValueSource::File;
        }
        if let Some(v) = f.opponent {
            cfg.opponent = v;
            sources.opponent = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(seed) = var("HUPOKER_SEED") {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(bb) = var("HUPOKER_BIG_BLIND") {
        cfg.big_blind = bb
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid big blind".into()))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(stack) = var("HUPOKER_STACK") {
        cfg.starting_stack = stack
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(limit) = var("HUPOKER_LIMIT") {
        cfg.limit =
            parse_limit(&limit).ok_or_else(|| ConfigError::Invalid("Invalid limit".into()))?;
        sources.limit = ValueSource::Env;
    }
    if let Some(opponent) = var("HUPOKER_OPPONENT") {
        cfg.opponent = opponent.trim().to_string();
        sources.opponent = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Table flags given on the command line; each one beats the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOverrides {
    pub seed: Option<u64>,
    pub big_blind: Option<u32>,
    pub stack: Option<u32>,
    pub no_limit: bool,
}

/// Fully resolved table settings for one command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSetup {
    pub seed: u64,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub limit: BettingLimit,
}

impl TableOverrides {
    /// Applies the flags on top of `cfg`. A missing seed is drawn at random
    /// so that it can still be reported.
    pub fn resolve(&self, cfg: &Config) -> Result<TableSetup, ConfigError> {
        let setup = TableSetup {
            seed: self.seed.or(cfg.seed).unwrap_or_else(rand::random),
            big_blind: self.big_blind.unwrap_or(cfg.big_blind),
            starting_stack: self.stack.unwrap_or(cfg.starting_stack),
            limit: if self.no_limit {
                BettingLimit::NoLimit
            } else {
                cfg.limit
            },
        };
        if setup.big_blind < 2 {
            return Err(ConfigError::Invalid("big blind must be >=2".into()));
        }
        if setup.starting_stack == 0 {
            return Err(ConfigError::Invalid("stack must be >0".into()));
        }
        Ok(setup)
    }
}

impl TableSetup {
    pub fn game_config(&self, max_hands: u32) -> GameConfig {
        GameConfig {
            max_hands,
            big_blind: self.big_blind,
            limit: self.limit,
            seed: Some(self.seed),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    limit: Option<BettingLimit>,
    #[serde(default)]
    max_hands: Option<u32>,
    #[serde(default)]
    opponent: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.big_blind < 2 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >=2".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.max_hands == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_hands must be >=1".into(),
        ));
    }
    let opponent = cfg.opponent.to_ascii_lowercase();
    if !available_ais().contains(&opponent.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown opponent '{}'",
            cfg.opponent
        )));
    }
    Ok(())
}

pub fn parse_limit(s: &str) -> Option<BettingLimit> {
    match s.trim().to_ascii_lowercase().as_str() {
        "fixed" | "fixed-limit" | "limit" => Some(BettingLimit::FixedLimit),
        "no-limit" | "nolimit" | "nl" => Some(BettingLimit::NoLimit),
        _ => None,
    }
}
