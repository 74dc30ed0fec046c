use config::Config;
use serde::{Deserialize, Serialize};
///  struct GetDefault;
///  struct GetOption;
///  struct Has;
///
///  fn settings() -> &'static RwLock<Config>
///  fn settings_object() -> &'static RwLock<Settings>
///
///  struct Settings
use std::sync::{OnceLock, RwLock};

/// application short name used in error codes when nothing is configured
pub static DEFAULT_SHORT: &'static str = "CMRC";

/// indent width used by the JSON rendering when nothing is configured
pub static DEFAULT_INDENT: usize = 2;

//get or default
pub struct GetDefault;
pub struct GetOption;
pub struct Has;

/// get settings
/// it's not recommand to call settings() directly
/// use settings_object get Settings instance or use GetOption::xxx | GetDefault::xxx | Has::has
///
/// # Returns
/// * `&'static RwLock<Config>` - config instance
pub fn settings() -> &'static RwLock<Config> {
    static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(init_config()))
}

/// get settings instance
/// # Returns
/// * `&'static RwLock<Settings>` - settings instance
pub fn settings_object() -> &'static RwLock<Settings> {
    static SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();
    SETTINGS.get_or_init(|| {
        RwLock::new(|| -> Settings {
            if cfg!(test) {
                return Settings::default();
            }

            let loaded = match settings().read() {
                Ok(guard) => guard.clone().try_deserialize::<Settings>(),
                Err(e) => {
                    tracing::warn!("settings lock poisoned, using defaults: {}", e);
                    return Settings::default();
                },
            };

            loaded.unwrap_or_else(|e| {
                tracing::warn!("settings loading error, using defaults: {}", e);
                Settings::default()
            })
        }())
    })
}

/// indent width for rendered JSON
pub fn render_indent() -> usize {
    settings_object().read().map(|s| s.render.indent).unwrap_or(DEFAULT_INDENT)
}

/// init config
/// # Returns
/// * `Config` - config instance
fn init_config() -> Config {
    //development production testing
    let run_mode = std::env::var("COMMERCE_RUN_MODE").unwrap_or("development".to_string());

    tracing::info!("COMMERCE_RUN_MODE={}", run_mode);

    let config_path = std::env::var("COMMERCE_CONFIG_PATH").unwrap_or("config".to_string());

    tracing::info!("Config file path: {}", config_path);

    let conf = config::File::with_name(&format!("{config_path}/config.yml")).required(false);
    let mode = config::File::with_name(&format!("{config_path}/{run_mode}.yml")).required(false);
    let local = config::File::with_name(&format!("{config_path}/local.yml")).required(false);

    let mut builder = Config::builder().add_source(conf).add_source(mode).add_source(local);
    #[cfg(test)]
    {
        use crate::tools::tests::tools::project_dir;

        let tests_load = format!("{}/tests/using-test-config.yml", project_dir().to_string_lossy());
        tracing::info!("test mode, loading: {}", tests_load);

        builder = builder.add_source(config::File::with_name(tests_load.as_str()).required(false));
    }

    builder = builder.add_source(config::Environment::with_prefix("COMMERCE").prefix_separator("_").separator("__").try_parsing(true));

    builder.build().unwrap_or_else(|e| {
        tracing::warn!("config build failed, using empty config: {}", e);
        Config::default()
    })
}

/// make getter for settings, if not found, return default value
macro_rules! make_setting_getter_default {
    ($name:ident, $type:ty, $getter:ident) => {
        pub fn $name(k: &str, default: $type) -> $type {
            match settings().read() {
                Ok(guard) => guard.$getter(k).unwrap_or(default),
                Err(_) => default,
            }
        }
    };
}

/// make getter for settings, return Option value
macro_rules! make_setting_getter_option {
    ($name:ident, $type:ty, $getter:ident) => {
        pub fn $name(k: &str) -> Option<$type> {
            match settings().read() {
                Ok(guard) => guard.$getter(k).ok(),
                Err(_) => None,
            }
        }
    };
}

/// make getter for settings
macro_rules! make_setting_getter {
    ($name:ident, $type:ty, $getter:ident) => {
        impl GetDefault {
            make_setting_getter_default!($name, $type, $getter);
        }

        impl GetOption {
            make_setting_getter_option!($name, $type, $getter);
        }
    };
}

make_setting_getter!(string, String, get_string);
make_setting_getter!(boolean, bool, get_bool);
make_setting_getter!(int, i64, get_int);

impl Has {
    pub fn has<T: for<'a> serde::Deserialize<'a>>(k: &str) -> bool {
        match settings().read() {
            Ok(guard) => guard.get::<T>(k).is_ok(),
            Err(_) => false,
        }
    }
}

/// Settings
/// # Fields
/// * `name` - application name, used as the log file prefix
/// * `short` - application short name, first part of every error code
/// * `debug` - debug mode
/// * `log` - log config
/// * `render` - JSON rendering config
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub name: String,
    pub short: String,
    pub debug: bool,
    pub log: Option<Log>,
    pub render: Render,
}

/// Log config
/// # Fields
/// * `level` - EnvFilter directives
/// * `console` - write to stdout
/// * `dirs` - rolling log directory, empty disables file output
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Log {
    pub level: String,
    pub console: bool,
    pub dirs: String,
}

/// Render config
/// # Fields
/// * `indent` - spaces per nesting level in rendered JSON
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Render {
    pub indent: usize,
}

impl Default for Log {
    fn default() -> Self {
        Log { level: "info".to_string(), console: true, dirs: String::new() }
    }
}

impl Default for Render {
    fn default() -> Self {
        Render { indent: DEFAULT_INDENT }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "Commerce".to_string(),
            short: DEFAULT_SHORT.to_string(),
            debug: false,
            log: None,
            render: Default::default(),
        }
    }
}
