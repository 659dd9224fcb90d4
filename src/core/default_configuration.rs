use std::fmt;
use std::fs;
use serde::Deserialize;
use log::LevelFilter;
use url::Url;

use crate::{
    Error,
    core::{
        config::Config,
        config::AppInfo,
        Result
    },
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3002/contactos";

const DEFAULT_COURSE  : &str = "3169901";
const DEFAULT_TITLE   : &str = "Agenda ADSO v7";
const DEFAULT_SUBTITLE: &str = "Contact management backed by a local JSON REST API, with validation.";

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : Option<String>,
    #[serde(rename = "logFile")]
    file    : Option<String>,

    #[serde(skip)]
    deserde_level: Option<LevelFilter>,
}

#[derive(Clone, Deserialize)]
struct AppInfoCfg {
    #[serde(rename = "course")]
    course  : Option<String>,
    #[serde(rename = "title")]
    title   : Option<String>,
    #[serde(rename = "subtitle")]
    subtitle: Option<String>,
}

#[derive(Clone, Deserialize)]
struct Configuration {
    #[serde(rename = "apiBaseUrl")]
    api_base_url: Option<String>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,

    #[serde(rename = "appInfo")]
    app_info    : Option<AppInfoCfg>,
}

pub struct Builder<'a> {
    api_base_url: Option<&'a str>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<Configuration>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            api_base_url: None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_api_base_url(&mut self, url: &'a str) -> &mut Self {
        self.api_base_url = Some(url);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<Configuration>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl<'a> Default for Builder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let mut cfg = match b.cfg.as_ref() {
            Some(cfg) => cfg.clone(),
            None => Self {
                api_base_url: None,
                logger      : None,
                app_info    : None,
            }
        };

        if let Some(url) = b.api_base_url {
            cfg.api_base_url = Some(url.to_string());
        }

        let url = cfg.api_base_url.get_or_insert_with(|| DEFAULT_API_BASE_URL.to_string());
        let parsed = Url::parse(url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Argument(format!("Api base url {} cannot carry a path", url)));
        }

        let mut logger = cfg.logger.take().unwrap_or(LogCfg {
            level: None,
            file: None,
            deserde_level: None,
        });

        if let Some(level) = b.log_level {
            logger.level = Some(level.to_string());
        }
        if let Some(file) = b.log_file {
            logger.file = Some(file.to_string());
        }

        logger.deserde_level = Some(logger.level.as_ref()
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info)
        );
        cfg.logger = Some(logger);

        let info = cfg.app_info.get_or_insert(AppInfoCfg {
            course  : None,
            title   : None,
            subtitle: None,
        });
        info.course.get_or_insert_with(|| DEFAULT_COURSE.to_string());
        info.title.get_or_insert_with(|| DEFAULT_TITLE.to_string());
        info.subtitle.get_or_insert_with(|| DEFAULT_SUBTITLE.to_string());

        Ok(cfg)
    }
}

impl Config for Configuration {
    fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    fn log_level(&self) -> LevelFilter {
        self.logger.as_ref()
            .and_then(|v| v.deserde_level)
            .unwrap_or(LevelFilter::Info)
    }

    fn log_file(&self) -> Option<&str> {
        self.logger.as_ref().and_then(|v| v.file.as_deref())
    }

    fn app_info(&self) -> &dyn AppInfo {
        match self.app_info.as_ref() {
            Some(info) => info,
            None => &DEFAULT_APP_INFO,
        }
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

static DEFAULT_APP_INFO: AppInfoCfg = AppInfoCfg {
    course  : None,
    title   : None,
    subtitle: None,
};

impl AppInfo for AppInfoCfg {
    fn course(&self) -> &str {
        self.course.as_deref().unwrap_or(DEFAULT_COURSE)
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "api:{},", self.api_base_url())?;
        write!(f, "\tlog:{}", self.log_level())?;
        if let Some(file) = self.log_file() {
            write!(f, "@{}", file)?;
        }
        write!(f, ",\tapp:{}({})", self.app_info().title(), self.app_info().course())
    }
}
