use log::LevelFilter;

pub trait AppInfo: Send + Sync {
    fn course(&self) -> &str;
    fn title(&self) -> &str;
    fn subtitle(&self) -> &str;
}

pub trait Config: Send + Sync {
    fn api_base_url(&self) -> &str;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<&str>;

    fn app_info(&self) -> &dyn AppInfo;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}
