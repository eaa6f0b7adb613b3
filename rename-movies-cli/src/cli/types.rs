use clap::ValueEnum;
use rename_movies_core::Preview;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    List,
    None,
}

impl PreviewArg {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "list" => Some(Self::List),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Preview style named by `[defaults] preview_format`, or `List` with a
    /// warning when the value is not recognized.
    pub fn from_config(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!(
                preview_format = s,
                "unknown preview_format in config, using list"
            );
            Self::List
        })
    }
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::List => Self::List,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for rename_movies_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}
