use std::fmt;

#[derive(Debug, Clone)]
pub enum PageloaderError {
    Config(String),
    RegistryBuild(String),
    LoaderNotFound(String),
    PropCoercion(String),
    Serialization(String),
    FileOperation(String),
}

impl PageloaderError {
    /// Stable error code, kept in sync with the operator docs.
    pub fn code(&self) -> &'static str {
        match self {
            PageloaderError::Config(_) => "E001",
            PageloaderError::RegistryBuild(_) => "E002",
            PageloaderError::LoaderNotFound(_) => "E003",
            PageloaderError::PropCoercion(_) => "E004",
            PageloaderError::Serialization(_) => "E005",
            PageloaderError::FileOperation(_) => "E006",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PageloaderError::Config(_) => "Configuration Error",
            PageloaderError::RegistryBuild(_) => "Registry Build Error",
            PageloaderError::LoaderNotFound(_) => "Loader Not Found",
            PageloaderError::PropCoercion(_) => "Prop Coercion Error",
            PageloaderError::Serialization(_) => "Serialization Error",
            PageloaderError::FileOperation(_) => "File Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PageloaderError::Config(msg) => msg,
            PageloaderError::RegistryBuild(msg) => msg,
            PageloaderError::LoaderNotFound(msg) => msg,
            PageloaderError::PropCoercion(msg) => msg,
            PageloaderError::Serialization(msg) => msg,
            PageloaderError::FileOperation(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PageloaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PageloaderError {}

// 便捷的构造函数
impl PageloaderError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        PageloaderError::Config(msg.into())
    }

    pub fn registry_build<T: Into<String>>(msg: T) -> Self {
        PageloaderError::RegistryBuild(msg.into())
    }

    pub fn loader_not_found<T: Into<String>>(msg: T) -> Self {
        PageloaderError::LoaderNotFound(msg.into())
    }

    pub fn prop_coercion<T: Into<String>>(msg: T) -> Self {
        PageloaderError::PropCoercion(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PageloaderError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PageloaderError::FileOperation(msg.into())
    }
}

impl From<serde_json::Error> for PageloaderError {
    fn from(err: serde_json::Error) -> Self {
        PageloaderError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PageloaderError {
    fn from(err: std::io::Error) -> Self {
        PageloaderError::FileOperation(err.to_string())
    }
}

impl From<toml::ser::Error> for PageloaderError {
    fn from(err: toml::ser::Error) -> Self {
        PageloaderError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PageloaderError>;
