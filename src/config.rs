use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use json::JsonValue;

/// A named generated/reference pair checked by a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub name: String,
    pub generated: PathBuf,
    pub reference: PathBuf,
    /// Known number of differing samples, if the pair is not expected to match exactly
    pub expected_mismatches: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub comparisons: Vec<Comparison>,
}

impl BatchConfig {
    fn to_config(json_string: &str, base_dir: &Path) -> Result<BatchConfig, ConfigError> {
        let json = json::parse(json_string)?;

        let entries = &json["comparisons"];
        if !entries.is_array() {
            return Err(ConfigError::new("comparisons should be an array of objects"));
        }

        let mut comparisons = Vec::with_capacity(entries.len());
        for (index, entry) in entries.members().enumerate() {
            let name = match entry["name"].as_str() {
                Some(val) => val.to_string(),
                None => return Err(ConfigError::entry(index, "Couldn't parse name")),
            };
            let generated = match entry["generated"].as_str() {
                Some(val) => base_dir.join(val),
                None => return Err(ConfigError::entry(index, "Couldn't parse generated")),
            };
            let reference = match entry["reference"].as_str() {
                Some(val) => base_dir.join(val),
                None => return Err(ConfigError::entry(index, "Couldn't parse reference")),
            };
            let expected_mismatches = if entry["expected_mismatches"].is_null() {
                None
            } else {
                match entry["expected_mismatches"].as_usize() {
                    Some(val) => Some(val),
                    None => {
                        return Err(ConfigError::entry(
                            index,
                            "expected_mismatches should be a non-negative integer",
                        ));
                    }
                }
            };

            comparisons.push(Comparison {
                name,
                generated,
                reference,
                expected_mismatches,
            });
        }

        Ok(BatchConfig { comparisons })
    }

    /// Parse a manifest from a string. Relative image paths are joined onto `base_dir`.
    pub fn parse(json_string: &str, base_dir: &Path) -> Result<BatchConfig, ConfigError> {
        BatchConfig::to_config(json_string, base_dir)
    }

    /// Read a manifest file. Relative image paths are resolved against the manifest's directory.
    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<BatchConfig, ConfigError> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut json_string = String::new();
        file.read_to_string(&mut json_string)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        BatchConfig::to_config(&json_string, base_dir)
    }
}

impl From<Comparison> for JsonValue {
    fn from(comparison: Comparison) -> Self {
        let mut data = JsonValue::new_object();
        data["name"] = comparison.name.into();
        data["generated"] = comparison.generated.to_string_lossy().into_owned().into();
        data["reference"] = comparison.reference.to_string_lossy().into_owned().into();
        if let Some(expected) = comparison.expected_mismatches {
            data["expected_mismatches"] = expected.into();
        }
        data
    }
}

impl From<BatchConfig> for JsonValue {
    fn from(config: BatchConfig) -> Self {
        let mut data = JsonValue::new_object();
        data["comparisons"] = JsonValue::Array(
            config
                .comparisons
                .into_iter()
                .map(JsonValue::from)
                .collect(),
        );
        data
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(json::Error),
    Invalid { entry: Option<usize>, msg: String },
}

impl ConfigError {
    fn new(msg: &str) -> ConfigError {
        ConfigError::Invalid {
            entry: None,
            msg: String::from(msg),
        }
    }

    fn entry(index: usize, msg: &str) -> ConfigError {
        ConfigError::Invalid {
            entry: Some(index),
            msg: String::from(msg),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "ConfigParseError I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "ConfigParseError {}", e),
            ConfigError::Invalid {
                entry: Some(index),
                msg,
            } => write!(f, "ConfigParseError comparisons[{}]: {}", index, msg),
            ConfigError::Invalid { entry: None, msg } => write!(f, "ConfigParseError {}", msg),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<json::Error> for ConfigError {
    fn from(err: json::Error) -> Self {
        ConfigError::Json(err)
    }
}
