//! 输出配置
//!
//! 每个输出项描述一个目标文件及其包含的图层。未提供配置文件时，
//! 使用内建的“房屋”拆分方案：屋顶 → `Dächer.dxf`，建筑 → `Gebäude.dxf`。

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dxfsplit_file::LayerSet;
use serde::Deserialize;
use thiserror::Error;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "DXFSPLIT_CONFIG";

const ROOF_LAYERS: &[&str] = &[
    "Roof_Gebaeude Einzelhaus",
    "Roof_Gebaeude unsichtbar",
    "Roof_Kapelle",
    "Roof_Lagertank",
    "Roof_Lueftungsschacht",
    "Roof_Mauer gross",
    "Roof_Offenes Gebaeude",
    "Roof_Sakrales Gebaeude",
    "0",
];

const BUILDING_LAYERS: &[&str] = &[
    "Build_Gebaeude Einzelhaus",
    "Build_Gebaeude unsichtbar",
    "Build_Kapelle",
    "Build_Lagertank",
    "Build_Lueftungsschacht",
    "Build_Mauer gross",
    "Build_Sakrales Gebaeude",
    "0",
];

/// 配置根结构
#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "SplitConfig::default_outputs")]
    pub outputs: Vec<OutputProfile>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            outputs: Self::default_outputs(),
        }
    }
}

impl SplitConfig {
    fn default_outputs() -> Vec<OutputProfile> {
        vec![
            OutputProfile::new("roofs", "Dächer.dxf", ROOF_LAYERS),
            OutputProfile::new("buildings", "Gebäude.dxf", BUILDING_LAYERS),
        ]
    }

    /// 从显式路径加载并校验
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 查找顺序：环境变量 `DXFSPLIT_CONFIG`，然后 `./config/dxfsplit.toml`，最后内建默认值
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("dxfsplit.toml"))
            .map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for output in &self.outputs {
            if output.name.trim().is_empty() {
                return Err(ConfigError::Invalid("output name must not be empty".into()));
            }
            if output.file.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "output `{}` has no file name",
                    output.name
                )));
            }
            if !seen.insert(output.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate output name `{}`",
                    output.name
                )));
            }
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 一个输出文件：只包含 `layers` 上的实体
#[derive(Debug, Clone, Deserialize)]
pub struct OutputProfile {
    pub name: String,
    pub file: PathBuf,
    #[serde(default)]
    pub layers: LayerSet,
}

impl OutputProfile {
    pub fn new(name: &str, file: &str, layers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            file: PathBuf::from(file),
            layers: layers.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_describe_houses_split() {
        let cfg = SplitConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.outputs.len(), 2);

        let roofs = &cfg.outputs[0];
        assert_eq!(roofs.name, "roofs");
        assert_eq!(roofs.file, PathBuf::from("Dächer.dxf"));
        assert!(roofs.layers.contains("Roof_Kapelle"));
        assert!(!roofs.layers.contains("Build_Kapelle"));

        let buildings = &cfg.outputs[1];
        assert_eq!(buildings.file, PathBuf::from("Gebäude.dxf"));
        assert!(buildings.layers.contains("Build_Kapelle"));
        // 图层 "0" 同时属于两个输出
        assert!(roofs.layers.contains("0") && buildings.layers.contains("0"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [[outputs]]
            name = "walls"
            file = "walls.dxf"
            layers = ["Wall", "Wall_Hidden"]
            "#
        )
        .unwrap();

        let cfg = SplitConfig::from_file(file.path()).expect("load config");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.outputs.len(), 1);
        assert_eq!(cfg.outputs[0].name, "walls");
        assert!(cfg.outputs[0].layers.contains("Wall_Hidden"));
    }

    #[test]
    fn missing_outputs_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let cfg = SplitConfig::from_file(file.path()).expect("load config");
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.outputs.len(), 2);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            r#"
            [[outputs]]
            name = "a"
            file = "a.dxf"

            [[outputs]]
            name = "a"
            file = "b.dxf"
            "#
        )
        .unwrap();

        let err = SplitConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[[outputs]\nname = ").unwrap();

        let err = SplitConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
