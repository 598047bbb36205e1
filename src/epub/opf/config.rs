//! 解析器配置模块
//!
//! 提供包文档解析的可调参数，支持从YAML文件加载配置。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Dublin Core元素集的标准命名空间
pub const DEFAULT_DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// OPF打包词汇的标准命名空间
pub const DEFAULT_OPF_NAMESPACE: &str = "http://www.idpf.org/2007/opf";

/// 包文档解析配置
///
/// 所有字段都有默认值，YAML中只需写出需要覆盖的键：
///
/// ```yaml
/// accepted_versions: ["2.0", "3.0", "3.1"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// 可接受的package版本号
    pub accepted_versions: Vec<String>,
    /// 根元素未声明 `xmlns:dc` 时使用的命名空间
    pub default_dc_namespace: String,
    /// 根元素未声明 `xmlns` 时使用的命名空间
    pub default_opf_namespace: String,
    /// 条目名包含该子串时被视为候选包文档
    pub entry_pattern: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            accepted_versions: vec!["2.0".to_string(), "3.0".to_string()],
            default_dc_namespace: DEFAULT_DC_NAMESPACE.to_string(),
            default_opf_namespace: DEFAULT_OPF_NAMESPACE.to_string(),
            entry_pattern: ".opf".to_string(),
        }
    }
}

impl ParserConfig {
    /// 从YAML字符串加载配置
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 从YAML文件加载配置
    ///
    /// # 示例
    ///
    /// ```rust,no_run
    /// use epubmeta::ParserConfig;
    /// let config = ParserConfig::from_file("epubmeta.yaml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;
        Self::from_yaml_str(&content)
    }

    /// 序列化为YAML字符串
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yml::to_string(self)
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))
    }

    /// 把默认配置写到指定路径
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = Self::default().to_yaml_string()?;

        let content_with_header = format!(
            "# 包文档解析配置文件\n# accepted_versions: 可接受的package版本\n# entry_pattern: 候选包文档的条目名子串\n\n{}",
            yaml_content
        );

        fs::write(path, content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))
    }

    /// 版本号是否在可接受集合中
    pub fn accepts_version(&self, version: &str) -> bool {
        self.accepted_versions.iter().any(|v| v == version)
    }
}
