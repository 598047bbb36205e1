use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// Epub相关的错误类型
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    /// 压缩包无法打开或不是有效的zip容器，整个解析调用因此失败
    #[error("压缩包错误: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XML文档结构不完整: {0}")]
    MalformedXml(String),

    /// 单个条目无法读取或不是格式良好的XML，读取器会跳过该条目
    #[error("无法读取条目 {entry}: {reason}")]
    EntryRead { entry: String, reason: String },

    #[error("不是可接受的包文档: {0}")]
    Rejected(#[from] Rejection),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

/// 包文档被拒绝的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("根元素应为package，找到: {found}")]
    NotPackage { found: String },

    #[error("根元素缺少version属性")]
    MissingVersion,

    #[error("不支持的版本: {0}")]
    UnsupportedVersion(String),
}
