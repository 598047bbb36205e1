pub mod epub;

// === 核心API重新导出 ===

/// 包文档解析器（主要接口）
pub use epub::PackageParser;

/// 解析配置
pub use epub::ParserConfig;

/// 错误处理
pub use epub::{EpubError, Rejection, Result};

// === 数据结构 ===

/// 解析结果
pub use epub::{Book, DocumentView, Library, PackageDocument};

/// 各部分记录
pub use epub::{
    Contributor,
    Date,
    Guide,
    Identifier,
    Item,
    ItemRef,
    Manifest,
    Metadata,
    Package,
    Reference,
    Spine,
};

// === 底层组件（高级用法） ===

pub use epub::{DocumentGate, Epub, Namespaces, UniqueList, Vocabulary};
pub use epub::{XmlAttribute, XmlDocument, XmlElement, XmlNode};

// === 库信息 ===

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库的描述
pub const DESCRIPTION: &str = "从EPUB包文档中提取书目和结构元数据";

// === 便捷函数 ===

/// 使用默认配置解析EPUB文件
///
/// 这是 `PackageParser::default().open(path)` 的便捷包装函数。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<Book>` - 解析结果，压缩包无法打开时返回错误
///
/// # 示例
///
/// ```rust,no_run
/// let book = epubmeta::open("book.epub")?;
/// for metadata in &book.metadata {
///     println!("书名: {}", metadata.title().unwrap_or("未知标题"));
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Book> {
    PackageParser::default().open(path)
}

/// 使用默认配置从读取器解析EPUB
pub fn read_archive<R: std::io::Read + std::io::Seek>(reader: R) -> Result<Book> {
    PackageParser::default().read_archive(reader)
}
