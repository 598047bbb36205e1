pub mod book;
pub mod error;
pub mod opf;
pub mod reader;
pub mod report;
pub mod xml;

// 重新导出错误处理
pub use error::{EpubError, Rejection, Result};

// 重新导出EPUB读取器和结果结构
pub use book::{Book, DocumentView, Library, PackageDocument};
pub use reader::Epub;

// 重新导出OPF相关
pub use opf::{
    Contributor,
    Date,
    DocumentGate,
    Guide,
    Identifier,
    Item,
    ItemRef,
    Manifest,
    Metadata,
    Namespaces,
    Package,
    PackageParser,
    ParserConfig,
    Reference,
    Spine,
    UniqueList,
    Vocabulary,
};

// 重新导出XML文档树
pub use xml::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
