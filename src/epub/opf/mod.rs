//! OPF（Open Packaging Format）文件解析模块
//!
//! 此模块提供EPUB文件中OPF包文档的解析功能，包括package属性、元数据、清单、脊柱和指南的提取。

mod config;
mod gate;
pub mod guide;
pub mod manifest;
pub mod metadata;
mod namespace;
pub mod package;
mod parser;
pub mod spine;
mod unique;

// 重新导出公共类型
pub use config::{ParserConfig, DEFAULT_DC_NAMESPACE, DEFAULT_OPF_NAMESPACE};
pub use gate::DocumentGate;
pub use guide::{Guide, Reference};
pub use manifest::{Item, Manifest};
pub use metadata::{Contributor, Date, DcElement, Identifier, Metadata, TextField};
pub use namespace::{Namespaces, Vocabulary};
pub use package::Package;
pub use parser::PackageParser;
pub use spine::{ItemRef, Spine};
pub use unique::UniqueList;
