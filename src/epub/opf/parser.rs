//! OPF解析器模块
//!
//! 把一份包文档解析为PackageDocument：准入检查、命名空间绑定，
//! 再把package下的各部分分派给对应的提取器。

use crate::epub::book::PackageDocument;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::config::ParserConfig;
use crate::epub::opf::gate::DocumentGate;
use crate::epub::opf::namespace::Namespaces;
use crate::epub::opf::{guide, manifest, metadata, package, spine};
use crate::epub::xml::{XmlDocument, XmlElement};

/// package下的顶层部分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Metadata,
    Manifest,
    Spine,
    Guide,
}

impl Section {
    fn from_tag(tag: &str) -> Option<Section> {
        match tag {
            "metadata" => Some(Section::Metadata),
            "manifest" => Some(Section::Manifest),
            "spine" => Some(Section::Spine),
            "guide" => Some(Section::Guide),
            _ => None,
        }
    }
}

/// 包文档解析器
///
/// 解析器本身不保存任何解析结果，每次调用都返回新的值。
#[derive(Debug, Clone, Default)]
pub struct PackageParser {
    config: ParserConfig,
}

impl PackageParser {
    /// 使用指定配置创建解析器
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 条目名是否为候选包文档
    pub fn is_candidate(&self, entry_name: &str) -> bool {
        entry_name.contains(&self.config.entry_pattern)
    }

    /// 解析一份包文档
    ///
    /// # 参数
    /// * `content` - 包文档的XML字节
    ///
    /// # 返回值
    /// * `Result<Option<PackageDocument>>` - 未通过准入检查时为 `Ok(None)`，
    ///   XML格式错误时返回错误
    pub fn parse_document(&self, content: &[u8]) -> Result<Option<PackageDocument>> {
        match self.parse_document_strict(content) {
            Ok(document) => Ok(Some(document)),
            Err(EpubError::Rejected(reason)) => {
                log::debug!("跳过包文档: {}", reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// 解析一份包文档，未通过准入检查时返回 `EpubError::Rejected` 说明原因
    pub fn parse_document_strict(&self, content: &[u8]) -> Result<PackageDocument> {
        let doc = XmlDocument::parse(content)?;
        let root = doc.root();

        let namespaces = Namespaces::from_root(root, &self.config);
        DocumentGate::new(&self.config, &namespaces).check(root)?;

        Ok(Self::extract(root, &namespaces))
    }

    /// 从已通过检查的根元素中提取各部分
    fn extract(root: &XmlElement, namespaces: &Namespaces) -> PackageDocument {
        let mut document = PackageDocument::new(package::extract(root, namespaces));

        for child in root.child_elements() {
            let section = match Section::from_tag(&child.local_name) {
                Some(section) if namespaces.is_packaging(child, &child.local_name) => section,
                _ => continue,
            };

            match section {
                Section::Metadata => metadata::extract_into(&mut document.metadata, child, namespaces),
                Section::Manifest => manifest::extract_into(&mut document.manifest, child, namespaces),
                Section::Spine => spine::extract_into(&mut document.spine, child, namespaces),
                Section::Guide => guide::extract_into(&mut document.guide, child, namespaces),
            }
        }

        document
    }
}
