//! 指南模块
//!
//! guide部分中的reference元素，标记封面、目录等语义位置。

use crate::epub::opf::namespace::Namespaces;
use crate::epub::opf::unique::UniqueList;
use crate::epub::xml::XmlElement;
use serde::{Deserialize, Serialize};

/// 指南引用
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// 语义类型(如cover、toc、title-page)
    pub kind: String,
    /// 显示标题
    pub title: String,
    /// 文件位置
    pub href: String,
}

/// 单个包文档的指南
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub references: UniqueList<Reference>,
}

impl Guide {
    /// 按语义类型查找第一个引用
    pub fn reference(&self, kind: &str) -> Option<&Reference> {
        self.references.iter().find(|reference| reference.kind == kind)
    }
}

/// 提取guide部分中的reference元素
pub fn extract_into(guide: &mut Guide, section: &XmlElement, namespaces: &Namespaces) {
    for child in section.child_elements() {
        if !namespaces.is_packaging(child, "reference") {
            continue;
        }
        guide.references.insert(Reference {
            kind: child.attribute("type").unwrap_or_default().to_string(),
            title: child.attribute("title").unwrap_or_default().to_string(),
            href: child.attribute("href").unwrap_or_default().to_string(),
        });
    }
}
