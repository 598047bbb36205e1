//! 脊柱模块
//!
//! 提供EPUB包中阅读顺序（脊柱）的结构定义和提取功能。

use crate::epub::opf::namespace::Namespaces;
use crate::epub::opf::unique::UniqueList;
use crate::epub::xml::XmlElement;
use serde::{Deserialize, Serialize};

/// 脊柱项信息(阅读顺序)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// 引用的清单项ID
    pub idref: String,
    /// linear属性原值("yes"、"no"或空)
    pub linear: String,
}

impl ItemRef {
    /// 创建新的脊柱项
    pub fn new(idref: &str) -> Self {
        Self {
            idref: idref.to_string(),
            linear: String::new(),
        }
    }

    /// 检查是否为线性阅读，只有 "no" 表示非线性
    pub fn is_linear(&self) -> bool {
        self.linear != "no"
    }
}

/// 单个包文档的脊柱
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spine {
    /// 脊柱的目录引用(NCX清单项ID)
    pub toc: String,
    /// 按文档顺序排列的脊柱项
    pub item_refs: UniqueList<ItemRef>,
}

impl Spine {
    pub fn len(&self) -> usize {
        self.item_refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_refs.is_empty()
    }

    /// 线性阅读顺序中的清单项ID
    pub fn linear_idrefs(&self) -> impl Iterator<Item = &str> {
        self.item_refs
            .iter()
            .filter(|item_ref| item_ref.is_linear())
            .map(|item_ref| item_ref.idref.as_str())
    }
}

/// 提取spine部分中的itemref元素
///
/// idref不与manifest交叉校验。
pub fn extract_into(spine: &mut Spine, section: &XmlElement, namespaces: &Namespaces) {
    if let Some(toc) = section.attribute("toc") {
        spine.toc = toc.to_string();
    }

    for child in section.child_elements() {
        if !namespaces.is_packaging(child, "itemref") {
            continue;
        }
        spine.item_refs.insert(ItemRef {
            idref: child.attribute("idref").unwrap_or_default().to_string(),
            linear: child.attribute("linear").unwrap_or_default().to_string(),
        });
    }
}
