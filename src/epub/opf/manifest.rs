//! 清单模块
//!
//! 提供EPUB包中文件清单的结构定义和提取功能。

use crate::epub::opf::namespace::Namespaces;
use crate::epub::opf::unique::UniqueList;
use crate::epub::xml::XmlElement;
use serde::{Deserialize, Serialize};

/// 清单项信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// 项目ID，供spine引用
    pub id: String,
    /// 文件路径(相对于OPF文件)
    pub href: String,
    /// 媒体类型
    pub media_type: String,
    /// 格式不受支持时的备用项目ID
    pub fallback: String,
    /// 样式备用项目ID
    pub fallback_style: String,
    /// 所需的命名空间
    pub required_namespace: String,
    /// 所需的模块
    pub required_modules: String,
}

impl Item {
    /// 创建新的清单项
    pub fn new(id: &str, href: &str, media_type: &str) -> Self {
        Self {
            id: id.to_string(),
            href: href.to_string(),
            media_type: media_type.to_string(),
            ..Self::default()
        }
    }

    /// 检查是否为图片文件
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// 检查是否为XHTML文件
    pub fn is_xhtml(&self) -> bool {
        self.media_type == "application/xhtml+xml"
    }
}

/// 单个包文档的清单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub items: UniqueList<Item>,
}

impl Manifest {
    /// 根据ID获取清单项
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 提取manifest部分中的item元素
pub fn extract_into(manifest: &mut Manifest, section: &XmlElement, namespaces: &Namespaces) {
    for child in section.child_elements() {
        if !namespaces.is_packaging(child, "item") {
            continue;
        }

        let attr = |name: &str| child.attribute(name).unwrap_or_default().to_string();
        manifest.items.insert(Item {
            id: attr("id"),
            href: attr("href"),
            media_type: attr("media-type"),
            fallback: attr("fallback"),
            fallback_style: attr("fallback-style"),
            required_namespace: attr("required-namespace"),
            required_modules: attr("required-modules"),
        });
    }
}
