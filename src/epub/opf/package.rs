//! 包信息模块
//!
//! package根元素上的属性：命名空间、版本和唯一标识符键。

use crate::epub::opf::namespace::Namespaces;
use crate::epub::xml::XmlElement;
use serde::{Deserialize, Serialize};

/// 单个包文档的package属性
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    /// Dublin Core命名空间
    pub dc_namespace: String,
    /// OPF命名空间
    pub opf_namespace: String,
    /// 声明的版本号
    pub version: String,
    /// 唯一标识符键，应与某个Identifier的id一致
    pub unique_identifier: String,
}

/// 读取package元素的属性
pub fn extract(root: &XmlElement, namespaces: &Namespaces) -> Package {
    Package {
        dc_namespace: namespaces.dc().to_string(),
        opf_namespace: namespaces.opf().to_string(),
        version: root.attribute("version").unwrap_or_default().to_string(),
        unique_identifier: root.attribute("unique-identifier").unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::opf::config::ParserConfig;
    use crate::epub::xml::XmlDocument;

    #[test]
    fn test_extract_package_attributes() {
        let root = XmlDocument::parse(
            br#"<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId"/>"#,
        )
        .expect("解析失败")
        .into_root();
        let ns = Namespaces::from_root(&root, &ParserConfig::default());

        let package = extract(&root, &ns);
        assert_eq!(package.version, "2.0");
        assert_eq!(package.unique_identifier, "BookId");
        assert_eq!(package.opf_namespace, "http://www.idpf.org/2007/opf");
        assert_eq!(package.dc_namespace, "http://purl.org/dc/elements/1.1/");
    }

    #[test]
    fn test_missing_unique_identifier_is_empty() {
        let root = XmlDocument::parse(br#"<package version="3.0"/>"#).expect("解析失败").into_root();
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        assert_eq!(extract(&root, &ns).unique_identifier, "");
    }
}
