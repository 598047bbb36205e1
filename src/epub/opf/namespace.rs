//! 命名空间解析模块
//!
//! 从package根元素中取出Dublin Core和OPF两个命名空间，并据此判断
//! 各元素、属性所属的词汇表。匹配依据是解析后的URI，而不是前缀文本。

use crate::epub::opf::config::ParserConfig;
use crate::epub::xml::{XmlAttribute, XmlElement};
use std::collections::HashMap;

/// 元素所属的词汇表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// Dublin Core书目元素
    DublinCore,
    /// OPF打包元素(package、metadata、manifest等)
    Packaging,
    /// 其他词汇表，提取时忽略
    Foreign,
}

/// 一份包文档的命名空间绑定
#[derive(Debug, Clone)]
pub struct Namespaces {
    dc: String,
    opf: String,
    bindings: HashMap<String, String>,
}

impl Namespaces {
    /// 从根元素的属性中解析命名空间
    ///
    /// `xmlns:dc` 和 `xmlns` 缺失时分别使用配置中的默认URI。
    pub fn from_root(root: &XmlElement, config: &ParserConfig) -> Self {
        let dc = root
            .attribute("xmlns:dc")
            .unwrap_or(&config.default_dc_namespace)
            .to_string();
        let opf = root
            .attribute("xmlns")
            .unwrap_or(&config.default_opf_namespace)
            .to_string();

        Self::new(dc, opf)
    }

    /// 用给定的两个URI创建绑定，前缀 `dc` 和 `opf` 分别指向它们
    pub fn new(dc: String, opf: String) -> Self {
        let mut bindings = HashMap::new();
        bindings.insert("dc".to_string(), dc.clone());
        bindings.insert("opf".to_string(), opf.clone());
        Self { dc, opf, bindings }
    }

    /// Dublin Core命名空间URI
    pub fn dc(&self) -> &str {
        &self.dc
    }

    /// OPF命名空间URI
    pub fn opf(&self) -> &str {
        &self.opf
    }

    /// 解析一个名称的命名空间
    ///
    /// 文档自身声明的绑定优先；前缀未声明时退回到本结构的 `dc`/`opf` 绑定。
    pub fn resolve<'a>(&'a self, prefix: Option<&str>, namespace: Option<&'a str>) -> Option<&'a str> {
        match (namespace, prefix) {
            (Some(uri), _) => Some(uri),
            (None, Some(prefix)) => self.bindings.get(prefix).map(String::as_str),
            (None, None) => None,
        }
    }

    /// 判断元素所属的词汇表
    ///
    /// 无前缀且没有默认命名空间的元素视为OPF元素，兼容未声明 `xmlns` 的旧文档。
    pub fn vocabulary(&self, element: &XmlElement) -> Vocabulary {
        match self.resolve(element.prefix.as_deref(), element.namespace.as_deref()) {
            Some(uri) if uri == self.dc => Vocabulary::DublinCore,
            Some(uri) if uri == self.opf => Vocabulary::Packaging,
            None if element.prefix.is_none() => Vocabulary::Packaging,
            _ => Vocabulary::Foreign,
        }
    }

    /// 元素是否为OPF词汇中指定本地名称的元素
    pub fn is_packaging(&self, element: &XmlElement, local_name: &str) -> bool {
        element.local_name == local_name && self.vocabulary(element) == Vocabulary::Packaging
    }

    /// 查找无前缀或属于OPF命名空间的属性
    ///
    /// OPF 2.0写作 `opf:role`，EPUB 3 及不规范的文档常写作 `role`，两者都能匹配。
    pub fn packaging_attr<'e>(&self, element: &'e XmlElement, local_name: &str) -> Option<&'e str> {
        element
            .attributes
            .iter()
            .filter(|attr| attr.local_name == local_name)
            .find(|attr| self.is_packaging_attr(attr))
            .map(|attr| attr.value.as_str())
    }

    fn is_packaging_attr(&self, attr: &XmlAttribute) -> bool {
        match attr.prefix.as_deref() {
            None => true,
            Some(prefix) => self.resolve(Some(prefix), attr.namespace.as_deref()) == Some(self.opf.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::xml::XmlDocument;

    fn parse(xml: &str) -> XmlElement {
        XmlDocument::parse(xml.as_bytes()).expect("解析失败").into_root()
    }

    #[test]
    fn test_defaults_when_root_declares_nothing() {
        let root = parse(r#"<package version="2.0"/>"#);
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        assert_eq!(ns.opf(), "http://www.idpf.org/2007/opf");
        assert_eq!(ns.dc(), "http://purl.org/dc/elements/1.1/");
    }

    #[test]
    fn test_declared_uris_win() {
        let root = parse(r#"<package xmlns="urn:x-opf" xmlns:dc="urn:x-dc" version="2.0"/>"#);
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        assert_eq!(ns.opf(), "urn:x-opf");
        assert_eq!(ns.dc(), "urn:x-dc");
    }

    #[test]
    fn test_vocabulary_follows_resolved_uri_not_prefix() {
        let root = parse(concat!(
            r#"<package xmlns="http://www.idpf.org/2007/opf" version="2.0">"#,
            r#"<metadata xmlns:purl="http://purl.org/dc/elements/1.1/" xmlns:dc="urn:not-dublin-core">"#,
            r#"<purl:title>A</purl:title><dc:title>B</dc:title><meta name="x" content="y"/>"#,
            r#"</metadata></package>"#
        ));
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        let metadata = root.child_elements().next().unwrap();
        let kinds: Vec<_> = metadata.child_elements().map(|e| ns.vocabulary(e)).collect();

        assert_eq!(ns.vocabulary(metadata), Vocabulary::Packaging);
        assert_eq!(kinds, vec![Vocabulary::DublinCore, Vocabulary::Foreign, Vocabulary::Packaging]);
    }

    #[test]
    fn test_undeclared_dc_prefix_falls_back_to_binding() {
        let root = parse(r#"<package version="2.0"><metadata><dc:title>T</dc:title><x:foo/></metadata></package>"#);
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        let metadata = root.child_elements().next().unwrap();
        let kinds: Vec<_> = metadata.child_elements().map(|e| ns.vocabulary(e)).collect();
        assert_eq!(kinds, vec![Vocabulary::DublinCore, Vocabulary::Foreign]);
    }

    #[test]
    fn test_packaging_attr_matches_prefixed_and_bare() {
        let root = parse(concat!(
            r#"<package xmlns:opf="http://www.idpf.org/2007/opf" version="2.0">"#,
            r#"<a opf:role="aut"/><b role="edt"/><c x:role="ill" xmlns:x="urn:other"/>"#,
            r#"</package>"#
        ));
        let ns = Namespaces::from_root(&root, &ParserConfig::default());
        let roles: Vec<_> = root.child_elements().map(|e| ns.packaging_attr(e, "role")).collect();
        assert_eq!(roles, vec![Some("aut"), Some("edt"), None]);
    }
}
