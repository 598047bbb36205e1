//! 包文档准入检查
//!
//! 只有根元素为OPF词汇中的 `package` 且 `version` 属于可接受集合的文档才会被提取。

use crate::epub::error::Rejection;
use crate::epub::opf::config::ParserConfig;
use crate::epub::opf::namespace::{Namespaces, Vocabulary};
use crate::epub::xml::XmlElement;

/// 包文档准入检查器
#[derive(Debug, Clone, Copy)]
pub struct DocumentGate<'a> {
    config: &'a ParserConfig,
    namespaces: &'a Namespaces,
}

impl<'a> DocumentGate<'a> {
    /// `namespaces` 应由同一根元素通过 `Namespaces::from_root` 得到
    pub fn new(config: &'a ParserConfig, namespaces: &'a Namespaces) -> Self {
        Self { config, namespaces }
    }

    /// 检查根元素，拒绝时给出原因
    ///
    /// 根元素必须无命名空间或属于OPF命名空间，`<opf:package>` 可以通过，
    /// 其他命名空间中的 `package` 会被拒绝。缺少 `version` 属性时直接拒绝。
    pub fn check(&self, root: &XmlElement) -> Result<(), Rejection> {
        if !self.namespaces.is_packaging(root, "package") {
            return Err(Rejection::NotPackage {
                found: root.name.clone(),
            });
        }

        let version = root.attribute("version").ok_or(Rejection::MissingVersion)?;
        if !self.config.accepts_version(version) {
            return Err(Rejection::UnsupportedVersion(version.to_string()));
        }

        Ok(())
    }

    pub fn accepts(&self, root: &XmlElement) -> bool {
        self.check(root).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::xml::XmlDocument;

    fn root(xml: &str) -> XmlElement {
        XmlDocument::parse(xml.as_bytes()).expect("解析失败").into_root()
    }

    fn check_with(config: &ParserConfig, xml: &str) -> Result<(), Rejection> {
        let root = root(xml);
        let namespaces = Namespaces::from_root(&root, config);
        DocumentGate::new(config, &namespaces).check(&root)
    }

    fn check(xml: &str) -> Result<(), Rejection> {
        check_with(&ParserConfig::default(), xml)
    }

    #[test]
    fn test_accepts_supported_versions() {
        assert_eq!(check(r#"<package version="2.0"/>"#), Ok(()));
        assert_eq!(check(r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0"/>"#), Ok(()));
        assert_eq!(
            check(r#"<opf:package xmlns:opf="http://www.idpf.org/2007/opf" version="2.0"/>"#),
            Ok(())
        );
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(
            check(r#"<package version="1.0"/>"#),
            Err(Rejection::UnsupportedVersion("1.0".to_string()))
        );
        assert_eq!(check(r#"<package/>"#), Err(Rejection::MissingVersion));
        assert_eq!(
            check(r#"<ncx version="2.0"/>"#),
            Err(Rejection::NotPackage { found: "ncx".to_string() })
        );
    }

    #[test]
    fn test_rejects_package_in_foreign_namespace() {
        assert_eq!(
            check(r#"<x:package xmlns:x="urn:not-opf" version="2.0"/>"#),
            Err(Rejection::NotPackage { found: "x:package".to_string() })
        );
        assert_eq!(
            check(r#"<x:package version="2.0"/>"#),
            Err(Rejection::NotPackage { found: "x:package".to_string() })
        );
    }

    #[test]
    fn test_version_set_is_configurable() {
        let config = ParserConfig {
            accepted_versions: vec!["3.1".to_string()],
            ..ParserConfig::default()
        };
        assert_eq!(check_with(&config, r#"<package version="3.1"/>"#), Ok(()));
        assert_eq!(
            check_with(&config, r#"<package version="3.0"/>"#),
            Err(Rejection::UnsupportedVersion("3.0".to_string()))
        );
    }

    #[test]
    fn test_accepts_matches_check() {
        let config = ParserConfig::default();
        let root = root(r#"<package version="2.0"/>"#);
        let namespaces = Namespaces::from_root(&root, &config);
        let gate = DocumentGate::new(&config, &namespaces);
        assert!(gate.accepts(&root));
    }
}
