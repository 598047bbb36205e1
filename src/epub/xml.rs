//! XML文档树模块
//!
//! 基于quick-xml的命名空间感知读取器，把事件流组装成一棵轻量的元素树。
//! 每个元素和属性都带有解析后的命名空间URI，供OPF各部分的提取器使用。

use crate::epub::error::{EpubError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 元素属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// 原始限定名(如 `opf:role`、`xmlns:dc`)
    pub name: String,
    /// 前缀
    pub prefix: Option<String>,
    /// 本地名称
    pub local_name: String,
    /// 解析后的命名空间URI，无前缀或前缀未声明时为None
    pub namespace: Option<String>,
    /// 反转义后的属性值
    pub value: String,
}

/// 树节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// XML元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// 原始限定名(如 `dc:title`)
    pub name: String,
    /// 前缀
    pub prefix: Option<String>,
    /// 本地名称
    pub local_name: String,
    /// 解析后的命名空间URI，未绑定或前缀未声明时为None
    pub namespace: Option<String>,
    /// 属性列表(保持文档中的顺序)
    pub attributes: Vec<XmlAttribute>,
    /// 子节点
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// 按原始限定名查找属性值
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// 遍历直接子元素，忽略文本节点
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// 拼接所有后代文本节点，并去除首尾空白
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// 解析完成的XML文档
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// 解析XML字节内容
    ///
    /// # 参数
    /// * `content` - XML文件的原始字节(允许带UTF-8 BOM)
    ///
    /// # 返回值
    /// * `Result<XmlDocument>` - 文档树，格式错误时返回错误
    pub fn parse(content: &[u8]) -> Result<XmlDocument> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let mut reader = NsReader::from_reader(content);
        reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            let (namespace, event) = {
                let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
                (namespace_uri(&resolved), event)
            };

            match event {
                Event::Start(ref e) => {
                    if root.is_some() {
                        return Err(EpubError::MalformedXml("存在多个根元素".to_string()));
                    }
                    stack.push(Self::start_element(&reader, e, namespace)?);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(XmlNode::Element(element)),
                            None => root = Some(element),
                        }
                    }
                }
                Event::Text(ref e) => {
                    if let Some(current) = stack.last_mut() {
                        current.children.push(XmlNode::Text(e.unescape()?.into_owned()));
                    }
                }
                Event::CData(ref e) => {
                    if let Some(current) = stack.last_mut() {
                        let text = String::from_utf8_lossy(e).to_string();
                        current.children.push(XmlNode::Text(text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(EpubError::MalformedXml(format!("元素 {} 没有闭合", open.name)));
        }

        root.map(|root| XmlDocument { root })
            .ok_or_else(|| EpubError::MalformedXml("没有找到根元素".to_string()))
    }

    /// 获取根元素
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// 取出根元素的所有权
    pub fn into_root(self) -> XmlElement {
        self.root
    }

    fn start_element(
        reader: &NsReader<&[u8]>,
        e: &BytesStart,
        namespace: Option<String>,
    ) -> Result<XmlElement> {
        let name = e.name();
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            let (resolved, local_name) = reader.resolve_attribute(attr.key);
            attributes.push(XmlAttribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                prefix: attr.key.prefix().map(|p| String::from_utf8_lossy(p.as_ref()).to_string()),
                local_name: String::from_utf8_lossy(local_name.as_ref()).to_string(),
                namespace: namespace_uri(&resolved),
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(XmlElement {
            name: String::from_utf8_lossy(name.as_ref()).to_string(),
            prefix: name.prefix().map(|p| String::from_utf8_lossy(p.as_ref()).to_string()),
            local_name: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
            namespace,
            attributes,
            children: Vec::new(),
        })
    }
}

fn namespace_uri(resolved: &ResolveResult) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).to_string()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}
