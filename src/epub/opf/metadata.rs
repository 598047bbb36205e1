//! 元数据处理模块
//!
//! 提供Dublin Core元数据的结构定义和提取功能。

use crate::epub::opf::namespace::{Namespaces, Vocabulary};
use crate::epub::opf::package::Package;
use crate::epub::opf::unique::UniqueList;
use crate::epub::xml::XmlElement;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 创建者或贡献者信息
///
/// `dc:creator` 和 `dc:contributor` 共用这个结构，分别存入不同的字段。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contributor {
    /// 角色(如aut、edt、ill)
    pub role: String,
    /// 姓名
    pub name: String,
    /// 排序用名称(file-as)
    pub file_as: String,
}

/// 日期及其事件类型
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    /// 事件类型(如publication、modification)
    pub event: String,
    /// 日期文本
    pub date: String,
}

/// 标识符信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// 元素ID，应与package的unique-identifier对应
    pub id: String,
    /// 标识符体系(如ISBN、UUID)
    pub scheme: String,
    /// 标识符值
    pub value: String,
}

/// 单个包文档中的元数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub titles: UniqueList<String>,
    /// 主要作者
    pub creators: UniqueList<Contributor>,
    pub subjects: UniqueList<String>,
    pub descriptions: UniqueList<String>,
    pub publishers: UniqueList<String>,
    /// 作者以外的参与者(编辑、插图等)
    pub contributors: UniqueList<Contributor>,
    /// 日期不去重，不同来源可以给出相同的日期
    pub dates: Vec<Date>,
    pub types: UniqueList<String>,
    pub formats: UniqueList<String>,
    pub identifiers: UniqueList<Identifier>,
    pub sources: UniqueList<String>,
    pub languages: UniqueList<String>,
    pub relations: UniqueList<String>,
    pub coverages: UniqueList<String>,
    pub rights: UniqueList<String>,
}

/// 以纯文本存储的Dublin Core元素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Subject,
    Description,
    Publisher,
    Type,
    Format,
    Source,
    Language,
    Relation,
    Coverage,
    Rights,
}

impl TextField {
    pub const ALL: [TextField; 11] = [
        TextField::Title,
        TextField::Subject,
        TextField::Description,
        TextField::Publisher,
        TextField::Type,
        TextField::Format,
        TextField::Source,
        TextField::Language,
        TextField::Relation,
        TextField::Coverage,
        TextField::Rights,
    ];

    /// 对应的Dublin Core本地名称
    pub fn tag(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Subject => "subject",
            TextField::Description => "description",
            TextField::Publisher => "publisher",
            TextField::Type => "type",
            TextField::Format => "format",
            TextField::Source => "source",
            TextField::Language => "language",
            TextField::Relation => "relation",
            TextField::Coverage => "coverage",
            TextField::Rights => "rights",
        }
    }
}

/// Dublin Core元素的种类，决定提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcElement {
    Text(TextField),
    Creator,
    Contributor,
    Date,
    Identifier,
}

/// 本地名称到元素种类的查找表
static DC_ELEMENTS: Lazy<HashMap<&'static str, DcElement>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, DcElement> = TextField::ALL
        .iter()
        .map(|field| (field.tag(), DcElement::Text(*field)))
        .collect();
    table.insert("creator", DcElement::Creator);
    table.insert("contributor", DcElement::Contributor);
    table.insert("date", DcElement::Date);
    table.insert("identifier", DcElement::Identifier);
    table
});

impl DcElement {
    /// 按本地名称查找，未识别的元素返回None
    pub fn from_tag(tag: &str) -> Option<DcElement> {
        DC_ELEMENTS.get(tag).copied()
    }

    /// 把一个元素的内容写入元数据
    pub fn apply(self, metadata: &mut Metadata, element: &XmlElement, namespaces: &Namespaces) {
        match self {
            DcElement::Text(field) => {
                metadata.text_field_mut(field).insert(element.text());
            }
            DcElement::Creator => {
                metadata.creators.insert(contributor_from(element, namespaces));
            }
            DcElement::Contributor => {
                metadata.contributors.insert(contributor_from(element, namespaces));
            }
            DcElement::Date => {
                metadata.dates.push(Date {
                    event: namespaces.packaging_attr(element, "event").unwrap_or_default().to_string(),
                    date: element.text(),
                });
            }
            DcElement::Identifier => {
                metadata.identifiers.insert(Identifier {
                    id: namespaces.packaging_attr(element, "id").unwrap_or_default().to_string(),
                    scheme: namespaces.packaging_attr(element, "scheme").unwrap_or_default().to_string(),
                    value: element.text(),
                });
            }
        }
    }
}

fn contributor_from(element: &XmlElement, namespaces: &Namespaces) -> Contributor {
    Contributor {
        role: namespaces.packaging_attr(element, "role").unwrap_or_default().to_string(),
        name: element.text(),
        file_as: namespaces.packaging_attr(element, "file-as").unwrap_or_default().to_string(),
    }
}

impl Metadata {
    /// 创建新的元数据实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取纯文本字段
    pub fn text_field(&self, field: TextField) -> &UniqueList<String> {
        match field {
            TextField::Title => &self.titles,
            TextField::Subject => &self.subjects,
            TextField::Description => &self.descriptions,
            TextField::Publisher => &self.publishers,
            TextField::Type => &self.types,
            TextField::Format => &self.formats,
            TextField::Source => &self.sources,
            TextField::Language => &self.languages,
            TextField::Relation => &self.relations,
            TextField::Coverage => &self.coverages,
            TextField::Rights => &self.rights,
        }
    }

    fn text_field_mut(&mut self, field: TextField) -> &mut UniqueList<String> {
        match field {
            TextField::Title => &mut self.titles,
            TextField::Subject => &mut self.subjects,
            TextField::Description => &mut self.descriptions,
            TextField::Publisher => &mut self.publishers,
            TextField::Type => &mut self.types,
            TextField::Format => &mut self.formats,
            TextField::Source => &mut self.sources,
            TextField::Language => &mut self.languages,
            TextField::Relation => &mut self.relations,
            TextField::Coverage => &mut self.coverages,
            TextField::Rights => &mut self.rights,
        }
    }

    /// 获取第一个标题
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }

    /// 获取package的unique-identifier所指向的标识符
    pub fn primary_identifier(&self, package: &Package) -> Option<&Identifier> {
        if package.unique_identifier.is_empty() {
            return None;
        }
        self.identifiers.iter().find(|id| id.id == package.unique_identifier)
    }

    /// 是否没有提取到任何元数据
    pub fn is_empty(&self) -> bool {
        TextField::ALL.iter().all(|field| self.text_field(*field).is_empty())
            && self.creators.is_empty()
            && self.contributors.is_empty()
            && self.dates.is_empty()
            && self.identifiers.is_empty()
    }
}

/// 提取metadata部分的直接子元素
///
/// 只处理解析到Dublin Core命名空间的元素，`meta` 和其他词汇表的元素被忽略。
pub fn extract_into(metadata: &mut Metadata, section: &XmlElement, namespaces: &Namespaces) {
    for child in section.child_elements() {
        if namespaces.vocabulary(child) != Vocabulary::DublinCore {
            continue;
        }
        match DcElement::from_tag(&child.local_name) {
            Some(kind) => kind.apply(metadata, child, namespaces),
            None => log::debug!("忽略未识别的元数据元素: {}", child.name),
        }
    }
}
