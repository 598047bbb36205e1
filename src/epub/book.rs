//! 书籍结果模块
//!
//! 每个通过检查的包文档产生一份快照，按发现顺序追加到Book中。
//! 多份包文档不会合并，Book保留每份文档各自的结果。

use crate::epub::opf::{Guide, Manifest, Metadata, Package, Spine};
use serde::{Deserialize, Serialize};

/// 单个包文档的提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDocument {
    /// 压缩包中的条目名
    pub source: String,
    pub package: Package,
    pub metadata: Metadata,
    pub manifest: Manifest,
    pub spine: Spine,
    pub guide: Guide,
}

impl PackageDocument {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            ..Self::default()
        }
    }
}

/// 一个EPUB文件的解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// 包文档的条目名(发现顺序)
    pub sources: Vec<String>,
    pub packages: Vec<Package>,
    pub metadata: Vec<Metadata>,
    pub manifests: Vec<Manifest>,
    pub spines: Vec<Spine>,
    pub guides: Vec<Guide>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把一份包文档的各部分追加到对应列表
    pub fn append(&mut self, document: PackageDocument) {
        self.sources.push(document.source);
        self.packages.push(document.package);
        self.metadata.push(document.metadata);
        self.manifests.push(document.manifest);
        self.spines.push(document.spine);
        self.guides.push(document.guide);
    }

    /// 包文档数量
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// 是否没有任何包文档通过检查
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// 按文档重新组合各部分
    ///
    /// 各列表长度不一致时(例如手工构造或反序列化得到的Book)，以最短的列表为准。
    pub fn documents(&self) -> impl Iterator<Item = DocumentView<'_>> {
        self.sources
            .iter()
            .zip(&self.packages)
            .zip(&self.metadata)
            .zip(&self.manifests)
            .zip(&self.spines)
            .zip(&self.guides)
            .map(|(((((source, package), metadata), manifest), spine), guide)| DocumentView {
                source,
                package,
                metadata,
                manifest,
                spine,
                guide,
            })
    }
}

/// 一份包文档各部分的借用视图
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a> {
    pub source: &'a str,
    pub package: &'a Package,
    pub metadata: &'a Metadata,
    pub manifest: &'a Manifest,
    pub spine: &'a Spine,
    pub guide: &'a Guide,
}

/// 多本书的集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    pub books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }
}
