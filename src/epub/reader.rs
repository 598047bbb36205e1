use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::epub::book::Book;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::PackageParser;

/// 表示一个打开的EPUB文件
///
/// 只在一次解析调用期间持有压缩包，调用返回前释放。
pub struct Epub<R: Read + Seek = File> {
    archive: ZipArchive<R>,
}

impl Epub<File> {
    /// 从文件路径创建Epub实例
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<Epub, EpubError>` - 文件不存在或不是zip容器时返回错误
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Epub<File>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Epub<R> {
    /// 从任意可随机访问的读取器创建Epub实例
    pub fn from_reader(reader: R) -> Result<Epub<R>> {
        let archive = ZipArchive::new(reader)?;
        Ok(Epub { archive })
    }

    /// 列出EPUB文件中的所有条目(压缩包中的顺序)
    pub fn list_files(&mut self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i)?;
            files.push(file.name().to_string());
        }

        Ok(files)
    }

    /// 列出候选包文档的条目名
    pub fn package_entries(&mut self, parser: &PackageParser) -> Result<Vec<String>> {
        Ok(self
            .list_files()?
            .into_iter()
            .filter(|name| parser.is_candidate(name))
            .collect())
    }

    /// 提取指定文件的二进制内容
    ///
    /// # 参数
    /// * `filename` - 要提取的文件名
    ///
    /// # 返回值
    /// * `Result<Vec<u8>, EpubError>` - 文件的二进制内容
    pub fn extract_binary_file(&mut self, filename: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(filename)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 按压缩包顺序解析所有候选包文档
    ///
    /// 无法读取或不是格式良好XML的条目会被跳过并记录警告。
    pub fn read_book(&mut self, parser: &PackageParser) -> Book {
        let mut book = Book::new();

        for i in 0..self.archive.len() {
            let (name, content) = match self.read_candidate(i, parser) {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };
            parser.absorb_entry(&mut book, name, &content);
        }

        book
    }

    fn read_candidate(&mut self, index: usize, parser: &PackageParser) -> Result<Option<(String, Vec<u8>)>> {
        let mut file = self.archive.by_index(index).map_err(|e| EpubError::EntryRead {
            entry: format!("#{}", index),
            reason: e.to_string(),
        })?;

        if file.is_dir() || !parser.is_candidate(file.name()) {
            return Ok(None);
        }

        let name = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(|e| EpubError::EntryRead {
            entry: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Some((name, content)))
    }
}

impl PackageParser {
    /// 解析EPUB文件
    ///
    /// # 参数
    /// * `path` - epub文件路径
    ///
    /// # 返回值
    /// * `Result<Book>` - 只有压缩包本身无法打开时才返回错误
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Book> {
        let path = path.as_ref();
        let book = Epub::new(path)?.read_book(self);
        log::info!("{}: 找到 {} 份包文档", path.display(), book.len());
        Ok(book)
    }

    /// 从内存或其他可随机访问的读取器解析EPUB
    pub fn read_archive<R: Read + Seek>(&self, reader: R) -> Result<Book> {
        let book = Epub::from_reader(reader)?.read_book(self);
        log::debug!("找到 {} 份包文档", book.len());
        Ok(book)
    }

    /// 解析一组(条目名, 字节流)
    ///
    /// 适用于压缩包以外的来源，规则与 `read_archive` 相同。
    pub fn read_entries<I, N, R>(&self, entries: I) -> Book
    where
        I: IntoIterator<Item = (N, R)>,
        N: AsRef<str>,
        R: Read,
    {
        let mut book = Book::new();

        for (name, mut reader) in entries {
            let name = name.as_ref();
            if !self.is_candidate(name) {
                continue;
            }

            let mut content = Vec::new();
            if let Err(e) = reader.read_to_end(&mut content) {
                let err = EpubError::EntryRead {
                    entry: name.to_string(),
                    reason: e.to_string(),
                };
                log::warn!("{}", err);
                continue;
            }
            self.absorb_entry(&mut book, name.to_string(), &content);
        }

        book
    }

    fn absorb_entry(&self, book: &mut Book, name: String, content: &[u8]) {
        log::debug!("解析候选包文档: {}", name);

        match self.parse_document(content) {
            Ok(Some(mut document)) => {
                document.source = name;
                book.append(document);
            }
            Ok(None) => {}
            Err(e) => {
                let err = EpubError::EntryRead {
                    entry: name,
                    reason: e.to_string(),
                };
                log::warn!("{}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::opf::ParserConfig;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn opf(title: &str, version: &str) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0"?>"#,
                r#"<package xmlns="http://www.idpf.org/2007/opf" version="{}" unique-identifier="id">"#,
                r#"<metadata xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
                r#"<dc:title>{}</dc:title><dc:identifier id="id">{}</dc:identifier>"#,
                r#"</metadata>"#,
                r#"<manifest><item id="c" href="c.xhtml" media-type="application/xhtml+xml"/></manifest>"#,
                r#"<spine><itemref idref="c"/></spine>"#,
                r#"</package>"#
            ),
            version, title, title
        )
    }

    fn build_archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).expect("写入条目失败");
            writer.write_all(content.as_bytes()).expect("写入内容失败");
        }
        let mut cursor = writer.finish().expect("完成压缩包失败");
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_archive_without_package_documents() {
        let archive = build_archive(&[
            ("mimetype", "application/epub+zip"),
            ("OEBPS/ch1.xhtml", "<html/>"),
        ]);
        let book = PackageParser::default().read_archive(archive).expect("读取失败");
        assert!(book.is_empty());
        assert!(book.metadata.is_empty());
        assert!(book.manifests.is_empty());
        assert!(book.spines.is_empty());
        assert!(book.guides.is_empty());
    }

    #[test]
    fn test_single_package_document() {
        let content = opf("Sample Title", "2.0");
        let archive = build_archive(&[
            ("mimetype", "application/epub+zip"),
            ("OEBPS/content.opf", &content),
        ]);
        let book = PackageParser::default().read_archive(archive).expect("读取失败");

        assert_eq!(book.len(), 1);
        assert_eq!(book.sources, vec!["OEBPS/content.opf"]);
        assert_eq!(book.metadata[0].titles.to_vec(), vec!["Sample Title"]);
        assert_eq!(book.spines[0].item_refs[0].idref, "c");
    }

    #[test]
    fn test_multiple_package_documents_in_discovery_order() {
        let first = opf("First", "2.0");
        let second = opf("Second", "3.0");
        let archive = build_archive(&[("b/second.opf", &second), ("a/first.opf", &first)]);
        let book = PackageParser::default().read_archive(archive).expect("读取失败");

        assert_eq!(book.packages.len(), 2);
        assert_eq!(book.metadata.len(), 2);
        assert_eq!(book.manifests.len(), 2);
        assert_eq!(book.spines.len(), 2);
        assert_eq!(book.guides.len(), 2);
        assert_eq!(book.metadata[0].title(), Some("Second"));
        assert_eq!(book.metadata[1].title(), Some("First"));
        assert_eq!(book.packages[0].version, "3.0");
    }

    #[test]
    fn test_bad_candidates_are_skipped() {
        let good = opf("Good", "2.0");
        let old = opf("Old", "1.0");
        let archive = build_archive(&[
            ("broken.opf", "<package version=\"2.0\"><metadata>"),
            ("old.opf", &old),
            ("notes.opf.txt", "plain text, not xml"),
            ("content.opf", &good),
        ]);
        let book = PackageParser::default().read_archive(archive).expect("读取失败");

        assert_eq!(book.len(), 1);
        assert_eq!(book.metadata[0].title(), Some("Good"));
    }

    #[test]
    fn test_invalid_archive_is_fatal() {
        let err = PackageParser::default()
            .read_archive(Cursor::new(b"definitely not a zip".to_vec()))
            .unwrap_err();
        assert!(matches!(err, EpubError::Archive(_)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = PackageParser::default().open("/nonexistent/book.epub").unwrap_err();
        assert!(matches!(err, EpubError::Io(_)));
    }

    #[test]
    fn test_each_call_returns_fresh_book() {
        let content = opf("Once", "2.0");
        let parser = PackageParser::default();
        let first = parser.read_archive(build_archive(&[("content.opf", &content)])).unwrap();
        let second = parser.read_archive(build_archive(&[("content.opf", &content)])).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_epub_entry_listing() {
        let content = opf("Listed", "2.0");
        let archive = build_archive(&[("mimetype", "application/epub+zip"), ("OEBPS/content.opf", &content)]);
        let mut epub = Epub::from_reader(archive).expect("打开失败");
        let parser = PackageParser::default();

        assert_eq!(epub.list_files().unwrap(), vec!["mimetype", "OEBPS/content.opf"]);
        assert_eq!(epub.package_entries(&parser).unwrap(), vec!["OEBPS/content.opf"]);
        assert_eq!(epub.extract_binary_file("mimetype").unwrap(), b"application/epub+zip");
    }

    #[test]
    fn test_read_entries_from_plain_streams() {
        let content = opf("Streamed", "3.0");
        let entries = vec![
            ("content.opf", Cursor::new(content.into_bytes())),
            ("style.css", Cursor::new(b"body {}".to_vec())),
        ];
        let book = PackageParser::default().read_entries(entries);
        assert_eq!(book.len(), 1);
        assert_eq!(book.metadata[0].title(), Some("Streamed"));
    }

    #[test]
    fn test_custom_entry_pattern() {
        let content = opf("Custom", "2.0");
        let parser = PackageParser::new(ParserConfig {
            entry_pattern: "package.xml".to_string(),
            ..ParserConfig::default()
        });
        let book = parser
            .read_archive(build_archive(&[("content.opf", &content), ("EPUB/package.xml", &content)]))
            .unwrap();
        assert_eq!(book.sources, vec!["EPUB/package.xml"]);
    }
}
