//! 文本报告
//!
//! 把元数据写成便于追加到文本文件的纯文本块，每本书以一行 `~` 分隔。

use crate::epub::book::Book;
use crate::epub::opf::{Contributor, Identifier, Metadata};
use std::io::{self, Write};

/// 分隔不同书籍的行
pub const SEPARATOR: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

/// 写出一份元数据的报告
///
/// 依次写出标题、主题、版权、贡献者、创建者和标识符，最后写分隔行。
pub fn write_metadata_report<W: Write>(out: &mut W, metadata: &Metadata) -> io::Result<()> {
    write_lines(out, &metadata.titles)?;
    write_lines(out, &metadata.subjects)?;
    write_lines(out, &metadata.rights)?;
    write_contributors(out, &metadata.contributors)?;
    write_contributors(out, &metadata.creators)?;
    write_identifiers(out, &metadata.identifiers)?;
    writeln!(out, "{}", SEPARATOR)
}

/// 写出一本书中每份元数据的报告
pub fn write_book_report<W: Write>(out: &mut W, book: &Book) -> io::Result<()> {
    for metadata in &book.metadata {
        write_metadata_report(out, metadata)?;
    }
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, values: &[String]) -> io::Result<()> {
    for value in values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

fn write_contributors<W: Write>(out: &mut W, contributors: &[Contributor]) -> io::Result<()> {
    for contributor in contributors {
        writeln!(out, "角色: {}", contributor.role)?;
        writeln!(out, "排序名: {}", contributor.file_as)?;
        writeln!(out, "姓名: {}", contributor.name)?;
    }
    Ok(())
}

fn write_identifiers<W: Write>(out: &mut W, identifiers: &[Identifier]) -> io::Result<()> {
    for identifier in identifiers {
        writeln!(out, "{} {}", identifier.id, identifier.value)?;
        writeln!(out, "{}", identifier.scheme)?;
    }
    Ok(())
}
