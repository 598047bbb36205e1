use epubmeta::epub::report;
use epubmeta::{Book, EpubError, Library, PackageParser, ParserConfig, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 📚 epubmeta - EPUB元数据提取工具
#[derive(Parser)]
#[command(name = "epubmeta")]
#[command(about = "从EPUB文件的包文档中提取元数据")]
#[command(version)]
struct Args {
    /// EPUB文件或目录
    #[arg(required_unless_present = "init_config", help = "要处理的EPUB文件，或包含EPUB文件的目录(递归查找)")]
    path: Option<PathBuf>,

    /// 详细输出模式
    #[arg(short, long, help = "显示详细信息")]
    verbose: bool,

    /// 报告输出文件
    #[arg(short, long, help = "把元数据报告追加到指定文件")]
    output: Option<PathBuf>,

    /// 配置文件
    #[arg(short, long, help = "YAML格式的解析配置文件")]
    config: Option<PathBuf>,

    /// 输出格式
    #[arg(long, value_enum, default_value = "summary", help = "标准输出的显示格式")]
    format: OutputFormat,

    /// 生成默认配置文件
    #[arg(long, help = "把默认配置写到指定路径后退出")]
    init_config: Option<PathBuf>,
}

/// 标准输出的显示格式
#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    /// 每本书的摘要
    Summary,
    /// 与报告文件相同的纯文本
    Text,
    /// 完整结果的YAML
    Yaml,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Some(path) = &args.init_config {
        match ParserConfig::write_default(path) {
            Ok(_) => println!("📝 已生成默认配置文件: {}", path.display()),
            Err(e) => eprintln!("❌ 错误: {}", e),
        }
        return;
    }

    let Some(path) = &args.path else {
        return;
    };

    match run(path, &args) {
        Ok(library) => println!("🎉 处理完成，共 {} 本书", library.len()),
        Err(e) => eprintln!("❌ 错误: {}", e),
    }
}

fn run(root: &Path, args: &Args) -> Result<Library> {
    let config = match &args.config {
        Some(path) => ParserConfig::from_file(path)?,
        None => ParserConfig::default(),
    };
    let parser = PackageParser::new(config);

    let mut library = Library::new();
    for path in find_epubs(root) {
        match parser.open(&path) {
            Ok(book) => {
                display_book(&path, &book, &args.format)?;
                library.push(book);
            }
            Err(e) => eprintln!("❌ 无法读取 {}: {}", path.display(), e),
        }
    }

    if let Some(output) = &args.output {
        write_report(output, &library)?;
        println!("📄 报告已追加到: {}", output.display());
    }

    Ok(library)
}

/// 单个文件直接返回；目录则递归查找 `.epub` 文件
fn find_epubs(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("无法遍历目录项: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"))
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn display_book(path: &Path, book: &Book, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Summary => display_summary(path, book),
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            report::write_book_report(&mut stdout.lock(), book)?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(book)
                .map_err(|e| EpubError::ConfigError(format!("序列化结果失败: {}", e)))?;
            println!("# {}\n{}", path.display(), yaml);
        }
    }
    Ok(())
}

fn display_summary(path: &Path, book: &Book) {
    println!("\n📖 {}", path.display());

    if book.is_empty() {
        println!("  ⚠️  没有找到可接受的包文档");
        return;
    }

    for (i, doc) in book.documents().enumerate() {
        println!("  📦 包文档 {}: {} (版本 {})", i + 1, doc.source, doc.package.version);

        if let Some(title) = doc.metadata.title() {
            println!("    标题: {}", title);
        }

        for creator in doc.metadata.creators.iter() {
            let mut author_info = format!("    作者: {}", creator.name);
            if !creator.role.is_empty() {
                author_info.push_str(&format!(" ({})", creator.role));
            }
            if !creator.file_as.is_empty() {
                author_info.push_str(&format!(" [排序: {}]", creator.file_as));
            }
            println!("{}", author_info);
        }

        if !doc.metadata.languages.is_empty() {
            println!("    语言: {}", doc.metadata.languages.join(", "));
        }

        if let Some(identifier) = doc.metadata.primary_identifier(doc.package) {
            println!("    标识符: {}", identifier.value);
        }

        println!(
            "    清单项目: {} 个, 脊柱项目: {} 个, 指南引用: {} 个",
            doc.manifest.len(),
            doc.spine.len(),
            doc.guide.references.len()
        );
    }
}

fn write_report(output: &Path, library: &Library) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(output)?;
    let mut writer = BufWriter::new(file);

    for book in library.iter() {
        report::write_book_report(&mut writer, book)?;
    }
    writer.flush()?;

    Ok(())
}
