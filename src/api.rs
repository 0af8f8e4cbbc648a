//! 导出与导入 API
//!
//! 这个模块提供调用方使用的入口：按格式导出剧本、写入文件、导入 Fountain 文本。

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::docx::{generate_docx, generate_docx_base64};
use crate::error::ExportResult;
use crate::models::{Conf, PartialScreenplay, Screenplay, SimpleConf};
use crate::parser::FountainParser;
use crate::pdf::to_screenplay_text;
use crate::utils::fountain_constants::LINE_REGEX;
use crate::writer::{to_fdx, to_fountain, to_rtf};

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Fountain,
    Fdx,
    Rtf,
    Docx,
    /// 带排版的纯文本，pdf 请求也落到这里
    #[default]
    Text,
}

impl ExportFormat {
    /// 解析格式参数，缺省或未知时为纯文本
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Fountain => "text/plain",
            ExportFormat::Fdx => "application/xml",
            ExportFormat::Rtf => "application/rtf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Text => "text/plain",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Fountain => "fountain",
            ExportFormat::Fdx => "fdx",
            ExportFormat::Rtf => "rtf",
            ExportFormat::Docx => "docx",
            ExportFormat::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fountain" => Ok(ExportFormat::Fountain),
            "fdx" => Ok(ExportFormat::Fdx),
            "rtf" => Ok(ExportFormat::Rtf),
            "docx" => Ok(ExportFormat::Docx),
            "pdf" | "txt" | "text" => Ok(ExportFormat::Text),
            other => Err(format!("未知的导出格式: {}", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 导出内容
#[derive(Debug, Clone, PartialEq)]
pub enum ExportBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl ExportBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportBody::Text(text) => text.as_bytes(),
            ExportBody::Bytes(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExportBody::Text(text) => Some(text),
            ExportBody::Bytes(_) => None,
        }
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: ExportBody,
    /// 按配置的每页元素数估算
    pub page_count: usize,
}

impl ExportedFile {
    /// 附件下载头
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// 标题转文件名：非 ASCII 字母数字替换为下划线并转小写
pub fn safe_file_stem(title: &str) -> String {
    LINE_REGEX["file_stem_unsafe"]
        .replace_all(title, "_")
        .to_lowercase()
}

/// 按格式导出剧本
pub fn export_screenplay(
    screenplay: &Screenplay,
    format: ExportFormat,
    config: &Conf,
) -> ExportResult<ExportedFile> {
    config.validate()?;

    let body = match format {
        ExportFormat::Fountain => ExportBody::Text(to_fountain(screenplay)),
        ExportFormat::Fdx => ExportBody::Text(to_fdx(screenplay)),
        ExportFormat::Rtf => ExportBody::Text(to_rtf(screenplay, config)),
        ExportFormat::Docx => ExportBody::Bytes(generate_docx(screenplay, config)?),
        ExportFormat::Text => ExportBody::Text(to_screenplay_text(screenplay, config)),
    };

    let filename = format!("{}.{}", safe_file_stem(&screenplay.title), format.extension());
    let page_count = screenplay.page_count_for(config);
    info!(
        %format,
        filename = %filename,
        elements = screenplay.elements.len(),
        pages = page_count,
        "导出剧本"
    );

    Ok(ExportedFile {
        filename,
        content_type: format.content_type(),
        body,
        page_count,
    })
}

/// 导出并写入目录，返回文件路径
pub async fn export_to_file(
    screenplay: &Screenplay,
    format: ExportFormat,
    output_dir: impl AsRef<Path>,
    config: Option<SimpleConf>,
) -> ExportResult<PathBuf> {
    let conf: Conf = config.unwrap_or_default().into();
    let exported = export_screenplay(screenplay, format, &conf)?;

    let output_dir = output_dir.as_ref();
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(&exported.filename);
    tokio::fs::write(&path, exported.body.as_bytes()).await?;

    info!(path = %path.display(), "导出文件已写入");
    Ok(path)
}

/// 获取 DOCX 文档的 Base64 编码
pub async fn export_to_docx_base64(
    screenplay: &Screenplay,
    config: Option<SimpleConf>,
) -> ExportResult<String> {
    let conf: Conf = config.unwrap_or_default().into();
    generate_docx_base64(screenplay, &conf)
}

/// 导入 Fountain 文本
pub fn import_fountain_text(text: &str) -> PartialScreenplay {
    let mut parser = FountainParser::new();
    let partial = parser.parse(text);
    info!(
        title = %partial.title,
        elements = partial.elements.len(),
        "导入 Fountain 文本"
    );
    partial
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, ScreenplayElement};

    #[test]
    fn format_parsing_defaults_to_text() {
        assert_eq!(ExportFormat::parse(Some("fdx")), ExportFormat::Fdx);
        assert_eq!(ExportFormat::parse(Some("FOUNTAIN")), ExportFormat::Fountain);
        assert_eq!(ExportFormat::parse(Some("pdf")), ExportFormat::Text);
        assert_eq!(ExportFormat::parse(Some("odt")), ExportFormat::Text);
        assert_eq!(ExportFormat::parse(None), ExportFormat::Text);
    }

    #[test]
    fn file_stem_is_ascii_lowercase() {
        assert_eq!(safe_file_stem("My Film: Part 2"), "my_film__part_2");
        assert_eq!(safe_file_stem("夜"), "_");
    }

    #[test]
    fn exported_file_metadata() {
        let sp = Screenplay::from_generated("p", "Night Shift", "Ann", Vec::new());
        let file = export_screenplay(&sp, ExportFormat::Fdx, &Conf::default()).unwrap();
        assert_eq!(file.filename, "night_shift.fdx");
        assert_eq!(file.content_type, "application/xml");
        assert_eq!(
            file.content_disposition(),
            "attachment; filename=\"night_shift.fdx\""
        );
    }

    #[test]
    fn page_count_uses_configured_page_size() {
        let elements = (0..20)
            .map(|_| ScreenplayElement::new("", ElementType::Action, "x"))
            .collect();
        let sp = Screenplay::from_generated("p", "T", "", elements);
        let conf = Conf { lines_per_page: 10, ..Conf::default() };
        let file = export_screenplay(&sp, ExportFormat::Text, &conf).unwrap();
        assert_eq!(file.page_count, 2);
        let file = export_screenplay(&sp, ExportFormat::Text, &Conf::default()).unwrap();
        assert_eq!(file.page_count, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let sp = Screenplay::from_generated("p", "T", "", Vec::new());
        let conf = Conf { lines_per_page: 0, ..Conf::default() };
        assert!(export_screenplay(&sp, ExportFormat::Text, &conf).is_err());
    }
}
