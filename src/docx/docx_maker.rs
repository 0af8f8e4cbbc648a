//! DOCX 生成模块
//!
//! 先把剧本展开为一组段落描述（`DocxSection`），再交给 docx-rs 生成 Word 文档。

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts};
use serde::Serialize;
use tracing::debug;

use crate::error::ExportResult;
use crate::models::{Alignment, Conf, ElementType, Screenplay};

/// 段落种类
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SectionKind {
    Title,
    Text,
    PageBreak,
    Element(ElementType),
}

/// 段落描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocxSection {
    pub kind: SectionKind,
    pub content: String,
    pub style: &'static str,
}

impl DocxSection {
    fn new(kind: SectionKind, content: impl Into<String>, style: &'static str) -> Self {
        DocxSection {
            kind,
            content: content.into(),
            style,
        }
    }
}

/// 元素类型对应的 Word 样式名
pub fn docx_style(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::SceneHeading => "SceneHeading",
        ElementType::Action => "Action",
        ElementType::Character => "Character",
        ElementType::Dialogue => "Dialogue",
        ElementType::Parenthetical => "Parenthetical",
        ElementType::Transition => "Transition",
        ElementType::Shot => "Shot",
        ElementType::Text => "Normal",
    }
}

/// 展开为段落描述：标题页、分页符、正文
pub fn docx_sections(screenplay: &Screenplay, config: &Conf) -> Vec<DocxSection> {
    let mut sections = Vec::new();

    if config.print_title_page {
        let author = if screenplay.author.is_empty() {
            config.default_author.as_str()
        } else {
            screenplay.author.as_str()
        };
        sections.push(DocxSection::new(SectionKind::Title, screenplay.title.as_str(), "Title"));
        sections.push(DocxSection::new(SectionKind::Text, "", "Normal"));
        sections.push(DocxSection::new(SectionKind::Text, "Written by", "Centered"));
        sections.push(DocxSection::new(SectionKind::Text, author, "Centered"));

        if let Some(draft) = screenplay.draft_number.as_deref().filter(|d| !d.is_empty()) {
            sections.push(DocxSection::new(SectionKind::Text, "", "Normal"));
            sections.push(DocxSection::new(SectionKind::Text, draft, "Centered"));
        }

        sections.push(DocxSection::new(SectionKind::PageBreak, "", "Normal"));
    }

    for element in &screenplay.elements {
        sections.push(DocxSection::new(
            SectionKind::Element(element.element_type),
            element.element_type.apply_case(&element.content),
            docx_style(element.element_type),
        ));
    }

    sections
}

fn make_run(text: &str, config: &Conf) -> Run {
    let font = config.font_family.as_str();
    Run::new()
        .add_text(text)
        .size(config.font_size * 2) // docx 字号单位为半磅
        .fonts(RunFonts::new().ascii(font).hi_ansi(font).east_asia(font))
}

fn to_docx_alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
    }
}

/// 段落描述转换为 docx-rs 段落
fn section_to_paragraph(section: &DocxSection, config: &Conf) -> Paragraph {
    match &section.kind {
        SectionKind::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        SectionKind::Title => Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(make_run(&section.content.to_uppercase(), config).bold()),
        SectionKind::Text => {
            let mut paragraph = Paragraph::new();
            if section.style == "Centered" {
                paragraph = paragraph.align(AlignmentType::Center);
            }
            if section.content.is_empty() {
                paragraph
            } else {
                paragraph.add_run(make_run(&section.content, config))
            }
        }
        SectionKind::Element(element_type) => {
            let layout = element_type.layout();
            let mut paragraph = Paragraph::new()
                .align(to_docx_alignment(layout.alignment))
                .indent(
                    Some(layout.indent_left),
                    None,
                    (layout.indent_right > 0).then_some(layout.indent_right),
                    None,
                );

            // 元素内的换行转为软换行
            for (i, line) in section.content.split('\n').enumerate() {
                let mut run = make_run(line, config);
                if *element_type == ElementType::SceneHeading {
                    run = run.bold();
                }
                if i > 0 {
                    paragraph = paragraph.add_run(Run::new().add_break(BreakType::TextWrapping));
                }
                paragraph = paragraph.add_run(run);
            }
            paragraph
        }
    }
}

/// 生成 DOCX 文档字节
pub fn generate_docx(screenplay: &Screenplay, config: &Conf) -> ExportResult<Vec<u8>> {
    let sections = docx_sections(screenplay, config);
    debug!(sections = sections.len(), "开始生成 DOCX");

    let mut docx = Docx::new()
        .page_size(config.page_width_twips(), config.page_height_twips())
        .page_margin(
            PageMargin::new()
                .top(1440)
                .bottom(1440)
                .left((config.left_margin * 1440.0).round() as i32)
                .right((config.right_margin * 1440.0).round() as i32),
        );

    for section in &sections {
        docx = docx.add_paragraph(section_to_paragraph(section, config));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(docx_rs::DocxError::ZipError)?;
    Ok(buffer.into_inner())
}

/// 获取 Base64 编码的文档
pub fn generate_docx_base64(screenplay: &Screenplay, config: &Conf) -> ExportResult<String> {
    let bytes = generate_docx(screenplay, config)?;
    Ok(base64::encode(&bytes))
}
