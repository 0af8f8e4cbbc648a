use crate::models::{Alignment, Conf, ElementType, Screenplay, ScreenplayElement};

/// 转义 RTF 控制字符；非 ASCII 字符写成 `\uN?`（UTF-16 有符号码元）
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\line "),
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

/// 单个元素的 RTF 段落，缩进取自版式表（twip）
pub fn format_element_rtf(element: &ScreenplayElement) -> String {
    let layout = element.element_type.layout();
    let mut content = escape_rtf(&element.content);
    if layout.parenthesized {
        content = crate::models::element::wrap_parens(&content);
    }

    let mut out = String::new();
    // 对白和括号注释紧贴角色名，不空行
    if !matches!(element.element_type, ElementType::Dialogue | ElementType::Parenthetical) {
        out.push_str("\\par");
    }
    out.push_str("\\pard");

    match layout.alignment {
        Alignment::Right => out.push_str("\\qr"),
        Alignment::Center => out.push_str("\\qc"),
        Alignment::Left => {
            out.push_str(&format!("\\li{}", layout.indent_left));
            if layout.indent_right > 0 {
                out.push_str(&format!("\\ri{}", layout.indent_right));
            }
        }
    }

    let bold = element.element_type == ElementType::SceneHeading;
    if bold {
        out.push_str("\\b");
    }
    if layout.uppercase {
        out.push_str("\\caps");
    }
    out.push(' ');
    out.push_str(&content);
    if layout.uppercase {
        out.push_str("\\caps0");
    }
    if bold {
        out.push_str("\\b0");
    }
    out.push_str("\\par");
    out
}

/// 生成 RTF 文档（Word 可直接打开）
pub fn to_rtf(screenplay: &Screenplay, config: &Conf) -> String {
    let mut lines: Vec<String> = Vec::new();

    // RTF 文件头
    lines.push("{\\rtf1\\ansi\\deff0".to_string());
    lines.push("{\\fonttbl{\\f0\\fmodern Courier New;}}".to_string());
    lines.push(format!(
        "\\paperw{}\\paperh{}",
        config.page_width_twips(),
        config.page_height_twips()
    ));
    lines.push(format!(
        "\\margl{}\\margr{}\\margt1440\\margb1440",
        (config.left_margin * 1440.0).round() as i32,
        (config.right_margin * 1440.0).round() as i32
    ));

    if config.print_title_page {
        let author = if screenplay.author.is_empty() {
            config.default_author.as_str()
        } else {
            screenplay.author.as_str()
        };
        lines.push("\\par\\par\\par\\par\\par\\par\\par\\par".to_string());
        lines.push(format!(
            "\\pard\\qc\\b\\fs28 {}\\b0\\par",
            escape_rtf(&screenplay.title.to_uppercase())
        ));
        lines.push("\\par\\par".to_string());
        lines.push("\\pard\\qc\\fs24 Written by\\par".to_string());
        lines.push("\\par".to_string());
        lines.push(format!("\\pard\\qc\\fs24 {}\\par", escape_rtf(author)));
        if let Some(draft) = screenplay.draft_number.as_deref().filter(|d| !d.is_empty()) {
            lines.push("\\par\\par".to_string());
            lines.push(format!("\\pard\\qc\\fs24 {}\\par", escape_rtf(draft)));
        }
        lines.push("\\page".to_string());
    }

    for element in &screenplay.elements {
        lines.push(format_element_rtf(element));
    }

    lines.push("}".to_string());
    lines.join("\n")
}
