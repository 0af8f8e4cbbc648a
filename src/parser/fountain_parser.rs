use std::collections::HashMap;
use tracing::debug;

use crate::models::{ElementType, PartialScreenplay, ScreenplayElement};
use crate::utils::fountain_constants::{LINE_REGEX, TITLE_PAGE_TERMINATORS};
use crate::utils::is_scene_heading_prefix;

/// 解析状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    TitlePage,
    Body,
}

/// Fountain 解析器
///
/// 单遍从左到右扫描。没有遇到 `===` / `---` 之前所有行都属于标题页，
/// 因此缺少结束标记的输入得到零个元素。无法识别的行一律退化为 action，解析永不失败。
pub struct FountainParser {
    state: ParseState,
    metadata: HashMap<String, String>,
    elements: Vec<ScreenplayElement>,
    current: Option<ScreenplayElement>,
    element_id: usize,
}

impl FountainParser {
    pub fn new() -> Self {
        FountainParser {
            state: ParseState::TitlePage,
            metadata: HashMap::new(),
            elements: Vec::new(),
            current: None,
            element_id: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// 解析 Fountain 文本
    pub fn parse(&mut self, text: &str) -> PartialScreenplay {
        self.reset();
        let lines: Vec<&str> = text.split('\n').collect();

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            // 标题页结束标记，正文中出现时直接跳过
            if TITLE_PAGE_TERMINATORS.contains(&trimmed) {
                self.state = ParseState::Body;
                continue;
            }

            if self.state == ParseState::TitlePage {
                self.parse_title_line(line.trim_end());
                continue;
            }

            // 空行结束当前元素
            if trimmed.is_empty() {
                self.flush();
                continue;
            }

            let next_line = lines.get(i + 1).map(|l| l.trim());
            let mut element_type = classify_line(trimmed, next_line);

            // 角色名或括号注释下方紧跟的普通行是对白
            if element_type == ElementType::Action {
                if let Some(open) = &self.current {
                    if open.is_type(&[ElementType::Character, ElementType::Parenthetical]) {
                        element_type = ElementType::Dialogue;
                    }
                }
            }
            debug!(line = i, %element_type, "行分类");

            self.push_line(trimmed, element_type);
        }

        self.flush();
        self.finish()
    }

    /// 每次解析前清空上一次的状态
    fn reset(&mut self) {
        self.state = ParseState::TitlePage;
        self.metadata.clear();
        self.elements.clear();
        self.current = None;
        self.element_id = 0;
    }

    fn parse_title_line(&mut self, line: &str) {
        if let Some(caps) = LINE_REGEX["title_page"].captures(line) {
            self.metadata
                .insert(caps[1].to_lowercase(), caps[2].to_string());
        }
    }

    fn push_line(&mut self, trimmed: &str, element_type: ElementType) {
        // 只有前后两行都是 dialogue 时才合并
        if let Some(open) = self.current.as_mut() {
            if open.element_type == element_type && element_type == ElementType::Dialogue {
                open.content.push('\n');
                open.content.push_str(trimmed);
                return;
            }
        }

        self.flush();
        let id = format!("elem_{}", self.element_id);
        self.element_id += 1;
        self.current = Some(ScreenplayElement::new(
            id,
            element_type,
            clean_content(trimmed, element_type),
        ));
    }

    fn flush(&mut self) {
        if let Some(element) = self.current.take() {
            self.elements.push(element);
        }
    }

    fn finish(&mut self) -> PartialScreenplay {
        let mut metadata = std::mem::take(&mut self.metadata);
        PartialScreenplay {
            title: metadata.remove("title").unwrap_or_else(|| "Untitled".to_string()),
            author: metadata.remove("author"),
            contact: metadata.remove("contact"),
            draft_number: metadata.remove("draft"),
            date: metadata.remove("date"),
            elements: std::mem::take(&mut self.elements),
        }
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 按优先级判断单行（已去除首尾空白）的元素类型
///
/// 该函数本身从不返回 dialogue。
pub fn classify_line(line: &str, next_line: Option<&str>) -> ElementType {
    if is_scene_heading_prefix(line) || line.starts_with('.') {
        return ElementType::SceneHeading;
    }

    if line.starts_with('@') {
        return ElementType::Character;
    }

    if line.ends_with("TO:") || line.starts_with('>') {
        return ElementType::Transition;
    }

    if line.starts_with('(') && line.ends_with(')') {
        return ElementType::Parenthetical;
    }

    // 全大写行，且下一行是普通文本
    if LINE_REGEX["character_caps"].is_match(line) {
        if let Some(next) = next_line {
            if !next.is_empty()
                && !next.starts_with('(')
                && !LINE_REGEX["uppercase_line"].is_match(next)
            {
                return ElementType::Character;
            }
        }
    }

    ElementType::Action
}

/// 去除强制前缀
pub fn clean_content(line: &str, element_type: ElementType) -> String {
    match element_type {
        ElementType::SceneHeading => line.strip_prefix('.').unwrap_or(line).to_string(),
        ElementType::Character => line.strip_prefix('@').unwrap_or(line).to_string(),
        ElementType::Transition => match line.strip_prefix('>') {
            Some(rest) => rest.trim().to_string(),
            None => line.to_string(),
        },
        _ => line.to_string(),
    }
}

/// 解析 Fountain 文本为部分剧本
pub fn from_fountain(text: &str) -> PartialScreenplay {
    FountainParser::new().parse(text)
}
