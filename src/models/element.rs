use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 剧本元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Shot,
    Text,
}

/// 对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// 每种元素的版式：缩进（twip，相对正文区左右边界）、纯文本列、大小写、对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    pub indent_left: i32,
    pub indent_right: i32,
    /// 纯文本排版中的起始列
    pub column: usize,
    pub uppercase: bool,
    pub alignment: Alignment,
    /// 纯文本排版时的最大行宽
    pub max_width: Option<usize>,
    /// 是否需要包裹在括号中
    pub parenthesized: bool,
}

const BLOCK_LAYOUT: ElementLayout = ElementLayout {
    indent_left: 0,
    indent_right: 0,
    column: 0,
    uppercase: false,
    alignment: Alignment::Left,
    max_width: None,
    parenthesized: false,
};

impl ElementType {
    /// 类型菜单中可选的全部类型
    pub const ALL: [ElementType; 8] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Shot,
        ElementType::Text,
    ];

    /// Tab 键循环的类型环（不含 shot 和 text）
    pub const CYCLE: [ElementType; 6] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene_heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Shot => "shot",
            ElementType::Text => "text",
        }
    }

    /// 界面显示名称
    pub fn label(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Transition => "Transition",
            ElementType::Shot => "Shot",
            ElementType::Text => "Text",
        }
    }

    /// 空元素的占位提示
    pub fn placeholder(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "INT. LOCATION - DAY",
            ElementType::Action => "Action description...",
            ElementType::Character => "CHARACTER NAME",
            ElementType::Dialogue => "Character dialogue...",
            ElementType::Parenthetical => "(beat)",
            ElementType::Transition => "CUT TO:",
            ElementType::Shot => "ANGLE ON",
            ElementType::Text => "Text...",
        }
    }

    /// 版式表，所有导出器共用
    pub fn layout(&self) -> ElementLayout {
        match self {
            ElementType::SceneHeading | ElementType::Shot => ElementLayout {
                uppercase: true,
                ..BLOCK_LAYOUT
            },
            ElementType::Action | ElementType::Text => BLOCK_LAYOUT,
            ElementType::Character => ElementLayout {
                indent_left: 3600,
                column: 22,
                uppercase: true,
                ..BLOCK_LAYOUT
            },
            ElementType::Dialogue => ElementLayout {
                indent_left: 1800,
                indent_right: 2880,
                column: 10,
                max_width: Some(35),
                ..BLOCK_LAYOUT
            },
            ElementType::Parenthetical => ElementLayout {
                indent_left: 2520,
                indent_right: 3600,
                column: 16,
                max_width: Some(25),
                parenthesized: true,
                ..BLOCK_LAYOUT
            },
            ElementType::Transition => ElementLayout {
                uppercase: true,
                alignment: Alignment::Right,
                ..BLOCK_LAYOUT
            },
        }
    }

    /// 角色名、括号注释、对白属于同一个对白块
    pub fn is_in_dialogue_block(&self) -> bool {
        matches!(
            self,
            ElementType::Character | ElementType::Parenthetical | ElementType::Dialogue
        )
    }

    /// 按版式表转换大小写并补全括号
    pub fn apply_case(&self, content: &str) -> String {
        let layout = self.layout();
        let text = if layout.uppercase {
            content.to_uppercase()
        } else {
            content.to_string()
        };
        if layout.parenthesized {
            wrap_parens(&text)
        } else {
            text
        }
    }
}

/// 补全首尾括号，已经包裹的不重复添加
pub fn wrap_parens(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    if !content.starts_with('(') {
        out.push('(');
    }
    out.push_str(content);
    if !content.ends_with(')') {
        out.push(')');
    }
    out
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("未知的元素类型: {}", s))
    }
}

/// 剧本元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenplayElement {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub content: String,
    /// 场景编号，仅场景标题有效
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl ScreenplayElement {
    pub fn new(id: impl Into<String>, element_type: ElementType, content: impl Into<String>) -> Self {
        ScreenplayElement {
            id: id.into(),
            element_type,
            content: content.into(),
            scene_number: None,
            revision: None,
        }
    }

    // 检查元素类型是否匹配
    pub fn is_type(&self, types: &[ElementType]) -> bool {
        types.contains(&self.element_type)
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
