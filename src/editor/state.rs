use serde::{Deserialize, Serialize};

use crate::models::ElementType;

/// 焦点移动后光标放置的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Caret {
    #[default]
    Start,
    End,
}

/// 编辑器界面状态：当前激活的元素、打开类型菜单的元素
///
/// 两者都以元素索引表示。初始状态没有激活元素。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorState {
    pub active_index: Option<usize>,
    pub open_menu_index: Option<usize>,
    pub caret: Caret,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(index: usize, caret: Caret) -> Self {
        EditorState {
            active_index: Some(index),
            open_menu_index: None,
            caret,
        }
    }

    /// 激活索引，越界时视为没有激活元素
    pub fn active_in(&self, len: usize) -> Option<usize> {
        self.active_index.filter(|&i| i < len)
    }

    pub fn is_menu_open(&self, index: usize) -> bool {
        self.open_menu_index == Some(index)
    }
}

/// 编辑器按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Tab,
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
}

/// 用户操作
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Focus(usize),
    Blur,
    /// 作用于当前激活元素；selection_start 为光标所在的字符偏移
    Key {
        key: EditorKey,
        shift: bool,
        selection_start: usize,
    },
    Input {
        index: usize,
        content: String,
    },
    ToggleTypeMenu(usize),
    SelectType {
        index: usize,
        element_type: ElementType,
    },
    /// 在末尾追加一个 action 元素
    AddElement,
}

impl EditorEvent {
    pub fn key(key: EditorKey) -> Self {
        EditorEvent::Key {
            key,
            shift: false,
            selection_start: 0,
        }
    }

    /// 是否会修改文档；方向键只移动焦点
    pub fn is_mutating(&self) -> bool {
        match self {
            EditorEvent::Focus(_) | EditorEvent::Blur => false,
            EditorEvent::Key { key, .. } => {
                matches!(key, EditorKey::Tab | EditorKey::Enter | EditorKey::Backspace)
            }
            _ => true,
        }
    }
}
