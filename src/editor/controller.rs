use tracing::debug;

use crate::document;
use crate::editor::state::{Caret, EditorEvent, EditorKey, EditorState};
use crate::models::{ElementType, ScreenplayElement};

/// Enter 后新元素的类型
pub fn next_type_on_enter(current: ElementType) -> ElementType {
    match current {
        ElementType::SceneHeading => ElementType::Action,
        ElementType::Action => ElementType::Action,
        ElementType::Character => ElementType::Dialogue,
        ElementType::Dialogue => ElementType::Character,
        ElementType::Parenthetical => ElementType::Dialogue,
        ElementType::Transition => ElementType::SceneHeading,
        _ => ElementType::Action,
    }
}

/// Tab 向前循环；不在环中的类型（shot、text）进入环首
pub fn cycle_forward(current: ElementType) -> ElementType {
    let ring = &ElementType::CYCLE;
    match ring.iter().position(|t| *t == current) {
        Some(i) => ring[(i + 1) % ring.len()],
        None => ring[0],
    }
}

/// Shift+Tab 向后循环；不在环中的类型按位置 -1 处理，落到倒数第二个
pub fn cycle_backward(current: ElementType) -> ElementType {
    let ring = &ElementType::CYCLE;
    let len = ring.len();
    match ring.iter().position(|t| *t == current) {
        Some(i) => ring[(i + len - 1) % len],
        None => ring[len - 2],
    }
}

/// 类型菜单的选项，包含 Tab 循环不到的 shot 和 text
pub fn type_menu_options() -> Vec<(ElementType, &'static str)> {
    ElementType::ALL.iter().map(|t| (*t, t.label())).collect()
}

/// 一次状态转换的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub elements: Vec<ScreenplayElement>,
    pub state: EditorState,
    /// 文档内容是否发生变化
    pub changed: bool,
}

impl Transition {
    fn unchanged(elements: &[ScreenplayElement], state: EditorState) -> Self {
        Transition {
            elements: elements.to_vec(),
            state,
            changed: false,
        }
    }

    fn changed(elements: Vec<ScreenplayElement>, state: EditorState) -> Self {
        Transition {
            elements,
            state,
            changed: true,
        }
    }
}

/// 编辑器状态机
///
/// 每个事件都是完整的纯函数转换：输入文档与状态，输出新文档与新状态。
/// 越界索引、没有激活元素等情况一律视为无操作。
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorController {
    pub read_only: bool,
}

impl EditorController {
    pub fn new(read_only: bool) -> Self {
        EditorController { read_only }
    }

    pub fn handle(
        &self,
        elements: &[ScreenplayElement],
        state: EditorState,
        event: EditorEvent,
    ) -> Transition {
        if self.read_only && event.is_mutating() {
            return Transition::unchanged(elements, state);
        }

        match event {
            EditorEvent::Focus(index) => {
                if index >= elements.len() {
                    return Transition::unchanged(elements, state);
                }
                let next = EditorState {
                    active_index: Some(index),
                    ..state
                };
                Transition::unchanged(elements, next)
            }
            EditorEvent::Blur => {
                // 类型菜单打开时保持激活
                match state.active_index {
                    Some(i) if state.is_menu_open(i) => Transition::unchanged(elements, state),
                    _ => Transition::unchanged(
                        elements,
                        EditorState {
                            active_index: None,
                            ..state
                        },
                    ),
                }
            }
            EditorEvent::Input { index, content } => {
                match document::update_content(elements, index, content) {
                    Ok(next) => Transition::changed(next, state),
                    Err(_) => Transition::unchanged(elements, state),
                }
            }
            EditorEvent::ToggleTypeMenu(index) => {
                if state.active_in(elements.len()) != Some(index) {
                    return Transition::unchanged(elements, state);
                }
                let open_menu_index = if state.is_menu_open(index) { None } else { Some(index) };
                Transition::unchanged(
                    elements,
                    EditorState {
                        open_menu_index,
                        ..state
                    },
                )
            }
            EditorEvent::SelectType { index, element_type } => {
                self.set_type(elements, state, index, element_type)
            }
            EditorEvent::AddElement => {
                let last = elements.len().saturating_sub(1);
                self.insert_after(elements, last, ElementType::Action)
                    .unwrap_or_else(|| Transition::unchanged(elements, state))
            }
            EditorEvent::Key {
                key,
                shift,
                selection_start,
            } => {
                let index = match state.active_in(elements.len()) {
                    Some(index) => index,
                    None => return Transition::unchanged(elements, state),
                };
                self.handle_key(elements, state, index, key, shift, selection_start)
            }
        }
    }

    fn handle_key(
        &self,
        elements: &[ScreenplayElement],
        state: EditorState,
        index: usize,
        key: EditorKey,
        shift: bool,
        selection_start: usize,
    ) -> Transition {
        let element = &elements[index];
        debug!(index, ?key, shift, "处理按键");

        match key {
            EditorKey::Tab => {
                let next = if shift {
                    cycle_backward(element.element_type)
                } else {
                    cycle_forward(element.element_type)
                };
                self.set_type(elements, state, index, next)
            }
            EditorKey::Enter if !shift => {
                let next = next_type_on_enter(element.element_type);
                self.insert_after(elements, index, next)
                    .unwrap_or_else(|| Transition::unchanged(elements, state))
            }
            EditorKey::Backspace if element.content.is_empty() && selection_start == 0 => {
                match document::remove_at(elements, index) {
                    Ok(next) => {
                        let state = if index > 0 {
                            EditorState::focused(index - 1, Caret::End)
                        } else {
                            EditorState::focused(0, Caret::Start)
                        };
                        Transition::changed(next, state)
                    }
                    Err(_) => Transition::unchanged(elements, state),
                }
            }
            EditorKey::ArrowUp if selection_start == 0 && index > 0 => Transition::unchanged(
                elements,
                EditorState {
                    active_index: Some(index - 1),
                    caret: Caret::End,
                    ..state
                },
            ),
            EditorKey::ArrowDown
                if selection_start == element.content.chars().count()
                    && index + 1 < elements.len() =>
            {
                Transition::unchanged(
                    elements,
                    EditorState {
                        active_index: Some(index + 1),
                        caret: Caret::Start,
                        ..state
                    },
                )
            }
            _ => Transition::unchanged(elements, state),
        }
    }

    fn set_type(
        &self,
        elements: &[ScreenplayElement],
        state: EditorState,
        index: usize,
        element_type: ElementType,
    ) -> Transition {
        match document::change_type(elements, index, element_type) {
            Ok(next) => Transition::changed(
                next,
                EditorState {
                    open_menu_index: None,
                    ..state
                },
            ),
            Err(_) => Transition::unchanged(elements, state),
        }
    }

    fn insert_after(
        &self,
        elements: &[ScreenplayElement],
        index: usize,
        element_type: ElementType,
    ) -> Option<Transition> {
        let next = document::insert_after(elements, index, document::new_element(element_type)).ok()?;
        Some(Transition::changed(
            next,
            EditorState::focused(index + 1, Caret::Start),
        ))
    }
}

/// 持有文档与状态的编辑会话，按顺序逐个处理事件
#[derive(Debug, Clone)]
pub struct EditorSession {
    elements: Vec<ScreenplayElement>,
    state: EditorState,
    controller: EditorController,
}

impl EditorSession {
    /// 空文档会补一个 action 元素作为输入锚点
    pub fn new(mut elements: Vec<ScreenplayElement>, read_only: bool) -> Self {
        if elements.is_empty() {
            elements.push(document::new_element(ElementType::Action));
        }
        EditorSession {
            elements,
            state: EditorState::new(),
            controller: EditorController::new(read_only),
        }
    }

    /// 处理事件，返回文档是否变化
    pub fn dispatch(&mut self, event: EditorEvent) -> bool {
        let transition = self.controller.handle(&self.elements, self.state, event);
        self.elements = transition.elements;
        self.state = transition.state;
        transition.changed
    }

    pub fn elements(&self) -> &[ScreenplayElement] {
        &self.elements
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn active_element(&self) -> Option<&ScreenplayElement> {
        self.state
            .active_in(self.elements.len())
            .map(|i| &self.elements[i])
    }

    /// 空元素显示的占位提示
    pub fn placeholder(&self, index: usize) -> Option<&'static str> {
        self.elements
            .get(index)
            .filter(|e| e.content.is_empty())
            .map(|e| e.element_type.placeholder())
    }

    /// 当前激活元素所在的估算页码
    pub fn active_page(&self) -> Option<usize> {
        self.state
            .active_in(self.elements.len())
            .map(document::compute_page_number)
    }

    pub fn into_elements(self) -> Vec<ScreenplayElement> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_table() {
        assert_eq!(next_type_on_enter(ElementType::SceneHeading), ElementType::Action);
        assert_eq!(next_type_on_enter(ElementType::Character), ElementType::Dialogue);
        assert_eq!(next_type_on_enter(ElementType::Dialogue), ElementType::Character);
        assert_eq!(next_type_on_enter(ElementType::Parenthetical), ElementType::Dialogue);
        assert_eq!(next_type_on_enter(ElementType::Transition), ElementType::SceneHeading);
        assert_eq!(next_type_on_enter(ElementType::Shot), ElementType::Action);
        assert_eq!(next_type_on_enter(ElementType::Text), ElementType::Action);
    }

    #[test]
    fn tab_ring_closes_after_six() {
        for start in ElementType::CYCLE {
            let mut t = start;
            for _ in 0..6 {
                t = cycle_forward(t);
            }
            assert_eq!(t, start);
            assert_eq!(cycle_backward(cycle_forward(start)), start);
        }
        assert_eq!(cycle_forward(ElementType::Transition), ElementType::SceneHeading);
        assert_eq!(cycle_backward(ElementType::SceneHeading), ElementType::Transition);
    }

    #[test]
    fn type_menu_lists_every_type() {
        let options = type_menu_options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[0], (ElementType::SceneHeading, "Scene Heading"));
        assert!(options.contains(&(ElementType::Shot, "Shot")));
        assert!(options.contains(&(ElementType::Text, "Text")));
    }

    #[test]
    fn shot_and_text_enter_the_ring() {
        assert_eq!(cycle_forward(ElementType::Shot), ElementType::SceneHeading);
        assert_eq!(cycle_backward(ElementType::Text), ElementType::Parenthetical);
        for start in ElementType::CYCLE {
            let mut t = start;
            for _ in 0..12 {
                t = cycle_forward(t);
                assert!(t != ElementType::Shot && t != ElementType::Text);
            }
        }
    }
}
