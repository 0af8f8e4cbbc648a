//! 剧本元素序列的纯函数操作
//!
//! 所有操作返回新的序列，不修改输入。序列长度永远不会降到 0。

use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::error::{DocumentError, DocumentResult};
use crate::models::{ElementType, ScreenplayElement};

/// 每页估算的元素数
pub const LINES_PER_PAGE: usize = 55;

/// 创建一个带新 id 的空元素
pub fn new_element(element_type: ElementType) -> ScreenplayElement {
    ScreenplayElement::new(Uuid::new_v4().to_string(), element_type, "")
}

/// 在 index 之后插入元素
pub fn insert_after(
    elements: &[ScreenplayElement],
    index: usize,
    new_element: ScreenplayElement,
) -> DocumentResult<Vec<ScreenplayElement>> {
    if index >= elements.len() {
        return Err(DocumentError::IndexOutOfRange { index, len: elements.len() });
    }
    let mut out = Vec::with_capacity(elements.len() + 1);
    out.extend_from_slice(&elements[..=index]);
    out.push(new_element);
    out.extend_from_slice(&elements[index + 1..]);
    Ok(out)
}

/// 删除 index 处的元素，最后一个元素不可删除
pub fn remove_at(elements: &[ScreenplayElement], index: usize) -> DocumentResult<Vec<ScreenplayElement>> {
    if index >= elements.len() {
        return Err(DocumentError::IndexOutOfRange { index, len: elements.len() });
    }
    if elements.len() <= 1 {
        warn!(index, "拒绝删除唯一的元素");
        return Err(DocumentError::InvariantViolation);
    }
    let mut out = elements.to_vec();
    out.remove(index);
    Ok(out)
}

pub fn update_content(
    elements: &[ScreenplayElement],
    index: usize,
    content: impl Into<String>,
) -> DocumentResult<Vec<ScreenplayElement>> {
    let mut out = elements.to_vec();
    let len = out.len();
    let element = out
        .get_mut(index)
        .ok_or(DocumentError::IndexOutOfRange { index, len })?;
    element.content = content.into();
    Ok(out)
}

pub fn change_type(
    elements: &[ScreenplayElement],
    index: usize,
    element_type: ElementType,
) -> DocumentResult<Vec<ScreenplayElement>> {
    let mut out = elements.to_vec();
    let len = out.len();
    let element = out
        .get_mut(index)
        .ok_or(DocumentError::IndexOutOfRange { index, len })?;
    element.element_type = element_type;
    Ok(out)
}

/// 场景标题按文档顺序从 1 编号，返回 id -> 编号
pub fn renumber_scenes(elements: &[ScreenplayElement]) -> HashMap<String, usize> {
    elements
        .iter()
        .filter(|e| e.element_type == ElementType::SceneHeading)
        .enumerate()
        .map(|(i, e)| (e.id.clone(), i + 1))
        .collect()
}

/// 返回带有重新计算的场景编号的副本，非场景标题的编号被清除
///
/// 按位置计数而不是按 id 查表，id 重复的文档也能得到正确编号。
pub fn with_scene_numbers(elements: &[ScreenplayElement]) -> Vec<ScreenplayElement> {
    let mut scene = 0;
    elements
        .iter()
        .map(|e| {
            let mut e = e.clone();
            if e.element_type == ElementType::SceneHeading {
                scene += 1;
                e.scene_number = Some(scene);
            } else {
                e.scene_number = None;
            }
            e
        })
        .collect()
}

/// 估算页码，仅为近似值
pub fn compute_page_number(index: usize) -> usize {
    page_number_with(index, LINES_PER_PAGE)
}

pub fn page_number_with(index: usize, lines_per_page: usize) -> usize {
    index / lines_per_page.max(1) + 1
}

/// 估算页数
pub fn page_count(len: usize) -> usize {
    page_count_with(len, LINES_PER_PAGE)
}

pub fn page_count_with(len: usize, lines_per_page: usize) -> usize {
    len.div_ceil(lines_per_page.max(1))
}

/// 新页开始处的元素索引
pub fn page_breaks(len: usize) -> Vec<usize> {
    page_breaks_with(len, LINES_PER_PAGE)
}

pub fn page_breaks_with(len: usize, lines_per_page: usize) -> Vec<usize> {
    (1..len)
        .filter(|&i| page_number_with(i - 1, lines_per_page) < page_number_with(i, lines_per_page))
        .collect()
}

/// 所有元素重新分配 id
pub fn assign_fresh_ids(elements: Vec<ScreenplayElement>) -> Vec<ScreenplayElement> {
    elements
        .into_iter()
        .map(|mut e| {
            e.id = Uuid::new_v4().to_string();
            e
        })
        .collect()
}
