use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document;
use crate::models::conf::Conf;
use crate::models::element::{ElementType, ScreenplayElement};

/// 剧本文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenplay {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub elements: Vec<ScreenplayElement>,
    /// 估算页数：ceil(元素数 / 55)
    #[serde(default)]
    pub page_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Screenplay {
    /// 由生成结果创建剧本，所有元素重新分配 id
    pub fn from_generated(
        project_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        elements: Vec<ScreenplayElement>,
    ) -> Self {
        let now = Utc::now();
        let elements = document::assign_fresh_ids(elements);
        let page_count = document::page_count(elements.len());
        Screenplay {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            title: title.into(),
            author: author.into(),
            contact: None,
            draft_number: None,
            date: None,
            elements,
            page_count,
            created_at: now,
            updated_at: now,
        }
    }

    /// 刷新更新时间和页数
    pub fn touch(&mut self) {
        self.page_count = document::page_count(self.elements.len());
        self.updated_at = Utc::now();
    }

    /// 按配置的每页元素数估算页数
    pub fn page_count_for(&self, config: &Conf) -> usize {
        document::page_count_with(self.elements.len(), config.lines_per_page)
    }

    /// 整体替换元素（保存时的覆盖语义）
    pub fn replace_elements(&mut self, elements: Vec<ScreenplayElement>) {
        self.elements = elements;
        self.touch();
    }

    /// 为载入的文档补全缺失 id，并保证至少有一个元素
    pub fn ensure_element_ids(&mut self) {
        for element in self.elements.iter_mut() {
            if element.id.is_empty() {
                element.id = Uuid::new_v4().to_string();
            }
        }
        if self.elements.is_empty() {
            self.elements.push(document::new_element(ElementType::Action));
        }
    }

    pub fn scene_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.element_type == ElementType::SceneHeading)
            .count()
    }
}

/// Fountain 解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialScreenplay {
    pub title: String,
    pub author: Option<String>,
    pub contact: Option<String>,
    pub draft_number: Option<String>,
    pub date: Option<String>,
    pub elements: Vec<ScreenplayElement>,
}

impl Default for PartialScreenplay {
    fn default() -> Self {
        PartialScreenplay {
            title: "Untitled".to_string(),
            author: None,
            contact: None,
            draft_number: None,
            date: None,
            elements: Vec::new(),
        }
    }
}

impl PartialScreenplay {
    /// 提升为完整剧本（导入路径）
    pub fn into_screenplay(self, project_id: impl Into<String>) -> Screenplay {
        let mut screenplay = Screenplay::from_generated(
            project_id,
            self.title,
            self.author.unwrap_or_default(),
            self.elements,
        );
        screenplay.contact = self.contact;
        screenplay.draft_number = self.draft_number;
        screenplay.date = self.date;
        screenplay.ensure_element_ids();
        screenplay.touch();
        screenplay
    }
}
