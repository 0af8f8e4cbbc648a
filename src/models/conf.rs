use serde::{Deserialize, Serialize};

use crate::error::ExportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 每页估算行数（元素数）
    pub lines_per_page: usize,
    /// 页面宽度 //英寸
    pub page_width: f32,
    /// 页面高度 //英寸
    pub page_height: f32,
    /// 左边距 //英寸
    pub left_margin: f32,
    /// 右边距 //英寸
    pub right_margin: f32,
    /// 纯文本排版每英寸字符数
    pub chars_per_inch: usize,
    /// 对白折行宽度
    pub dialogue_wrap: usize,
    /// 转场右对齐的列
    pub transition_column: usize,
    /// 作者缺省时的署名
    pub default_author: String,
    /// 字体名称
    pub font_family: String,
    /// 字体大小 //磅
    pub font_size: usize,
    /// 是否打印标题页
    pub print_title_page: bool,
    /// 纯文本中是否打印场景编号
    pub print_scene_numbers: bool,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            lines_per_page: 55,
            page_width: 8.5,
            page_height: 11.0,
            left_margin: 1.5,
            right_margin: 1.0,
            chars_per_inch: 10,
            dialogue_wrap: 35,
            transition_column: 60,
            default_author: "Anonymous".to_string(),
            font_family: "Courier Prime".to_string(),
            font_size: 12,
            print_title_page: true,
            print_scene_numbers: true,
        }
    }
}

impl Conf {
    /// 从 JSON 读取配置，缺省字段取默认值
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let conf: Conf = serde_json::from_str(json)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.lines_per_page == 0 {
            return Err(ExportError::InvalidConfig("lines_per_page 必须大于 0".to_string()));
        }
        if self.dialogue_wrap == 0 {
            return Err(ExportError::InvalidConfig("dialogue_wrap 必须大于 0".to_string()));
        }
        if self.page_width <= self.left_margin + self.right_margin {
            return Err(ExportError::InvalidConfig("页边距超过页面宽度".to_string()));
        }
        Ok(())
    }

    /// 纯文本排版的正文宽度（字符数）
    pub fn text_width(&self) -> usize {
        ((self.page_width - self.left_margin - self.right_margin) * self.chars_per_inch as f32)
            .floor() as usize
    }

    pub fn page_width_twips(&self) -> u32 {
        (self.page_width * 1440.0).round() as u32
    }

    pub fn page_height_twips(&self) -> u32 {
        (self.page_height * 1440.0).round() as u32
    }
}

/// 简化的配置结构，供调用方传入
#[derive(Debug, Clone)]
pub struct SimpleConf {
    pub print_title_page: bool,
    pub print_scene_numbers: bool,
    pub paper_size: String,
    pub default_author: String,
}

impl Default for SimpleConf {
    fn default() -> Self {
        Self {
            print_title_page: true,
            print_scene_numbers: true,
            paper_size: "letter".to_string(),
            default_author: "Anonymous".to_string(),
        }
    }
}

impl From<SimpleConf> for Conf {
    fn from(simple: SimpleConf) -> Self {
        let mut conf = Conf::default();
        conf.print_title_page = simple.print_title_page;
        conf.print_scene_numbers = simple.print_scene_numbers;
        conf.default_author = simple.default_author;

        // 根据纸张名称设置页面尺寸
        match simple.paper_size.to_lowercase().as_str() {
            "a4" => {
                conf.page_width = 8.27;
                conf.page_height = 11.69;
            }
            _ => {
                conf.page_width = 8.5;
                conf.page_height = 11.0;
            }
        }
        conf
    }
}
