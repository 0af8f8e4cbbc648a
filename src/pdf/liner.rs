use crate::document::{page_breaks_with, with_scene_numbers};
use crate::models::{Alignment, Conf, ElementType, Screenplay, ScreenplayElement};
use crate::utils::{display_width, wrap_words};

/// 纯文本排版器，用等宽列模拟剧本页边距
pub struct Liner<'a> {
    config: &'a Conf,
}

impl<'a> Liner<'a> {
    /// 创建新的排版器
    pub fn new(config: &'a Conf) -> Self {
        Self { config }
    }

    /// 居中
    pub fn center(&self, text: &str) -> String {
        let padding = self.config.text_width().saturating_sub(display_width(text)) / 2;
        format!("{}{}", " ".repeat(padding), text)
    }

    /// 右对齐到指定列
    pub fn pad_left(&self, text: &str, total_width: usize) -> String {
        let padding = total_width.saturating_sub(display_width(text));
        format!("{}{}", " ".repeat(padding), text)
    }

    /// 标题页行
    pub fn title_page(&self, screenplay: &Screenplay) -> Vec<String> {
        let mut lines = vec![String::new(); 8];
        lines.push(self.center(&screenplay.title.to_uppercase()));
        lines.push(String::new());
        lines.push(String::new());
        lines.push(self.center("Written by"));
        lines.push(String::new());
        let author = if screenplay.author.is_empty() {
            &self.config.default_author
        } else {
            &screenplay.author
        };
        lines.push(self.center(author));

        if let Some(draft) = screenplay.draft_number.as_deref().filter(|d| !d.is_empty()) {
            lines.push(String::new());
            lines.push(String::new());
            lines.push(self.center(draft));
        }

        // 联系方式放在左下
        if let Some(contact) = screenplay.contact.as_deref().filter(|c| !c.is_empty()) {
            lines.extend(std::iter::repeat(String::new()).take(7));
            lines.push(contact.to_string());
        }
        lines
    }

    /// 排版单个元素，多行结果以换行连接
    pub fn format_element(&self, element: &ScreenplayElement) -> String {
        let layout = element.element_type.layout();
        let text = element.element_type.apply_case(&element.content);

        if element.element_type == ElementType::SceneHeading {
            return match element.scene_number {
                Some(n) if self.config.print_scene_numbers => format!("{}. {}", n, text),
                _ => text,
            };
        }

        if layout.alignment == Alignment::Right {
            return self.pad_left(&text, self.config.transition_column);
        }

        let indent = " ".repeat(layout.column);
        let max_width = match element.element_type {
            ElementType::Dialogue => Some(self.config.dialogue_wrap),
            _ => layout.max_width,
        };
        // 元素内的换行各自缩进、各自折行
        text.split('\n')
            .flat_map(|line| match max_width {
                Some(width) => {
                    let wrapped = wrap_words(line, width);
                    if wrapped.is_empty() {
                        vec![String::new()]
                    } else {
                        wrapped
                    }
                }
                None => vec![line.to_string()],
            })
            .map(|line| format!("{}{}", indent, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 生成全部行，标题页后以换页符分隔
    pub fn lines(&self, screenplay: &Screenplay) -> Vec<String> {
        let mut lines = Vec::new();
        if self.config.print_title_page {
            lines.extend(self.title_page(screenplay));
            lines.push("\u{c}".to_string());
        }

        let breaks = page_breaks_with(screenplay.elements.len(), self.config.lines_per_page);
        for (i, element) in with_scene_numbers(&screenplay.elements).iter().enumerate() {
            if breaks.contains(&i) {
                lines.push("\u{c}".to_string());
            }
            lines.push(String::new());
            lines.push(self.format_element(element));
        }
        lines
    }
}

/// 纯文本剧本（"pdf" 导出的文本形式）
pub fn to_screenplay_text(screenplay: &Screenplay, config: &Conf) -> String {
    Liner::new(config).lines(screenplay).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(t: ElementType, c: &str) -> ScreenplayElement {
        ScreenplayElement::new("x", t, c)
    }

    #[test]
    fn column_layout() {
        let conf = Conf::default();
        let liner = Liner::new(&conf);
        assert_eq!(liner.format_element(&el(ElementType::Character, "bob")), format!("{}BOB", " ".repeat(22)));
        assert_eq!(liner.format_element(&el(ElementType::Parenthetical, "beat")), format!("{}(beat)", " ".repeat(16)));
        assert_eq!(liner.format_element(&el(ElementType::Transition, "cut to:")), format!("{}CUT TO:", " ".repeat(53)));
        assert_eq!(liner.format_element(&el(ElementType::Action, "He runs.")), "He runs.");
    }

    #[test]
    fn dialogue_wraps_at_35() {
        let conf = Conf::default();
        let liner = Liner::new(&conf);
        let text = "I have been waiting here for a very long time and I am not leaving now.";
        let out = liner.format_element(&el(ElementType::Dialogue, text));
        for line in out.split('\n') {
            assert!(line.starts_with(&" ".repeat(10)));
            assert!(display_width(line.trim_start()) <= 35);
        }
        assert!(out.split('\n').count() > 1);
    }

    #[test]
    fn scene_numbers_and_title_page() {
        let conf = Conf::default();
        let sp = Screenplay::from_generated(
            "p",
            "dawn",
            "",
            vec![
                el(ElementType::SceneHeading, "int. a"),
                el(ElementType::Action, "x"),
                el(ElementType::SceneHeading, "ext. b"),
            ],
        );
        let text = to_screenplay_text(&sp, &conf);
        assert!(text.contains("1. INT. A"));
        assert!(text.contains("2. EXT. B"));
        assert!(text.contains(&format!("{}DAWN", " ".repeat(28))));
        assert!(text.contains("Anonymous"));
        let ff = text.find('\u{c}').unwrap();
        assert!(ff < text.find("1. INT. A").unwrap());
    }

    #[test]
    fn embedded_newlines_keep_the_column() {
        let conf = Conf::default();
        let liner = Liner::new(&conf);
        let out = liner.format_element(&el(ElementType::Dialogue, "First line.\nSecond line."));
        assert_eq!(
            out,
            format!("{0}First line.\n{0}Second line.", " ".repeat(10))
        );
        let out = liner.format_element(&el(ElementType::Character, "bob\nann"));
        assert_eq!(out, format!("{0}BOB\n{0}ANN", " ".repeat(22)));
    }

    #[test]
    fn body_page_breaks_follow_lines_per_page() {
        let conf = Conf {
            lines_per_page: 2,
            print_title_page: false,
            ..Conf::default()
        };
        let elements = (0..5).map(|i| el(ElementType::Action, &format!("line {}", i))).collect();
        let sp = Screenplay::from_generated("p", "T", "", elements);
        let text = to_screenplay_text(&sp, &conf);
        assert_eq!(text.matches('\u{c}').count(), 2);
        let ff = text.find('\u{c}').unwrap();
        assert!(text.find("line 1").unwrap() < ff);
        assert!(ff < text.find("line 2").unwrap());
    }
}
