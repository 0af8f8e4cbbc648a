use crate::models::element::wrap_parens;
use crate::models::{ElementType, Screenplay, ScreenplayElement};
use crate::utils::{is_scene_heading_prefix, FountainConstants};

/// 将剧本转换为 Fountain 文本
///
/// 类型变化时插入空行；对白块内部（角色名、括号注释、对白之间）不插入空行，
/// 否则重新解析时对白无法识别。内容为空的元素整体跳过。
pub fn to_fountain(screenplay: &Screenplay) -> String {
    let mut lines: Vec<String> = Vec::new();

    // 标题页
    let keys = FountainConstants::title_keys();
    lines.push(format!("{}: {}", keys["title"], screenplay.title));
    if !screenplay.author.is_empty() {
        lines.push(format!("{}: {}", keys["author"], screenplay.author));
    }
    let optional = [
        ("draft", &screenplay.draft_number),
        ("date", &screenplay.date),
        ("contact", &screenplay.contact),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("{}: {}", keys[key], value));
        }
    }

    lines.push(String::new());
    lines.push("===".to_string());
    lines.push(String::new());

    let mut last_type: Option<ElementType> = None;
    for element in &screenplay.elements {
        let formatted = match format_element(element) {
            Some(formatted) => formatted,
            None => continue,
        };
        if let Some(prev) = last_type {
            if needs_blank_line(prev, element.element_type) {
                lines.push(String::new());
            }
        }
        lines.push(formatted);
        last_type = Some(element.element_type);
    }

    lines.join("\n")
}

fn needs_blank_line(prev: ElementType, current: ElementType) -> bool {
    if prev == current {
        return false;
    }
    !(prev.is_in_dialogue_block()
        && matches!(current, ElementType::Parenthetical | ElementType::Dialogue))
}

/// 按类型格式化单个元素，空内容返回 None
pub fn format_element(element: &ScreenplayElement) -> Option<String> {
    let content = element.content.trim();
    if content.is_empty() {
        return None;
    }

    let formatted = match element.element_type {
        ElementType::SceneHeading => {
            let upper = content.to_uppercase();
            if is_scene_heading_prefix(content) || upper.starts_with('.') {
                upper
            } else {
                format!(".{}", upper)
            }
        }
        ElementType::Character => {
            let upper = content.to_uppercase();
            if upper.starts_with('@') {
                upper
            } else {
                format!("@{}", upper)
            }
        }
        ElementType::Parenthetical => wrap_parens(content),
        ElementType::Transition => {
            let upper = content.to_uppercase();
            if upper.ends_with("TO:") || upper.starts_with('>') {
                upper
            } else {
                format!("> {}", upper)
            }
        }
        ElementType::Shot => content.to_uppercase(),
        ElementType::Action | ElementType::Dialogue | ElementType::Text => content.to_string(),
    };
    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::from_fountain;

    fn screenplay(elements: Vec<(ElementType, &str)>) -> Screenplay {
        let elements = elements
            .into_iter()
            .map(|(t, c)| ScreenplayElement::new("", t, c))
            .collect();
        Screenplay::from_generated("p", "X", "", elements)
    }

    #[test]
    fn exact_line_sequence() {
        let sp = screenplay(vec![
            (ElementType::SceneHeading, "INT. ROOM - DAY"),
            (ElementType::Character, "BOB"),
            (ElementType::Dialogue, "Hi."),
        ]);
        let out = to_fountain(&sp);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(
            lines,
            vec!["Title: X", "", "===", "", "INT. ROOM - DAY", "", "@BOB", "Hi."]
        );
    }

    #[test]
    fn title_page_fields_only_when_present() {
        let mut sp = screenplay(vec![(ElementType::Action, "x")]);
        sp.author = "Jo".to_string();
        sp.draft_number = Some("3".to_string());
        sp.contact = Some(String::new());
        let out = to_fountain(&sp);
        assert!(out.starts_with("Title: X\nAuthor: Jo\nDraft: 3\n\n===\n\nx"));
        assert!(!out.contains("Contact"));
        assert!(!out.contains("Date"));
    }

    #[test]
    fn forcing_prefixes_are_not_doubled() {
        let el = |t, c: &str| ScreenplayElement::new("", t, c);
        assert_eq!(format_element(&el(ElementType::SceneHeading, "int. a")).unwrap(), "INT. A");
        assert_eq!(format_element(&el(ElementType::SceneHeading, "kitchen")).unwrap(), ".KITCHEN");
        assert_eq!(format_element(&el(ElementType::SceneHeading, ".kitchen")).unwrap(), ".KITCHEN");
        assert_eq!(format_element(&el(ElementType::Character, "@bob")).unwrap(), "@BOB");
        assert_eq!(format_element(&el(ElementType::Transition, "cut to:")).unwrap(), "CUT TO:");
        assert_eq!(format_element(&el(ElementType::Transition, "fade out")).unwrap(), "> FADE OUT");
        assert_eq!(format_element(&el(ElementType::Transition, "> fade out")).unwrap(), "> FADE OUT");
        assert_eq!(format_element(&el(ElementType::Parenthetical, "(beat)")).unwrap(), "(beat)");
        assert_eq!(format_element(&el(ElementType::Parenthetical, "beat")).unwrap(), "(beat)");
        assert_eq!(format_element(&el(ElementType::Shot, "angle on")).unwrap(), "ANGLE ON");
        assert!(format_element(&el(ElementType::Action, "   ")).is_none());
    }

    #[test]
    fn empty_elements_are_skipped_entirely() {
        let sp = screenplay(vec![
            (ElementType::Action, "One."),
            (ElementType::SceneHeading, "  "),
            (ElementType::Action, "Two."),
        ]);
        assert!(to_fountain(&sp).ends_with("===\n\nOne.\nTwo."));
    }

    #[test]
    fn round_trip_unambiguous_script() {
        let source = vec![
            (ElementType::SceneHeading, "INT. ROOM - DAY"),
            (ElementType::Action, "She enters, soaked."),
            (ElementType::Character, "BOB"),
            (ElementType::Parenthetical, "(quietly)"),
            (ElementType::Dialogue, "You came back."),
            (ElementType::Character, "ANN"),
            (ElementType::Dialogue, "I never left."),
            (ElementType::Transition, "CUT TO:"),
            (ElementType::SceneHeading, "EXT. PARK - NIGHT"),
            (ElementType::Action, "Rain."),
        ];
        let sp = screenplay(source.clone());
        let parsed = from_fountain(&to_fountain(&sp));
        let got: Vec<(ElementType, &str)> = parsed
            .elements
            .iter()
            .map(|e| (e.element_type, e.content.as_str()))
            .collect();
        assert_eq!(got, source);
        assert_eq!(parsed.title, "X");
    }
}
