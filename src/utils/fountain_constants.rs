use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

/// 标题页结束标记
pub const TITLE_PAGE_TERMINATORS: [&str; 2] = ["===", "---"];

/// 标题页中的键名
pub struct FountainConstants;

impl FountainConstants {
    // 标题页键名映射（小写键 -> 输出键名）
    pub fn title_keys() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.insert("title", "Title");
        map.insert("author", "Author");
        map.insert("draft", "Draft");
        map.insert("date", "Date");
        map.insert("contact", "Contact");
        map
    }
}

lazy_static! {
    // 行分类正则
    pub static ref LINE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("scene_heading", Regex::new(r"(?i)^(INT|EXT|EST|INT\./EXT|I/E)").unwrap());
        map.insert("character_caps", Regex::new(r"^[A-Z][A-Z\s\d]+$").unwrap());
        map.insert("uppercase_line", Regex::new(r"^[A-Z][A-Z\s]+$").unwrap());
        map.insert("title_page", Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").unwrap());
        map.insert("file_stem_unsafe", Regex::new(r"[^A-Za-z0-9]").unwrap());
        map
    };
}

/// 是否以场景标题前缀开头（不区分大小写）
pub fn is_scene_heading_prefix(line: &str) -> bool {
    LINE_REGEX["scene_heading"].is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_prefixes() {
        for line in ["INT. HOUSE - DAY", "ext. park", "EST. CITY", "INT./EXT. CAR", "I/E TRUCK"] {
            assert!(is_scene_heading_prefix(line), "{}", line);
        }
        assert!(!is_scene_heading_prefix("KITCHEN - LATER"));
    }

    #[test]
    fn caps_patterns() {
        assert!(LINE_REGEX["character_caps"].is_match("BOB 2"));
        assert!(!LINE_REGEX["character_caps"].is_match("B"));
        assert!(!LINE_REGEX["uppercase_line"].is_match("BOB 2"));
        assert!(!LINE_REGEX["character_caps"].is_match("Bob"));
    }
}
