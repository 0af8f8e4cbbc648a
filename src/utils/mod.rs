pub mod fountain_constants;

use unicode_segmentation::UnicodeSegmentation;
pub use fountain_constants::{FountainConstants, is_scene_heading_prefix};

/// 文本显示宽度（按字素簇计数）
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// 按单词折行，单个超长单词独占一行
pub fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if display_width(candidate.trim()) <= max_width {
            current = candidate.trim().to_string();
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
