use crate::document::with_scene_numbers;
use crate::models::{ElementType, Screenplay, ScreenplayElement};

/// Final Draft 段落类型
pub fn fdx_paragraph_type(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::SceneHeading => "Scene Heading",
        ElementType::Action => "Action",
        ElementType::Character => "Character",
        ElementType::Dialogue => "Dialogue",
        ElementType::Parenthetical => "Parenthetical",
        ElementType::Transition => "Transition",
        ElementType::Shot => "Shot",
        ElementType::Text => "General",
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn title_paragraph(out: &mut String, alignment: &str, kind: &str, text: &str) {
    out.push_str(&format!(
        "        <Paragraph Alignment=\"{}\" Type=\"{}\">\n          <Text>{}</Text>\n        </Paragraph>\n",
        alignment,
        kind,
        escape_xml(text)
    ));
}

fn element_to_xml(element: &ScreenplayElement) -> String {
    let kind = fdx_paragraph_type(element.element_type);
    let content = escape_xml(&element.content);

    match (element.element_type, element.scene_number) {
        (ElementType::SceneHeading, Some(number)) => format!(
            "    <Paragraph Number=\"{}\" Type=\"{}\">\n      <SceneProperties Title=\"{}\"/>\n      <Text>{}</Text>\n    </Paragraph>",
            number, kind, content, content
        ),
        _ => format!(
            "    <Paragraph Type=\"{}\">\n      <Text>{}</Text>\n    </Paragraph>",
            kind, content
        ),
    }
}

/// 将剧本转换为 Final Draft XML (.fdx)
///
/// 场景编号在导出时重新计算，忽略元素上存储的值。
pub fn to_fdx(screenplay: &Screenplay) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"5\">\n");
    out.push_str("  <Content>\n");

    // 标题页
    out.push_str("    <TitlePage>\n      <Content>\n");
    title_paragraph(&mut out, "Center", "Title", &screenplay.title);
    if !screenplay.author.is_empty() {
        title_paragraph(&mut out, "Center", "Author", "Written by");
        title_paragraph(&mut out, "Center", "Author", &screenplay.author);
    }
    if let Some(contact) = screenplay.contact.as_deref().filter(|c| !c.is_empty()) {
        title_paragraph(&mut out, "Left", "Contact", contact);
    }
    if let Some(draft) = screenplay.draft_number.as_deref().filter(|d| !d.is_empty()) {
        title_paragraph(&mut out, "Right", "Draft", draft);
    }
    out.push_str("      </Content>\n    </TitlePage>\n");

    let elements = with_scene_numbers(&screenplay.elements);
    let body: Vec<String> = elements.iter().map(element_to_xml).collect();
    out.push_str(&body.join("\n"));
    out.push('\n');
    out.push_str("  </Content>\n");

    out.push_str(concat!(
        "  <HeaderAndFooter FooterFirstPage=\"No\" FooterVisible=\"Yes\" HeaderFirstPage=\"No\" HeaderVisible=\"Yes\" StartingPage=\"1\">\n",
        "    <Header>\n      <Paragraph>\n        <Text></Text>\n      </Paragraph>\n    </Header>\n",
        "    <Footer>\n      <Paragraph>\n        <DynamicLabel Type=\"Page #\"/>\n        <Text>.</Text>\n      </Paragraph>\n    </Footer>\n",
        "  </HeaderAndFooter>\n",
        "  <SpellCheckIgnoreLists>\n    <IgnoredRanges/>\n    <IgnoredWords/>\n  </SpellCheckIgnoreLists>\n",
        "  <PageLayout BackgroundColor=\"#FFFFFFFFFFFF\" BottomMargin=\"72\" BreakDialogueAndActionAtSentences=\"Yes\" DocumentLeading=\"Normal\" FooterMargin=\"36\" ForegroundColor=\"#000000000000\" HeaderMargin=\"36\" InvisiblesColor=\"#A0A0A0A0A0A0\" LeftMargin=\"108\" PageHeight=\"792\" PageWidth=\"612\" RightMargin=\"72\" TopMargin=\"72\" UsesSmartQuotes=\"Yes\"/>\n",
        "  <WindowState Height=\"768\" Left=\"100\" Mode=\"Normal\" Top=\"100\" Width=\"1024\"/>\n",
        "  <TextState Scaling=\"100\" Selection=\"0,0\"/>\n",
        "</FinalDraft>"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_headings_carry_recomputed_numbers() {
        let mut heading = ScreenplayElement::new("a", ElementType::SceneHeading, "INT. A & B");
        heading.scene_number = Some(7);
        let sp = Screenplay::from_generated(
            "p",
            "Tom's <Film>",
            "Jo",
            vec![
                heading,
                ScreenplayElement::new("b", ElementType::Action, "Go."),
                ScreenplayElement::new("c", ElementType::SceneHeading, "EXT. B"),
                ScreenplayElement::new("d", ElementType::Text, "note"),
            ],
        );
        let xml = to_fdx(&sp);
        assert!(xml.contains("<Text>Tom&apos;s &lt;Film&gt;</Text>"));
        assert!(xml.contains("<Paragraph Number=\"1\" Type=\"Scene Heading\">"));
        assert!(xml.contains("<SceneProperties Title=\"INT. A &amp; B\"/>"));
        assert!(xml.contains("<Paragraph Number=\"2\" Type=\"Scene Heading\">"));
        assert!(!xml.contains("Number=\"7\""));
        assert!(xml.contains("<Paragraph Type=\"General\">"));
        assert!(xml.contains("<Text>Written by</Text>"));
        assert!(xml.ends_with("</FinalDraft>"));
    }

    #[test]
    fn optional_title_fields_omitted() {
        let sp = Screenplay::from_generated("p", "X", "", vec![]);
        let xml = to_fdx(&sp);
        assert!(!xml.contains("Written by"));
        assert!(!xml.contains("Type=\"Contact\""));
        assert!(!xml.contains("Type=\"Draft\""));
    }
}
