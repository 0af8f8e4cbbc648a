use screenplay_forge::api::{
    export_screenplay, export_to_docx_base64, export_to_file, import_fountain_text, ExportBody,
    ExportFormat,
};
use screenplay_forge::models::{Conf, Screenplay, SimpleConf};
use std::fs;
use std::path::Path;

fn fixture_screenplay() -> Screenplay {
    let script_path = Path::new("tests/test_data/night_shift.fountain");
    let script = fs::read_to_string(script_path).expect("无法读取测试文件");
    import_fountain_text(&script).into_screenplay("project-1")
}

#[test]
fn test_import_assigns_fresh_ids_and_page_count() {
    let screenplay = fixture_screenplay();
    assert_eq!(screenplay.project_id, "project-1");
    assert_eq!(screenplay.elements.len(), 10);
    assert_eq!(screenplay.page_count, 1);
    assert!(
        screenplay.elements.iter().all(|e| !e.id.starts_with("elem_")),
        "导入后应重新分配 id"
    );
}

#[test]
fn test_every_format_exports() {
    let screenplay = fixture_screenplay();
    let conf = Conf::default();

    for (format, content_type) in [
        (ExportFormat::Fountain, "text/plain"),
        (ExportFormat::Fdx, "application/xml"),
        (ExportFormat::Rtf, "application/rtf"),
        (ExportFormat::Text, "text/plain"),
    ] {
        let file = export_screenplay(&screenplay, format, &conf).expect("导出应该成功");
        assert_eq!(file.content_type, content_type);
        assert_eq!(file.filename, format!("night_shift.{}", format.extension()));
        assert!(matches!(file.body, ExportBody::Text(_)), "{} 应为文本", format);
    }
}

#[test]
fn test_fountain_export_content() {
    let file = export_screenplay(&fixture_screenplay(), ExportFormat::Fountain, &Conf::default())
        .expect("导出应该成功");
    let text = file.body.as_text().expect("应为文本");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Title: Night Shift");
    assert!(lines.contains(&"==="));
    assert!(lines.contains(&".KITCHEN — LATER"));
    assert!(lines.contains(&"SMASH CUT TO:"));

    let maggie = lines.iter().position(|l| *l == "@MAGGIE").expect("缺少角色名");
    assert_eq!(lines[maggie + 1], "(wiping the counter)");
    assert_eq!(lines[maggie + 2], "We're closed.");
}

#[test]
fn test_fdx_and_text_number_scenes() {
    let screenplay = fixture_screenplay();
    let conf = Conf::default();

    let fdx = export_screenplay(&screenplay, ExportFormat::Fdx, &conf).expect("导出应该成功");
    let fdx = fdx.body.as_text().expect("应为文本").to_string();
    assert!(fdx.contains("<Paragraph Number=\"1\" Type=\"Scene Heading\">"));
    assert!(fdx.contains("<Paragraph Number=\"3\" Type=\"Scene Heading\">"));
    assert!(fdx.contains("<Text>Ann Lee</Text>"));

    let txt = export_screenplay(&screenplay, ExportFormat::Text, &conf).expect("导出应该成功");
    let txt = txt.body.as_text().expect("应为文本").to_string();
    assert!(txt.contains("1. INT. DINER - NIGHT"));
    assert!(txt.contains("2. KITCHEN — LATER"));
}

#[test]
fn test_rtf_has_page_break_after_title() {
    let file = export_screenplay(&fixture_screenplay(), ExportFormat::Rtf, &Conf::default())
        .expect("导出应该成功");
    let rtf = file.body.as_text().expect("应为文本");
    assert!(rtf.starts_with("{\\rtf1"));
    let page = rtf.find("\\page").expect("缺少分页");
    assert!(page < rtf.find("INT. DINER - NIGHT").expect("缺少场景标题"));
    assert!(rtf.contains("KITCHEN \\u8212? LATER"), "非 ASCII 字符应转义");
    assert!(rtf.is_ascii());
    assert!(rtf.ends_with('}'));
}

#[tokio::test]
async fn test_docx_export_to_file() {
    let screenplay = fixture_screenplay();

    let output_dir = std::env::temp_dir().join(format!("screenplay_forge_{}", screenplay.id));
    let path = export_to_file(&screenplay, ExportFormat::Docx, &output_dir, None)
        .await
        .expect("DOCX 导出应该成功");

    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("night_shift.docx"));
    let bytes = fs::read(&path).expect("导出的 DOCX 文件应该存在");
    assert!(bytes.len() > 0, "DOCX 文件不应为空");
    assert_eq!(&bytes[..2], b"PK");

    let _ = fs::remove_dir_all(&output_dir);
}

#[tokio::test]
async fn test_docx_base64_with_a4_paper() {
    let screenplay = fixture_screenplay();
    let simple = SimpleConf {
        paper_size: "a4".to_string(),
        ..SimpleConf::default()
    };
    let encoded = export_to_docx_base64(&screenplay, Some(simple))
        .await
        .expect("Base64 编码生成成功");
    assert!(encoded.starts_with("UEs"), "Base64 内容应为 zip 包");
}
