pub mod models;
pub mod utils;
pub mod error;
pub mod document;
pub mod parser;
pub mod writer;
pub mod pdf;
pub mod docx;
pub mod editor;
pub mod api;

pub use models::{
    Alignment,
    CastMember,
    CastRole,
    Conf,
    ElementLayout,
    ElementType,
    PartialScreenplay,
    Screenplay,
    ScreenplayElement,
    SimpleConf
};

pub use error::{DocumentError, ExportError};

pub use parser::{
    FountainParser,
    from_fountain
};

pub use writer::{
    to_fountain,
    to_fdx,
    to_rtf
};

pub use pdf::to_screenplay_text;

pub use docx::{
    generate_docx,
    generate_docx_base64
};

pub use editor::{
    Caret,
    EditorController,
    EditorEvent,
    EditorKey,
    EditorSession,
    EditorState
};

pub use api::{
    ExportBody,
    ExportFormat,
    ExportedFile,
    export_screenplay,
    export_to_file,
    export_to_docx_base64,
    import_fountain_text,
    safe_file_stem
};

/// 解析 Fountain 格式文本
///
/// # Arguments
///
/// * `script` - Fountain 格式的剧本文本
///
/// # Returns
///
/// 部分剧本：标题页字段与正文元素
pub fn parse(script: &str) -> PartialScreenplay {
    let mut parser = FountainParser::new();
    parser.parse(script)
}
