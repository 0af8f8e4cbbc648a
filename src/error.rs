use thiserror::Error;

/// 文档模型错误，编辑器将其视为无操作
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("元素序列不能为空")]
    InvariantViolation,

    #[error("索引越界: {index} (长度 {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX生成错误: {0}")]
    Docx(#[from] docx_rs::DocxError),

    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("无效的配置: {0}")]
    InvalidConfig(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

pub type ExportResult<T> = Result<T, ExportError>;
