pub mod docx_maker;

pub use docx_maker::{
    docx_sections, docx_style, generate_docx, generate_docx_base64, DocxSection, SectionKind,
};
