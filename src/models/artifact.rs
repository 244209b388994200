use crate::models::case_record::CaseRecord;

/// 下载内容类型
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// 渲染后可下载的文书
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl DownloadArtifact {
    pub fn new(template_id: &str, record: &CaseRecord, body: String) -> Self {
        Self {
            filename: suggested_filename(template_id, record.case_number()),
            content_type: TEXT_CONTENT_TYPE,
            body,
        }
    }
}

/// 建议的文件名：`{模板ID}-{案号}.txt`
///
/// 案号为空时使用 `documento`；路径分隔符替换为 `_`
pub fn suggested_filename(template_id: &str, case_number: &str) -> String {
    let number = case_number.trim();
    let number = if number.is_empty() { "documento" } else { number };
    let stem = format!("{}-{}", template_id, number).replace(['/', '\\'], "_");
    format!("{}.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename("dilacao-prazo", "0001234-56.2024.8.26.0100"),
            "dilacao-prazo-0001234-56.2024.8.26.0100.txt"
        );
        assert_eq!(
            suggested_filename("pesquisa-endereco", "  "),
            "pesquisa-endereco-documento.txt"
        );
        assert_eq!(suggested_filename("x", "12/2024"), "x-12_2024.txt");
    }
}
