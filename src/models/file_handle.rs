use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

/// 上传文件的媒体类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Doc,
    Docx,
    PlainText,
    /// 其他类型，保存原始扩展名
    Other(String),
}

impl MediaType {
    /// 根据文件扩展名判断类型（不区分大小写）
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "doc" => MediaType::Doc,
            "docx" => MediaType::Docx,
            "txt" => MediaType::PlainText,
            other => MediaType::Other(other.to_string()),
        }
    }

    /// 根据文件名判断类型
    pub fn from_file_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .map(Self::from_extension)
            .unwrap_or_else(|| MediaType::Other(String::new()))
    }

    pub fn mime(&self) -> &str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Doc => "application/msword",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::PlainText => "text/plain",
            MediaType::Other(_) => "application/octet-stream",
        }
    }

    /// 是否属于上传界面接受的类型（.pdf, .doc, .docx, .txt）
    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaType::Other(_))
    }

    /// 二进制格式按字节读取，其余按文本读取
    pub fn is_binary(&self) -> bool {
        matches!(self, MediaType::Pdf | MediaType::Doc | MediaType::Docx)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Other(ext) if !ext.is_empty() => write!(f, "{} (.{})", self.mime(), ext),
            _ => write!(f, "{}", self.mime()),
        }
    }
}

/// 上传的案件文件
#[derive(Debug, Clone)]
pub struct FileHandle {
    name: String,
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = MediaType::from_file_name(&name);
        Self {
            name,
            media_type,
            bytes,
        }
    }

    /// 从磁盘读取文件
    pub async fn open(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("无法读取案件文件: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 以 MB 为单位的大小，保留两位小数
    pub fn size_mb(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_file_name() {
        assert_eq!(MediaType::from_file_name("autos.PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_file_name("peticao.docx"), MediaType::Docx);
        assert_eq!(MediaType::from_file_name("notas.txt"), MediaType::PlainText);
        assert_eq!(
            MediaType::from_file_name("foto.png"),
            MediaType::Other("png".to_string())
        );
        assert!(!MediaType::from_file_name("sem_extensao").is_supported());
    }

    #[test]
    fn test_file_handle_size() {
        let file = FileHandle::new("a.txt", vec![0u8; 1024 * 1024]);
        assert_eq!(file.size_mb(), "1.00 MB");
        assert_eq!(file.media_type(), &MediaType::PlainText);
    }
}
