use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::assistant::Assistant;
use crate::models::case_record::CaseRecord;
use crate::models::template::AdditionalFields;

/// 一个待生成的文书请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// 模板 ID
    pub template: String,
    /// 附加字段
    #[serde(default)]
    pub fields: AdditionalFields,
}

/// 一个案件任务：一个案件来源 + 若干文书请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentJob {
    pub name: String,
    #[serde(default = "default_assistant")]
    pub assistant: Assistant,
    /// 案件文件路径（相对路径相对于任务文件所在目录）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// 手工录入的案件数据，存在时不再提取文件
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseRecord>,
    /// 附加说明（写入对话记录）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentRequest>,
    #[serde(skip_serializing, skip_deserializing)]
    pub job_path: Option<PathBuf>,
}

fn default_assistant() -> Assistant {
    Assistant::Processual
}

impl DocumentJob {
    /// 案件文件的实际路径
    pub fn resolved_file(&self) -> Option<PathBuf> {
        let file = self.file.as_ref()?;
        if file.is_absolute() {
            return Some(file.clone());
        }
        match self.job_path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => Some(dir.join(file)),
            None => Some(file.clone()),
        }
    }

    pub fn with_job_path(mut self, job_path: PathBuf) -> Self {
        self.job_path = Some(job_path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_toml() {
        let src = r#"
            name = "Cobrança BB"
            assistant = "processual"
            file = "autos.pdf"

            [[documents]]
            template = "dilacao-prazo"
            [documents.fields]
            days = "15"
            reason = "excesso de prazo"
        "#;
        let job: DocumentJob = toml::from_str(src).unwrap();
        assert_eq!(job.assistant, Assistant::Processual);
        assert_eq!(job.documents.len(), 1);
        assert_eq!(job.documents[0].fields.get("days").map(String::as_str), Some("15"));
        assert!(job.case.is_none());

        let job = job.with_job_path(PathBuf::from("jobs/cobranca.toml"));
        assert_eq!(job.resolved_file(), Some(PathBuf::from("jobs/autos.pdf")));
    }
}
