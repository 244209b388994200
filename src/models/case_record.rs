use serde::{Deserialize, Serialize};

/// 诉讼双方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    /// 原告（Autor / Requerente）
    pub plaintiff: String,
    /// 被告（Réu / Requerido）
    pub defendant: String,
}

impl Parties {
    pub fn new(plaintiff: impl Into<String>, defendant: impl Into<String>) -> Self {
        Self {
            plaintiff: plaintiff.into(),
            defendant: defendant.into(),
        }
    }
}

/// 一个案件的结构化数据
///
/// 由提取器从上传文件中得到，或从手工录入的数据构造。
/// 创建后不可修改：字段私有，只提供只读访问。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    #[serde(alias = "number")]
    case_number: String,
    parties: Parties,
    court: String,
    /// 已格式化的展示金额，例如 `R$ 50.000,00`，不做任何计算
    #[serde(alias = "value")]
    monetary_value: String,
    subject: String,
    /// 本地化的展示日期（dd/mm/yyyy）
    #[serde(alias = "date")]
    filed_date: String,
    status: String,
}

impl CaseRecord {
    pub fn new(
        case_number: impl Into<String>,
        parties: Parties,
        court: impl Into<String>,
        monetary_value: impl Into<String>,
        subject: impl Into<String>,
        filed_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            case_number: case_number.into(),
            parties,
            court: court.into(),
            monetary_value: monetary_value.into(),
            subject: subject.into(),
            filed_date: filed_date.into(),
            status: status.into(),
        }
    }

    pub fn case_number(&self) -> &str {
        &self.case_number
    }

    pub fn parties(&self) -> &Parties {
        &self.parties
    }

    pub fn plaintiff(&self) -> &str {
        &self.parties.plaintiff
    }

    pub fn defendant(&self) -> &str {
        &self.parties.defendant
    }

    pub fn court(&self) -> &str {
        &self.court
    }

    pub fn monetary_value(&self) -> &str {
        &self.monetary_value
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn filed_date(&self) -> &str {
        &self.filed_date
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// 按模板占位符名称取值（`case.` 前缀之后的部分）
    ///
    /// 未知名称返回 `None`
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "number" => &self.case_number,
            "plaintiff" => &self.parties.plaintiff,
            "defendant" => &self.parties.defendant,
            "court" => &self.court,
            "value" => &self.monetary_value,
            "subject" => &self.subject,
            "filed_date" => &self.filed_date,
            "status" => &self.status,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// 模板中可以引用的案件字段名称（不含 `case.` 前缀）
pub const CASE_FIELDS: &[&str] = &[
    "number",
    "plaintiff",
    "defendant",
    "court",
    "value",
    "subject",
    "filed_date",
    "status",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_case_field_resolves() {
        let record = CaseRecord::new(
            "0001234-56.2024.8.26.0100",
            Parties::new("A", "B"),
            "Vara",
            "R$ 1,00",
            "Assunto",
            "01/02/2024",
            "Em andamento",
        );
        for name in CASE_FIELDS {
            assert!(record.field(name).is_some(), "字段 {} 应可解析", name);
        }
        assert_eq!(record.field("plaintiff"), Some("A"));
        assert_eq!(record.field("unknown"), None);
    }

    #[test]
    fn test_deserialize_accepts_short_field_names() {
        let toml_src = r#"
            number = "123"
            court = "2ª Vara"
            value = "R$ 10,00"
            subject = "Cobrança"
            date = "10/10/2024"
            status = "Arquivado"

            [parties]
            plaintiff = "X"
            defendant = "Y"
        "#;
        let record: CaseRecord = toml::from_str(toml_src).unwrap();
        assert_eq!(record.case_number(), "123");
        assert_eq!(record.monetary_value(), "R$ 10,00");
        assert_eq!(record.filed_date(), "10/10/2024");
        assert_eq!(record.defendant(), "Y");
    }
}
