use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::assistant::Assistant;

/// 用户为模板填写的附加字段（key → value），不做任何校验
pub type AdditionalFields = BTreeMap<String, String>;

/// 字段输入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// 单行文本
    Text,
    /// 多行文本
    Multiline,
    /// 数字
    Number,
}

/// 模板的单个填写字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// 未填写时使用的默认文本（目前只有 observations 使用）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl FieldSpec {
    /// 必填字段
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            default: None,
        }
    }

    /// 选填字段，缺省时替换为 `default`
    pub const fn optional(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        default: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// 文书模板描述
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub assistant: Assistant,
    pub fields: &'static [FieldSpec],
}

impl TemplateDescriptor {
    /// 按 key 查找字段
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// 必填字段列表
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// 返回 `extra` 中缺失（或仅含空白）的必填字段 key，按声明顺序
    pub fn missing_required(&self, extra: &AdditionalFields) -> Vec<&'static str> {
        self.required_fields()
            .filter(|f| extra.get(f.key).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.key)
            .collect()
    }
}
