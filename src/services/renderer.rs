//! 模板渲染服务 - 业务能力层
//!
//! 只负责"模板 ID + 案件数据 + 附加字段 → 文书文本"，纯函数，无副作用

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::catalog::{self, NOT_FOUND_SENTINEL};
use crate::error::TemplateError;
use crate::models::case_record::{CaseRecord, CASE_FIELDS};
use crate::models::template::{AdditionalFields, TemplateDescriptor};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("占位符正则表达式无效")
});

const CASE_PREFIX: &str = "case.";

/// 模板渲染服务
///
/// 职责：
/// - 按 ID 精确选择模板正文
/// - 一次性替换占位符（替换结果不会被再次解析）
/// - 必填字段校验（可关闭）
pub struct TemplateRenderer {
    enforce_required: bool,
}

impl TemplateRenderer {
    /// `enforce_required` 为 true 时缺少必填字段会返回错误，
    /// 否则替换为空文本并记录警告
    pub fn new(enforce_required: bool) -> Self {
        Self { enforce_required }
    }

    /// 渲染文书
    ///
    /// # 错误
    /// - `UnknownTemplate`: 模板 ID 不存在
    /// - `MissingRequiredField`: 必填字段缺失或为空（仅在启用校验时）
    pub fn render(
        &self,
        template_id: &str,
        record: &CaseRecord,
        extra: &AdditionalFields,
    ) -> Result<String, TemplateError> {
        let (descriptor, body) = lookup(template_id)?;

        let missing = descriptor.missing_required(extra);
        if let Some(key) = missing.first() {
            if self.enforce_required {
                return Err(TemplateError::MissingRequiredField {
                    template_id: template_id.to_string(),
                    key: key.to_string(),
                });
            }
            warn!(
                "模板 {} 缺少必填字段 {:?}，将以空文本替换",
                template_id, missing
            );
        }

        debug!("渲染模板 {} (案号: {})", template_id, record.case_number());
        Ok(substitute(body, descriptor, record, extra))
    }

    /// 旧接口：未知模板返回固定文本 "Modelo não encontrado"，不校验必填字段
    pub fn render_or_sentinel(
        template_id: &str,
        record: &CaseRecord,
        extra: &AdditionalFields,
    ) -> String {
        match lookup(template_id) {
            Ok((descriptor, body)) => substitute(body, descriptor, record, extra),
            Err(_) => NOT_FOUND_SENTINEL.to_string(),
        }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn lookup(
    template_id: &str,
) -> Result<(&'static TemplateDescriptor, &'static str), TemplateError> {
    catalog::descriptor(template_id)
        .zip(catalog::body(template_id))
        .ok_or_else(|| TemplateError::UnknownTemplate {
            id: template_id.to_string(),
        })
}

fn substitute(
    body: &str,
    descriptor: &TemplateDescriptor,
    record: &CaseRecord,
    extra: &AdditionalFields,
) -> String {
    PLACEHOLDER
        .replace_all(body, |caps: &Captures| {
            resolve(&caps[1], descriptor, record, extra)
                .unwrap_or(&caps[0])
                .to_string()
        })
        .into_owned()
}

/// 未知的占位符返回 None，原样保留
fn resolve<'a>(
    name: &str,
    descriptor: &TemplateDescriptor,
    record: &'a CaseRecord,
    extra: &'a AdditionalFields,
) -> Option<&'a str> {
    if let Some(case_field) = name.strip_prefix(CASE_PREFIX) {
        return record.field(case_field);
    }

    let spec = descriptor.field(name)?;
    let value = extra.get(name).map(String::as_str);
    Some(match (value, spec.default) {
        (Some(v), Some(default)) if v.is_empty() => default,
        (Some(v), _) => v,
        (None, Some(default)) => default,
        (None, None) => "",
    })
}

/// 提取正文中所有占位符名称（去重、排序）
pub fn placeholders(body: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// 校验模板目录：每个声明字段都在正文中出现，正文中的非案件占位符都已声明
///
/// 返回发现的问题列表，为空表示一致
pub fn verify_catalog() -> Vec<String> {
    let mut problems = Vec::new();

    for descriptor in catalog::TEMPLATES {
        let Some(body) = catalog::body(descriptor.id) else {
            problems.push(format!("模板 {} 缺少正文", descriptor.id));
            continue;
        };

        let found = placeholders(body);
        let declared: BTreeSet<String> =
            descriptor.fields.iter().map(|f| f.key.to_string()).collect();

        for name in &found {
            match name.strip_prefix(CASE_PREFIX) {
                Some(case_field) if !CASE_FIELDS.contains(&case_field) => {
                    problems.push(format!("模板 {} 引用了未知案件字段 {}", descriptor.id, name));
                }
                Some(_) => {}
                None if !declared.contains(name) => {
                    problems.push(format!("模板 {} 的占位符 {} 未声明", descriptor.id, name));
                }
                None => {}
            }
        }

        for key in declared.iter().filter(|k| !found.contains(*k)) {
            problems.push(format!("模板 {} 声明的字段 {} 未在正文中使用", descriptor.id, key));
        }
    }

    problems
}
