//! 文书模板目录
//!
//! 封闭的模板集合：描述（字段）与模板正文。
//!
//! 正文占位符：
//! - `{{case.<字段>}}` 引用案件数据（见 [`CASE_FIELDS`](crate::models::case_record::CASE_FIELDS)）
//! - `{{<key>}}` 引用模板声明的附加字段

use phf::phf_map;

use crate::models::assistant::Assistant;
use crate::models::template::{FieldKind, FieldSpec, TemplateDescriptor};

/// 旧接口使用的"模板不存在"文本
pub const NOT_FOUND_SENTINEL: &str = "Modelo não encontrado";

const NO_OBSERVATIONS: &str = "Sem observações adicionais.";

pub const TEMPLATES: &[TemplateDescriptor] = &[
    TemplateDescriptor {
        id: "manifestacao-endereco",
        display_name: "Manifestação de Novo Endereço",
        description: "Comunicar mudança de endereço nos autos",
        assistant: Assistant::Processual,
        fields: &[
            FieldSpec::required("newAddress", "Novo Endereço", FieldKind::Text),
            FieldSpec::optional(
                "observations",
                "Observações",
                FieldKind::Multiline,
                NO_OBSERVATIONS,
            ),
        ],
    },
    TemplateDescriptor {
        id: "dilacao-prazo",
        display_name: "Dilação de Prazo",
        description: "Solicitar prorrogação de prazo processual",
        assistant: Assistant::Processual,
        fields: &[
            FieldSpec::required("days", "Dias solicitados", FieldKind::Number),
            FieldSpec::required("reason", "Motivo", FieldKind::Multiline),
            FieldSpec::optional("observations", "Observações", FieldKind::Multiline, ""),
        ],
    },
    TemplateDescriptor {
        id: "pesquisa-endereco",
        display_name: "Pesquisa de Endereço",
        description: "Solicitar pesquisa de endereço de parte",
        assistant: Assistant::Processual,
        fields: &[
            FieldSpec::required("targetParty", "Parte a ser pesquisada", FieldKind::Text),
            FieldSpec::required("searchOrgans", "Órgãos de pesquisa", FieldKind::Text),
            FieldSpec::required("justification", "Justificativa", FieldKind::Multiline),
        ],
    },
];

static TEMPLATE_BODIES: phf::Map<&'static str, &'static str> = phf_map! {
    "manifestacao-endereco" => "EXCELENTÍSSIMO(A) SENHOR(A) DOUTOR(A) JUIZ(A) DE DIREITO DA {{case.court}}

AUTOS: {{case.number}}
REQUERENTE: {{case.plaintiff}}
REQUERIDO: {{case.defendant}}

{{case.plaintiff}}, já qualificado nos autos em epígrafe, vem respeitosamente à presença de Vossa Excelência, por meio de seu procurador devidamente constituído, apresentar:

MANIFESTAÇÃO SOBRE NOVO ENDEREÇO

Informa que o endereço atual é: {{newAddress}}

{{observations}}

Termos em que,
Pede deferimento.

Local, data.
Advogado
OAB/XX XXXXX",

    "dilacao-prazo" => "EXCELENTÍSSIMO(A) SENHOR(A) DOUTOR(A) JUIZ(A) DE DIREITO DA {{case.court}}

AUTOS: {{case.number}}  
REQUERENTE: {{case.plaintiff}}
REQUERIDO: {{case.defendant}}

{{case.plaintiff}}, vem respeitosamente requerer:

DILAÇÃO DE PRAZO

Requer a dilação do prazo por {{days}} dias, pelos motivos: {{reason}}

{{observations}}

Termos em que,
Pede deferimento.

Local, data.
Advogado
OAB/XX XXXXX",

    "pesquisa-endereco" => "EXCELENTÍSSIMO(A) SENHOR(A) DOUTOR(A) JUIZ(A) DE DIREITO DA {{case.court}}

AUTOS: {{case.number}}
REQUERENTE: {{case.plaintiff}}  
REQUERIDO: {{case.defendant}}

{{case.plaintiff}}, vem requerer:

PESQUISA DE ENDEREÇO

Requer pesquisa de endereço da parte {{targetParty}} junto aos órgãos: {{searchOrgans}}

Justificativa: {{justification}}

Termos em que,
Pede deferimento.

Local, data.
Advogado
OAB/XX XXXXX",
};

/// 按 ID 精确查找模板描述
pub fn descriptor(id: &str) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// 按 ID 精确查找模板正文
pub fn body(id: &str) -> Option<&'static str> {
    TEMPLATE_BODIES.get(id).copied()
}

/// 某个助手提供的模板
pub fn templates_for(assistant: Assistant) -> impl Iterator<Item = &'static TemplateDescriptor> {
    TEMPLATES.iter().filter(move |t| t.assistant == assistant)
}

/// 模板是否由该助手提供
pub fn is_offered_by(assistant: Assistant, template_id: &str) -> bool {
    templates_for(assistant).any(|t| t.id == template_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_every_descriptor_has_body() {
        let mut seen = HashSet::new();
        for t in TEMPLATES {
            assert!(seen.insert(t.id), "模板 ID 重复: {}", t.id);
            assert!(body(t.id).is_some(), "模板 {} 缺少正文", t.id);
        }
        assert_eq!(TEMPLATE_BODIES.len(), TEMPLATES.len());
    }

    #[test]
    fn test_field_keys_unique_within_descriptor() {
        for t in TEMPLATES {
            let mut keys = HashSet::new();
            for f in t.fields {
                assert!(keys.insert(f.key), "模板 {} 字段重复: {}", t.id, f.key);
            }
        }
    }

    #[test]
    fn test_templates_for_processual() {
        let ids: Vec<_> = templates_for(Assistant::Processual).map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["manifestacao-endereco", "dilacao-prazo", "pesquisa-endereco"]
        );
        assert_eq!(templates_for(Assistant::Recursos).count(), 0);
    }

    #[test]
    fn test_is_offered_by() {
        assert!(is_offered_by(Assistant::Processual, "dilacao-prazo"));
        assert!(!is_offered_by(Assistant::Negocial, "dilacao-prazo"));
        assert!(!is_offered_by(Assistant::Processual, "nao-existe"));
    }
}
