use serde::{Deserialize, Serialize};

/// 业务部门
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// BB 被告方 - 防御
    Reu,
    /// BB 原告方 - 起诉
    Autor,
}

impl Sector {
    pub const ALL: [Sector; 2] = [Sector::Reu, Sector::Autor];

    pub fn title(self) -> &'static str {
        match self {
            Sector::Reu => "BB Réu",
            Sector::Autor => "BB Autor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sector::Reu => "BB Réu - Defesa",
            Sector::Autor => "BB Autor - Ação",
        }
    }

    /// 该部门下的助手
    pub fn assistants(self) -> &'static [Assistant] {
        match self {
            Sector::Reu => &[Assistant::Recursos, Assistant::Contestacao],
            Sector::Autor => &[
                Assistant::Ajuizamento,
                Assistant::Processual,
                Assistant::Negocial,
            ],
        }
    }
}

/// 法律助手类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    /// 上诉
    Recursos,
    /// 答辩
    Contestacao,
    /// 起诉
    Ajuizamento,
    /// 程序性文书（地址变更、延期等）
    Processual,
    /// 和解谈判
    Negocial,
}

impl Assistant {
    /// 路由中使用的 ID
    pub fn id(self) -> &'static str {
        match self {
            Assistant::Recursos => "recursos",
            Assistant::Contestacao => "contestacao",
            Assistant::Ajuizamento => "ajuizamento",
            Assistant::Processual => "processual",
            Assistant::Negocial => "negocial",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Assistant::Recursos => "Assistente de Recursos",
            Assistant::Contestacao => "Assistente de Contestação",
            Assistant::Ajuizamento => "Assistente de Ajuizamento",
            Assistant::Processual => "Assistente Processual",
            Assistant::Negocial => "Assistente Negocial",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Assistant::Recursos => "Especialista em recursos e apelações",
            Assistant::Contestacao => "Especialista em contestações e defesas",
            Assistant::Ajuizamento => "Especialista em petições iniciais",
            Assistant::Processual => "Manifestações e dilação de prazo",
            Assistant::Negocial => "Acordos e negociações",
        }
    }

    pub fn sector(self) -> Sector {
        match self {
            Assistant::Recursos | Assistant::Contestacao => Sector::Reu,
            Assistant::Ajuizamento | Assistant::Processual | Assistant::Negocial => {
                Sector::Autor
            }
        }
    }

    /// 该助手处理的文书类型
    pub fn process_type(self) -> &'static str {
        match self {
            Assistant::Recursos => "Recurso/Apelação",
            Assistant::Contestacao => "Contestação",
            Assistant::Ajuizamento => "Petição Inicial",
            Assistant::Processual => "Manifestação Processual",
            Assistant::Negocial => "Negociação/Acordo",
        }
    }
}

impl std::fmt::Display for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
