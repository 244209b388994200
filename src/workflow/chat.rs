//! 助手对话记录
//!
//! 只追加的消息列表，回复内容是固定模板

use serde::Serialize;

use crate::models::assistant::Assistant;

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: usize,
    pub speaker: Speaker,
    pub content: String,
}

/// 对话记录
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    assistant: Assistant,
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// 新建对话，首条消息为助手的欢迎语
    pub fn new(assistant: Assistant) -> Self {
        let mut transcript = Self {
            assistant,
            messages: Vec::new(),
        };
        transcript.push(
            Speaker::Assistant,
            format!(
                "Olá! Sou o {}. Como posso ajudá-lo hoje? Por favor, forneça o número do processo ou descreva sua necessidade.",
                assistant.name()
            ),
        );
        transcript
    }

    fn push(&mut self, speaker: Speaker, content: String) -> &ChatMessage {
        let id = self.messages.len() + 1;
        self.messages.push(ChatMessage {
            id,
            speaker,
            content,
        });
        &self.messages[id - 1]
    }

    pub fn assistant(&self) -> Assistant {
        self.assistant
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// 用户提交案号
    ///
    /// 案号为空（仅空白）时不记录任何消息并返回 `false`
    pub fn submit_case_number(&mut self, case_number: &str, additional_info: Option<&str>) -> bool {
        let case_number = case_number.trim();
        if case_number.is_empty() {
            return false;
        }

        let mut user_message = format!("Número do processo: {}", case_number);
        if let Some(info) = additional_info.filter(|i| !i.trim().is_empty()) {
            user_message.push_str(&format!("\n\nInformações adicionais: {}", info));
        }
        self.push(Speaker::User, user_message);

        let reply = format!(
            "Analisando o processo {number}...\n\n✅ Dados extraídos com sucesso!\n\n📋 **Resumo do Processo:**\n- Número: {number}\n- Tipo: {kind}\n- Status: Em andamento\n\n🤖 Estou preparando os documentos necessários. Que tipo de peça você gostaria que eu gere?",
            number = case_number,
            kind = self.assistant.process_type()
        );
        self.push(Speaker::Assistant, reply);
        true
    }

    /// 记录文书已生成
    pub fn document_generated(&mut self, case_number: &str) -> &ChatMessage {
        let content = format!(
            "📄 **Documento Gerado!**\n\n✅ {} criado com base nos dados do processo {}\n\n🔍 **Revisão Automática Concluída:**\n- Formatação: ✅\n- Dados das partes: ✅\n- Fundamentos jurídicos: ✅\n- Pedidos: ✅\n\n💾 Documento pronto para download!",
            self.assistant.process_type(),
            case_number
        );
        self.push(Speaker::Assistant, content)
    }
}
