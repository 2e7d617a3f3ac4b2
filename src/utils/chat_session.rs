use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::ChatMessage;
use crate::utils::groq::{CompletionProvider, CompletionRequest};
use crate::utils::prompts::chat_messages;

/// Conversación sobre un documento, con el historial de preguntas y respuestas
#[derive(Debug, Clone)]
pub struct ChatSession {
    context: String,
    history: Vec<ChatMessage>,
    temperature: f32,
}

impl ChatSession {
    pub fn new(context: impl Into<String>, config: &Config) -> Self {
        Self {
            context: context.into(),
            history: Vec::new(),
            temperature: config.chat_temperature,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Pregunta al modelo; el historial solo se actualiza si hubo respuesta
    pub fn ask(&mut self, provider: &dyn CompletionProvider, query: &str) -> Result<String> {
        let request = CompletionRequest {
            messages: chat_messages(&self.context, &self.formatted_history(), query),
            temperature: self.temperature,
            max_tokens: None,
        };

        let answer = provider.complete(&request)?;

        self.history.push(ChatMessage::user(query));
        self.history.push(ChatMessage::assistant(answer.clone()));
        info!("Historial de chat: {} mensajes", self.history.len());

        Ok(answer)
    }

    fn formatted_history(&self) -> String {
        self.history
            .iter()
            .map(|message| format!("{}: {}", message.role, message.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::Role;
    use std::cell::RefCell;

    /// Proveedor falso que registra las peticiones y responde en orden
    struct ScriptedProvider {
        answers: RefCell<Vec<Result<String>>>,
        requests: RefCell<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(answers: Vec<Result<String>>) -> Self {
            Self {
                answers: RefCell::new(answers),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionProvider for ScriptedProvider {
        fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.requests.borrow_mut().push(request.clone());
            self.answers.borrow_mut().remove(0)
        }
    }

    #[test]
    fn history_grows_with_each_answer() {
        let provider = ScriptedProvider::new(vec![
            Ok("Login uses SSO".to_string()),
            Ok("Three roles".to_string()),
        ]);
        let mut session = ChatSession::new("Document text", &Config::default());

        session.ask(&provider, "How do users log in?").unwrap();
        let answer = session.ask(&provider, "How many roles?").unwrap();

        assert_eq!(answer, "Three roles");
        assert_eq!(session.history().len(), 4);
        assert_eq!(session.history()[0].role, Role::User);
        assert_eq!(session.history()[1].content, "Login uses SSO");

        let requests = provider.requests.borrow();
        assert!(requests[0].messages[0].content.ends_with("Chat History:\n"));
        assert!(requests[1].messages[0]
            .content
            .contains("User: How do users log in?\nAssistant: Login uses SSO"));
        assert_eq!(requests[1].messages[1].content, "Query: How many roles?");
        assert_eq!(requests[1].temperature, 0.2);
    }

    #[test]
    fn failed_question_leaves_history_untouched() {
        let provider = ScriptedProvider::new(vec![Err(Error::EmptyCompletion)]);
        let mut session = ChatSession::new("Document text", &Config::default());

        assert!(session.ask(&provider, "Anything?").is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn clear_removes_history() {
        let provider = ScriptedProvider::new(vec![Ok("Yes".to_string())]);
        let mut session = ChatSession::new("Document text", &Config::default());
        session.ask(&provider, "Ready?").unwrap();

        session.clear();

        assert!(session.history().is_empty());
    }
}
