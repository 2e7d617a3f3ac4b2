use crate::models::ChatMessage;

/// Consulta por defecto para la generación de casos de prueba
pub const DEFAULT_GENERATION_QUERY: &str = "Generate comprehensive test cases";

const GENERATION_SYSTEM_PROMPT: &str = r#"You are an expert test case analyst and test script writer. Analyze the provided client transcript or document and generate comprehensive test cases with test scripts that anyone can run by following the detailed steps.

If the document is large:
1. Break it down into smaller sections
2. Analyze each section for relevant test scenarios
3. Combine the scenarios into a comprehensive list of test cases
4. Ensure no relevant test scenario is missed

While generating the test cases:
- Consider the system under test, its functionalities and user roles
- Write specific, actionable steps: every click, navigation, field entry and verification
- Mention UI elements (buttons, tabs, dropdowns, icons, fields) by name
- Include verification steps after each major action
- List every prerequisite in the preconditions
- Give realistic example values in the test data
- When a step requires visual confirmation of a screen or UI element, add "**Add screenshot here" to the expected_result for that step

You must respond with a valid JSON array of test case objects. Each object must have these exact fields:
- test_case_id: string (e.g. "TC001")
- title: string
- description: string
- preconditions: string (numbered list separated by newlines)
- test_steps: string (numbered steps separated by newlines, 10-30 steps)
- expected_result: string
- test_data: string
- priority: string ("High", "Medium" or "Low")
- test_type: string (e.g. "Functional")
- module: string (feature or module name)

Example response format:
[
    {
        "test_case_id": "TC001",
        "title": "Update user profile shipping address",
        "description": "Verify that a user can log in, open the profile settings and update the shipping address",
        "preconditions": "1. User has valid credentials\n2. User has access to the system",
        "test_steps": "1. Open the web browser and navigate to the application URL\n2. Enter a valid username in the 'Username' field\n3. Enter a valid password in the 'Password' field\n4. Click the 'Login' button\n5. Verify that the home page is displayed\n6. Click the user profile icon\n7. Select 'Edit Profile'\n8. Open the 'Shipping Address' tab\n9. Enter the new address\n10. Click 'Save'\n11. Verify that the success message is displayed",
        "expected_result": "The profile is updated and a confirmation message is shown",
        "test_data": "Username: test.user@company.com\nPassword: Test@123\nAddress: 123 Main St, New York, NY 10001",
        "priority": "High",
        "test_type": "Functional",
        "module": "User Profile Management"
    }
]

Generate multiple relevant test cases based on the context. Respond with valid JSON only.

Context:
"#;

const CHAT_SYSTEM_PROMPT: &str = "You are an expert AI analyst. Answer the user's query based on the context and chat history provided below.
If the context does not contain the answer, use your expertise to provide a relevant response.";

/// Mensajes para generar casos de prueba a partir del texto del documento
pub fn generation_messages(context: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!("{}{}", GENERATION_SYSTEM_PROMPT, context)),
        ChatMessage::user(format!("Generate test cases: {}", query)),
    ]
}

/// Mensajes para una pregunta sobre el documento con el historial ya formateado
pub fn chat_messages(context: &str, chat_history: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "{}\n\nDocument Context:\n{}\n\nChat History:\n{}",
            CHAT_SYSTEM_PROMPT, context, chat_history
        )),
        ChatMessage::user(format!("Query: {}", query)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn generation_prompt_embeds_context_and_query() {
        let messages = generation_messages("Login with SSO", DEFAULT_GENERATION_QUERY);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.ends_with("Context:\nLogin with SSO"));
        assert!(messages[0].content.contains("test_case_id"));
        assert_eq!(
            messages[1].content,
            "Generate test cases: Generate comprehensive test cases"
        );
    }

    #[test]
    fn chat_prompt_embeds_history() {
        let messages = chat_messages("Doc text", "User: hi\nAssistant: hello", "What next?");

        assert!(messages[0].content.contains("Document Context:\nDoc text"));
        assert!(messages[0]
            .content
            .contains("Chat History:\nUser: hi\nAssistant: hello"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Query: What next?");
    }
}
