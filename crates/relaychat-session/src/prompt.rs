use relaychat_llm::Message;
use relaychat_types::Session;

use crate::config::{SessionConfig, USER_CONTEXT_PLACEHOLDER};

/// Render the persona template, personalized when a display name is known
pub fn system_prompt(template: &str, display_name: Option<&str>) -> String {
    let user_context = match display_name {
        Some(name) => format!(
            " The user's name is {}; address them by name when it feels natural.",
            name
        ),
        None => String::new(),
    };

    if template.contains(USER_CONTEXT_PLACEHOLDER) {
        template.replace(USER_CONTEXT_PLACEHOLDER, &user_context)
    } else {
        format!("{}{}", template, user_context)
    }
}

/// System instruction followed by the last `history_limit` turns, oldest first
pub fn build_messages(session: &Session, config: &SessionConfig) -> Vec<Message> {
    let window = session.recent(config.history_limit);

    let mut messages = Vec::with_capacity(window.len() + 1);
    messages.push(Message::system(system_prompt(
        &config.persona_template,
        session.display_name.as_deref(),
    )));
    messages.extend(window.iter().map(Message::from));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaychat_types::Turn;

    #[test]
    fn test_prompt_without_name_drops_placeholder() {
        let prompt = system_prompt("Be a beauty assistant.<user_context>", None);
        assert_eq!(prompt, "Be a beauty assistant.");
    }

    #[test]
    fn test_prompt_with_name() {
        let prompt = system_prompt("Be a beauty assistant.<user_context>", Some("Casey"));
        assert!(prompt.starts_with("Be a beauty assistant. The user's name is Casey"));
    }

    #[test]
    fn test_template_without_placeholder_gets_suffix() {
        let prompt = system_prompt("Be brief.", Some("Casey"));
        assert!(prompt.starts_with("Be brief. The user's name is Casey"));
    }

    #[test]
    fn test_window_is_capped_and_ordered() {
        let mut session = Session::seeded("greeting");
        for i in 0..30 {
            session.push(Turn::user(format!("q{}", i)));
        }
        let config = SessionConfig::default();

        let messages = build_messages(&session, &config);

        assert_eq!(messages.len(), 21);
        assert_eq!(messages[0].role(), "system");
        assert_eq!(messages[1].content(), "q10");
        assert_eq!(messages[20].content(), "q29");
    }

    #[test]
    fn test_short_history_is_sent_whole() {
        let mut session = Session::seeded("greeting");
        session.push(Turn::user("hi"));

        let messages = build_messages(&session, &SessionConfig::default());

        let roles: Vec<&str> = messages.iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
    }
}
