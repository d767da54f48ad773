use relaychat_llm::Message;
use relaychat_types::Turn;

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("You are helpful").role(), "system");
    assert_eq!(Message::human("Hello").role(), "user");
    assert_eq!(Message::ai("Hi there!").role(), "assistant");
}

#[test]
fn test_message_serialization_human() {
    let json = serde_json::to_string(&Message::human("Hello")).unwrap();
    assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
}

#[test]
fn test_message_deserialization() {
    let msg: Message = serde_json::from_str(r#"{"role":"assistant","content":"Hi"}"#).unwrap();
    assert_eq!(msg, Message::ai("Hi"));
}

#[test]
fn test_message_from_turn() {
    assert_eq!(Message::from(&Turn::user("q")), Message::human("q"));
    assert_eq!(Message::from(&Turn::assistant("a")), Message::ai("a"));
}
