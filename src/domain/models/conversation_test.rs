use anyhow::Result;
use test_utils::conversation_fixture;

use super::Author;
use super::Conversation;
use super::Message;

#[test]
fn it_deserializes_conversations() -> Result<()> {
    let conversation: Conversation = serde_json::from_str(conversation_fixture())?;

    assert_eq!(conversation.conversationid, "c1");
    assert_eq!(conversation.document.filename, "annual-report.pdf");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[0].author(), Author::User);
    assert_eq!(conversation.messages[1].author(), Author::Assistant);
    assert_eq!(conversation.messages[1].content(), "Revenue was 12 million.");

    return Ok(());
}

#[test]
fn it_passes_additional_kwargs_through() -> Result<()> {
    let conversation: Conversation = serde_json::from_str(conversation_fixture())?;
    let value = serde_json::to_value(&conversation.messages[1])?;

    assert_eq!(value["data"]["additional_kwargs"]["stop_reason"], "end_turn");
    assert_eq!(value["type"], "ai");

    return Ok(());
}

#[test]
fn it_builds_preview_messages() {
    let msg = Message::preview("Who signed it?");

    assert_eq!(msg.mtype, "text");
    assert_eq!(msg.content(), "Who signed it?");
    assert!(!msg.data.example);
    assert!(msg.data.additional_kwargs.is_empty());
    assert_eq!(msg.author(), Author::User);
}

#[test]
fn it_wraps_lines() {
    let msg = Message::preview("one two three four\n\nfive");
    let lines = msg.as_string_lines(9);

    assert_eq!(
        lines,
        vec![
            "one two".to_string(),
            "three".to_string(),
            "four".to_string(),
            " ".to_string(),
            "five".to_string(),
        ]
    );
}
