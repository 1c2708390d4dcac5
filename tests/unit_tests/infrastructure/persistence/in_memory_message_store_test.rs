use chat_assistant::application::ports::{MessageStore, StoreError};
use chat_assistant::domain::{Conversation, ConversationId, DEFAULT_MODE, Message, MessageRole};
use chat_assistant::infrastructure::persistence::InMemoryMessageStore;

#[tokio::test]
async fn given_existing_id_when_inserting_again_then_fails_with_duplicate() {
    let store = InMemoryMessageStore::new();
    let conversation = Conversation::new(DEFAULT_MODE);
    store.insert(&conversation).await.unwrap();

    let result = store.insert(&conversation).await;

    assert!(matches!(result, Err(StoreError::DuplicateId(_))));
}

#[tokio::test]
async fn given_missing_id_when_appending_then_matches_nothing() {
    let store = InMemoryMessageStore::new();

    let matched = store
        .append_message(
            &ConversationId::from_string("missing"),
            &Message::new(MessageRole::User, "hi"),
        )
        .await
        .unwrap();

    assert_eq!(matched, 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_append_when_applied_then_updated_at_follows_message_timestamp() {
    let store = InMemoryMessageStore::new();
    let conversation = Conversation::new(DEFAULT_MODE);
    store.insert(&conversation).await.unwrap();
    let message = Message::new(MessageRole::Assistant, "hello");

    let matched = store
        .append_message(&conversation.id, &message)
        .await
        .unwrap();

    assert_eq!(matched, 1);
    let stored = store
        .find_by_conversation_id(&conversation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.updated_at, message.timestamp);
    assert_eq!(stored.messages, vec![message]);
}

#[tokio::test]
async fn given_title_already_set_when_setting_again_then_is_rejected() {
    let store = InMemoryMessageStore::new();
    let conversation = Conversation::new(DEFAULT_MODE);
    store.insert(&conversation).await.unwrap();

    assert!(store
        .set_title_if_unset(&conversation.id, "first")
        .await
        .unwrap());
    assert!(!store
        .set_title_if_unset(&conversation.id, "second")
        .await
        .unwrap());

    let stored = store
        .find_by_conversation_id(&conversation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.as_deref(), Some("first"));
}
