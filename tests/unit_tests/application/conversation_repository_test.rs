use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chat_assistant::application::ports::StoreError;
use chat_assistant::application::services::{ConversationRepository, DEFAULT_SUMMARY_LIMIT};
use chat_assistant::domain::{ConversationId, DEFAULT_MODE, MessageRole, UNTITLED};
use chat_assistant::infrastructure::persistence::InMemoryMessageStore;

use super::stores::{TitleFailingStore, UnavailableStore};

const LONG_QUESTION: &str =
    "Hello, how do I learn distributed systems in six months without burning out completely?";

fn repository() -> ConversationRepository<InMemoryMessageStore> {
    ConversationRepository::new(Arc::new(InMemoryMessageStore::new()))
}

async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn given_many_creations_when_collecting_ids_then_ids_are_pairwise_distinct() {
    let repo = repository();

    let mut ids = HashSet::new();
    for _ in 0..100 {
        ids.insert(repo.create_conversation(DEFAULT_MODE).await.unwrap());
    }

    assert_eq!(ids.len(), 100);
}

#[tokio::test]
async fn given_created_conversation_when_reading_detail_then_is_empty_with_requested_mode() {
    let repo = repository();

    let id = repo.create_conversation("tutor").await.unwrap();
    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();

    assert_eq!(detail.id, id);
    assert_eq!(detail.mode, "tutor");
    assert!(detail.messages.is_empty());
    assert!(detail.title.is_none());
}

#[tokio::test]
async fn given_sequential_appends_when_reading_detail_then_messages_keep_append_order() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    let turns = [
        (MessageRole::User, "first"),
        (MessageRole::Assistant, "second"),
        (MessageRole::User, ""),
        (MessageRole::Assistant, "  padded  "),
    ];
    for (role, content) in turns {
        let stored_under = repo.add_message(&id, role, content).await.unwrap();
        assert_eq!(stored_under, id);
    }

    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();

    let stored: Vec<(MessageRole, &str)> = detail
        .messages
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(stored, turns.to_vec());
}

#[tokio::test]
async fn given_fifteen_messages_when_getting_recent_history_then_returns_last_ten_in_order() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    for i in 0..15 {
        repo.add_message(&id, MessageRole::User, &format!("Message {}", i))
            .await
            .unwrap();
    }

    let history = repo.get_recent_history(&id, 10).await.unwrap();

    let contents: Vec<String> = history.into_iter().map(|m| m.content).collect();
    let expected: Vec<String> = (5..15).map(|i| format!("Message {}", i)).collect();
    assert_eq!(contents, expected);
}

#[tokio::test]
async fn given_three_messages_when_getting_recent_history_then_returns_all_three() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    repo.add_message(&id, MessageRole::User, "a").await.unwrap();
    repo.add_message(&id, MessageRole::Assistant, "b").await.unwrap();
    repo.add_message(&id, MessageRole::User, "c").await.unwrap();

    let history = repo.get_recent_history(&id, 10).await.unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history[1].role, MessageRole::Assistant);
    assert_eq!(history[2].content, "c");
}

#[tokio::test]
async fn given_unknown_conversation_when_getting_recent_history_then_returns_empty() {
    let repo = repository();

    let history = repo
        .get_recent_history(&ConversationId::from_string("missing"), 10)
        .await
        .unwrap();

    assert!(history.is_empty());
}

#[tokio::test]
async fn given_first_long_user_message_when_appended_then_title_is_truncated_with_ellipsis() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    repo.add_message(&id, MessageRole::User, LONG_QUESTION)
        .await
        .unwrap();
    repo.add_message(&id, MessageRole::User, "A completely different follow-up")
        .await
        .unwrap();

    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert_eq!(
        detail.title.as_deref(),
        Some("Hello, how do I learn distributed systems in six m...")
    );
}

#[tokio::test]
async fn given_assistant_message_first_when_appended_then_title_stays_unset() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    repo.add_message(&id, MessageRole::Assistant, "Welcome!")
        .await
        .unwrap();

    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert!(detail.title.is_none());

    repo.add_message(&id, MessageRole::User, "Hi").await.unwrap();
    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert_eq!(detail.title.as_deref(), Some("Hi"));
}

#[tokio::test]
async fn given_concurrent_first_user_messages_when_appended_then_exactly_one_title_wins() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    let (a, b) = tokio::join!(
        repo.add_message(&id, MessageRole::User, "first contender"),
        repo.add_message(&id, MessageRole::User, "second contender"),
    );
    a.unwrap();
    b.unwrap();

    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert_eq!(detail.messages.len(), 2);
    let title = detail.title.unwrap();
    assert!(title == "first contender" || title == "second contender");
}

#[tokio::test]
async fn given_unknown_id_when_adding_message_then_creates_new_conversation_holding_it() {
    let store = Arc::new(InMemoryMessageStore::new());
    let repo = ConversationRepository::new(Arc::clone(&store));
    let requested = ConversationId::from_string("nonexistent-id");

    let stored_under = repo
        .add_message(&requested, MessageRole::User, "hi")
        .await
        .unwrap();

    assert_ne!(stored_under, requested);
    assert_eq!(store.len().await, 1);
    assert!(repo.get_conversation_detail(&requested).await.unwrap().is_none());

    let detail = repo
        .get_conversation_detail(&stored_under)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.mode, DEFAULT_MODE);
    assert_eq!(detail.messages.len(), 1);
    assert_eq!(detail.messages[0].content, "hi");
    assert_eq!(detail.title.as_deref(), Some("hi"));
}

#[tokio::test]
async fn given_failing_title_write_when_adding_user_message_then_append_still_succeeds() {
    let store = Arc::new(TitleFailingStore::default());
    let repo = ConversationRepository::new(Arc::clone(&store));
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    let result = repo.add_message(&id, MessageRole::User, "hello").await;

    assert!(result.is_ok());
    let detail = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert_eq!(detail.messages.len(), 1);
    assert!(detail.title.is_none());
}

#[tokio::test]
async fn given_conversation_when_deleted_twice_then_reports_true_then_false() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    repo.add_message(&id, MessageRole::User, "bye").await.unwrap();

    assert!(repo.delete_conversation(&id).await.unwrap());
    assert!(!repo.delete_conversation(&id).await.unwrap());
    assert!(!repo.delete_conversation(&id).await.unwrap());
    assert!(repo.get_conversation_detail(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_conversations_updated_in_sequence_when_listing_then_most_recent_comes_first() {
    let repo = repository();
    let first = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    let second = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    let third = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    for id in [&first, &second, &third] {
        tick().await;
        repo.add_message(id, MessageRole::Assistant, "ping")
            .await
            .unwrap();
    }

    let summaries = repo
        .get_all_conversation_summaries(DEFAULT_SUMMARY_LIMIT)
        .await
        .unwrap();

    let order: Vec<ConversationId> = summaries.into_iter().map(|s| s.conversation_id).collect();
    assert_eq!(order, vec![third, second, first]);
}

#[tokio::test]
async fn given_more_conversations_than_limit_when_listing_then_truncates() {
    let repo = repository();
    for _ in 0..5 {
        repo.create_conversation(DEFAULT_MODE).await.unwrap();
        tick().await;
    }

    let summaries = repo.get_all_conversation_summaries(3).await.unwrap();

    assert_eq!(summaries.len(), 3);
}

#[tokio::test]
async fn given_titled_and_untitled_conversations_when_listing_then_summaries_are_filled() {
    let repo = repository();
    let titled = repo.create_conversation("coder").await.unwrap();
    repo.add_message(&titled, MessageRole::User, "Fix my borrow checker error")
        .await
        .unwrap();
    repo.add_message(&titled, MessageRole::Assistant, "Sure")
        .await
        .unwrap();
    let untitled = repo.create_conversation(DEFAULT_MODE).await.unwrap();

    let summaries = repo.get_all_conversation_summaries(10).await.unwrap();

    let titled_summary = summaries
        .iter()
        .find(|s| s.conversation_id == titled)
        .unwrap();
    assert_eq!(titled_summary.title, "Fix my borrow checker error");
    assert_eq!(titled_summary.mode, "coder");
    assert_eq!(titled_summary.message_count, 2);

    let untitled_summary = summaries
        .iter()
        .find(|s| s.conversation_id == untitled)
        .unwrap();
    assert_eq!(untitled_summary.title, UNTITLED);
    assert_eq!(untitled_summary.message_count, 0);
}

#[tokio::test]
async fn given_conversation_when_updating_mode_then_only_mode_and_updated_at_change() {
    let repo = repository();
    let id = repo.create_conversation(DEFAULT_MODE).await.unwrap();
    repo.add_message(&id, MessageRole::User, "Quiz me on Raft")
        .await
        .unwrap();
    repo.add_message(&id, MessageRole::Assistant, "Question 1: ...")
        .await
        .unwrap();
    let before = repo.get_conversation_detail(&id).await.unwrap().unwrap();

    tick().await;
    let updated = repo.update_conversation_mode(&id, "exam").await.unwrap();

    assert!(updated);
    let after = repo.get_conversation_detail(&id).await.unwrap().unwrap();
    assert_eq!(after.mode, "exam");
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.messages, before.messages);
    assert_eq!(after.title, before.title);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn given_unknown_conversation_when_updating_mode_then_reports_false() {
    let repo = repository();

    let updated = repo
        .update_conversation_mode(&ConversationId::from_string("missing"), "exam")
        .await
        .unwrap();

    assert!(!updated);
}

#[tokio::test]
async fn given_unavailable_store_when_creating_conversation_then_error_propagates() {
    let repo = ConversationRepository::new(Arc::new(UnavailableStore));

    let result = repo.create_conversation(DEFAULT_MODE).await;

    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn given_unavailable_store_when_getting_recent_history_then_error_is_not_hidden() {
    let repo = ConversationRepository::new(Arc::new(UnavailableStore));

    let result = repo
        .get_recent_history(&ConversationId::new(), 10)
        .await;

    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
