mod common;

use crate::common::*;
use chrono::{TimeZone, Utc};
use gchat_lib::libs::core::models::{
    ConversationKey, FileAttachment, MessageContent, OutgoingMessage, Sender,
};
use gchat_lib::libs::storage::storage_traits::MessageStore;
use gchat_lib::libs::views::{BubbleBody, MainView};
use gchat_lib::ChatError;

#[test]
fn first_text_to_jane_creates_a_singleton_history() {
    let (mut app, _) = sample_app();
    let jane = key_of(&app, "Jane Smith");
    let before = Utc::now();

    app.send(&jane, OutgoingMessage::text("hi")).unwrap();

    let history = app.messages(&jane);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, MessageContent::text("hi"));
    assert_eq!(history[0].from, Sender::Me);
    assert_eq!(history[0].from.marker(), "me");
    assert!(history[0].timestamp >= before);
    assert!(history[0].iso_timestamp().ends_with('Z'));
}

#[test]
fn supplied_timestamp_is_kept() {
    let (mut app, _) = sample_app();
    let mark = key_of(&app, "Mark Evans");
    let at = Utc.with_ymd_and_hms(2023, 12, 24, 18, 30, 0).unwrap();

    let record = app.send(&mark, OutgoingMessage::text("merry").at(at)).unwrap();

    assert_eq!(record.timestamp, at);
    assert_eq!(record.iso_timestamp(), "2023-12-24T18:30:00.000Z");
}

#[test]
fn messages_keep_send_order_per_conversation() {
    let (mut app, _) = sample_app();
    let family = key_of(&app, "Family");
    let work = key_of(&app, "Work");

    for body in ["one", "two", "three"] {
        app.send(&family, OutgoingMessage::text(body)).unwrap();
    }
    app.send(&work, OutgoingMessage::text("standup?")).unwrap();

    let bodies: Vec<&MessageContent> = app.messages(&family).iter().map(|m| &m.content).collect();
    assert_eq!(
        bodies,
        [
            &MessageContent::text("one"),
            &MessageContent::text("two"),
            &MessageContent::text("three")
        ]
    );
    assert_eq!(app.store().message_count(&work), 1);
    assert_eq!(app.store().conversation_count(), 2);
}

#[test]
fn failed_sends_leave_the_store_untouched() {
    let (mut app, _) = sample_app();
    let jane = key_of(&app, "Jane Smith");

    assert!(matches!(
        app.send(&ConversationKey::new(), OutgoingMessage::text("lost")),
        Err(ChatError::UnknownConversation(_))
    ));
    assert!(matches!(
        app.send(&jane, OutgoingMessage::text("   ")),
        Err(ChatError::EmptyMessage)
    ));
    assert!(matches!(
        app.send_to_selected(OutgoingMessage::text("nobody selected")),
        Err(ChatError::NoActiveConversation)
    ));
    assert_eq!(app.store().conversation_count(), 0);
}

#[test]
fn draft_is_trimmed_sent_and_cleared() {
    let (mut app, _) = sample_app();
    app.select_by_name("Jane Smith").unwrap();
    app.composer_mut().set_draft("  see you at 5 ");

    app.send_draft().unwrap();

    assert_eq!(app.composer().draft(), "");
    let MainView::Chat(chat) = app.main_view() else {
        panic!("a one-to-one chat should be showing");
    };
    assert_eq!(chat.bubbles.len(), 1);
    assert!(chat.bubbles[0].mine);
    assert_eq!(chat.bubbles[0].body, BubbleBody::Text("see you at 5".to_string()));
}

#[test]
fn blank_draft_is_refused_and_kept() {
    let (mut app, _) = sample_app();
    app.select_by_name("Jane Smith").unwrap();
    app.composer_mut().set_draft("  ");
    assert!(matches!(app.send_draft(), Err(ChatError::EmptyMessage)));
    assert_eq!(app.composer().draft(), "  ");
}

#[test]
fn picked_images_and_files_render_differently() {
    let (mut app, _) = sample_app();
    app.select_by_name("Work").unwrap();

    let mut photo = FixedFilePicker(Some(FileAttachment::new(
        "whiteboard.png",
        "image/png",
        vec![0x89, 0x50],
    )));
    let mut document = FixedFilePicker(Some(FileAttachment::new(
        "minutes.pdf",
        "application/pdf",
        vec![0x25],
    )));
    let mut dismissed = FixedFilePicker(None);

    assert!(app.attach_file(&mut photo).unwrap().is_some());
    assert!(app.attach_file(&mut document).unwrap().is_some());
    assert!(app.attach_file(&mut dismissed).unwrap().is_none());

    let MainView::GroupChat(group) = app.main_view() else {
        panic!("the group chat should be showing");
    };
    assert_eq!(group.bubbles.len(), 2);
    assert!(matches!(&group.bubbles[0].body, BubbleBody::Image { name, .. } if name == "whiteboard.png"));
    assert!(matches!(&group.bubbles[1].body, BubbleBody::Download { name, .. } if name == "minutes.pdf"));
}

#[test]
fn attaching_without_a_conversation_fails() {
    let (mut app, _) = sample_app();
    let mut picker = FixedFilePicker(Some(FileAttachment::new("a.txt", "text/plain", vec![])));
    assert!(matches!(
        app.attach_file(&mut picker),
        Err(ChatError::NoActiveConversation)
    ));
}
