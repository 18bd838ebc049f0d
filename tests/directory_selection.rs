mod common;

use crate::common::*;
use gchat_lib::libs::core::directory::Entry;
use gchat_lib::libs::core::models::ConversationKey;
use gchat_lib::libs::views::{MainView, SELECT_CHAT_PLACEHOLDER};
use gchat_lib::ChatError;

#[test]
fn typing_work_lists_only_the_work_group() {
    let (mut app, _) = sample_app();
    app.set_search("work");

    let view = app.directory_view();

    assert!(view.users.is_empty());
    assert_eq!(view.users_placeholder, Some("No users found."));
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].name, "Work");
    assert_eq!(view.groups[0].member_count_label, "2 members");
    assert_eq!(view.groups[0].initial, 'W');
    assert_eq!(view.groups_placeholder, None);
}

#[test]
fn search_matches_regardless_of_case() {
    let (mut app, _) = sample_app();
    app.set_search("john");
    let view = app.directory_view();
    assert_eq!(view.users.len(), 1);
    assert_eq!(view.users[0].name, "John Doe");
    assert_eq!(view.groups_placeholder, Some("No groups available."));
}

#[test]
fn no_match_shows_only_empty_state_messages() {
    let (mut app, _) = sample_app();
    app.set_search("xyz");
    let view = app.directory_view();
    assert!(view.users.is_empty());
    assert!(view.groups.is_empty());
    assert_eq!(view.users_placeholder, Some("No users found."));
    assert_eq!(view.groups_placeholder, Some("No groups available."));
}

#[test]
fn nothing_selected_shows_placeholder() {
    let (app, _) = sample_app();
    assert_eq!(app.main_view(), MainView::Placeholder(SELECT_CHAT_PLACEHOLDER));
    assert!(app.profile_view().is_none());
}

#[test]
fn selecting_user_opens_profile_and_group_closes_it() {
    let (mut app, _) = sample_app();

    let jane = key_of(&app, "Jane Smith");
    assert_eq!(app.select(&jane).unwrap(), Entry::User(jane));
    assert!(app.profile_visible());
    assert!(matches!(app.main_view(), MainView::Chat(ref chat) if chat.title == "Jane Smith"));

    app.select_by_name("Family").unwrap();
    assert!(!app.profile_visible());
    assert!(app.profile_view().is_none());

    // Opening the profile over a group shows nothing.
    app.open_profile();
    assert!(!app.profile_visible());
}

#[test]
fn selection_marks_the_directory_entry() {
    let (mut app, _) = sample_app();
    app.select_by_name("Mark Evans").unwrap();
    let view = app.directory_view();
    let selected: Vec<&str> = view
        .users
        .iter()
        .filter(|u| u.selected)
        .map(|u| u.name.as_str())
        .collect();
    assert_eq!(selected, ["Mark Evans"]);
    assert!(view.groups.iter().all(|g| !g.selected));
}

#[test]
fn back_clears_selection() {
    let (mut app, _) = sample_app();
    app.select_by_name("Work").unwrap();
    app.back();
    assert_eq!(app.selection(), None);
    assert_eq!(app.main_view(), MainView::Placeholder(SELECT_CHAT_PLACEHOLDER));
}

#[test]
fn unknown_keys_cannot_be_selected() {
    let (mut app, _) = sample_app();
    let stray = ConversationKey::new();
    assert!(matches!(
        app.select(&stray),
        Err(ChatError::UnknownConversation(key)) if key == stray
    ));
    assert!(matches!(
        app.select_by_name("Nobody"),
        Err(ChatError::UnknownName(_))
    ));
    assert_eq!(app.selection(), None);
}

#[test]
fn created_group_appears_in_search() {
    let (mut app, _) = sample_app();
    let key = app.create_group("  Weekend Hikers ").unwrap();
    app.set_search("hik");
    let view = app.directory_view();
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].key, key);
    assert_eq!(view.groups[0].member_count_label, "0 members");

    assert!(matches!(
        app.create_group("Weekend Hikers"),
        Err(ChatError::Validation(_))
    ));
}

#[test]
fn selecting_another_conversation_resets_the_composer() {
    let (mut app, _) = sample_app();
    app.select_by_name("Jane Smith").unwrap();
    app.composer_mut().set_draft("half typed");
    app.composer_mut().toggle_emoji_picker();

    app.select_by_name("Mark Evans").unwrap();

    assert_eq!(app.composer().draft(), "");
    assert!(!app.composer().emoji_picker_open());
}
