//! HTML pages and fragments
//!
//! Templates live in `templates/` and are compiled in by askama. Every
//! `.html` template is auto-escaped.

use askama::Template;

use crate::todo::Todo;

/// Full page: todo form plus the list, newest first
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub todos: Vec<Todo>,
}

/// One `<li>`, returned after a create so htmx can prepend it
#[derive(Template)]
#[template(path = "todo_item.html")]
pub struct TodoItem<'a> {
    pub todo: &'a Todo,
}

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatPage;

/// Out-of-band swap appended to `#chat_messages` on every client
#[derive(Template)]
#[template(path = "chat_message.html")]
pub struct ChatMessageFragment<'a> {
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "other.html")]
pub struct OtherPage;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(id: &str, name: &str, minute: u32) -> Todo {
        Todo {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_chat_fragment_escapes_markup() {
        let html = ChatMessageFragment {
            message: "<script>alert(1)</script>",
        }
        .render()
        .unwrap();
        assert!(html.contains("hx-swap-oob=\"beforeend\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&#60;script&#62;"));
    }

    #[test]
    fn test_chat_fragment_contains_message() {
        let html = ChatMessageFragment { message: "hi" }.render().unwrap();
        assert!(html.contains(">hi</p>"));
    }

    #[test]
    fn test_todo_item_has_delete_target() {
        let t = todo("01HX", "buy milk", 0);
        let html = TodoItem { todo: &t }.render().unwrap();
        assert!(html.contains("id=\"todo-01HX\""));
        assert!(html.contains("hx-delete=\"/todos/01HX\""));
        assert!(html.contains("buy milk"));
        assert!(html.contains("2024-05-01 12:00"));
    }

    #[test]
    fn test_home_page_keeps_given_order() {
        let todos = vec![todo("b", "newer", 30), todo("a", "older", 10)];
        let html = HomePage { todos }.render().unwrap();
        let newer = html.find("id=\"todo-b\"").unwrap();
        let older = html.find("id=\"todo-a\"").unwrap();
        assert!(newer < older);
        assert!(html.contains("hx-post=\"/todos\""));
    }

    #[test]
    fn test_empty_home_page_has_no_items() {
        let html = HomePage { todos: Vec::new() }.render().unwrap();
        assert!(html.contains("<ul id=\"todos\">"));
        assert!(!html.contains("class=\"todo\""));
    }

    #[test]
    fn test_chat_page_connects_socket() {
        let html = ChatPage.render().unwrap();
        assert!(html.contains("ws-connect=\"/chat/ws\""));
        assert!(html.contains("name=\"message\""));
    }

    #[test]
    fn test_other_page_renders() {
        assert!(OtherPage.render().unwrap().contains("<h1>Other</h1>"));
    }
}
