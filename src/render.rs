//! Plain-text rendering of screens for the terminal front end

use crate::app::Screen;
use crate::views::{DetailScreen, ListScreen, Navbar};
use std::fmt::Write;

pub fn render_navbar(navbar: &Navbar) -> String {
    format!("{} | Posts | {}", navbar.brand, navbar.user_label)
}

pub fn render_screen(screen: &Screen) -> String {
    match screen {
        Screen::Login => render_login(),
        Screen::List(list) => render_list(list),
        Screen::Detail(detail) => render_detail(detail),
    }
}

fn render_login() -> String {
    [
        "Blog Dash",
        "Welcome back! Please login to continue.",
        "",
        "Hint: Use any username and password with 6+ characters",
    ]
    .join("\n")
}

pub fn render_list(screen: &ListScreen) -> String {
    match screen {
        ListScreen::Loading => "Loading...".to_string(),
        ListScreen::Error { message } => format!("Error: {message}"),
        ListScreen::Ready { count, posts } => {
            let mut out = String::new();
            let _ = writeln!(out, "All Blog Posts");
            let _ = writeln!(out, "{count} posts available");
            for card in posts {
                let _ = writeln!(out);
                let _ = writeln!(out, "#{:<4} {}", card.id, card.title);
                let _ = writeln!(out, "      {}", card.excerpt);
                let _ = writeln!(out, "      Read more → {}", card.link);
            }
            out.trim_end().to_string()
        }
    }
}

pub fn render_detail(screen: &DetailScreen) -> String {
    match screen {
        DetailScreen::Loading => "Loading...".to_string(),
        DetailScreen::Error { message } => {
            format!("Error: {message}\n[Back to Dashboard: {}]", screen.back_route())
        }
        DetailScreen::NotFound => {
            format!("Post not found\n[Back to Dashboard: {}]", screen.back_route())
        }
        DetailScreen::Ready(page) => {
            let mut out = String::new();
            let _ = writeln!(out, "← Back to Posts ({})", screen.back_route());
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", page.post.title);
            let _ = writeln!(out, "Post #{} · By User {}", page.post.id, page.post.user_id);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", page.post.body);
            let _ = writeln!(out);
            let _ = writeln!(out, "Comments ({})", page.comment_count);
            for comment in &page.comments {
                let _ = writeln!(out);
                let _ = writeln!(out, "  {} <{}>", comment.name, comment.email);
                let _ = writeln!(out, "  {}", comment.body.replace('\n', "\n  "));
            }
            out.trim_end().to_string()
        }
    }
}
