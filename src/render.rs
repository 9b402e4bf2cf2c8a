use maud::{html, Markup, DOCTYPE};

use crate::models::Paste;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLE: &str = "body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; } \
                     textarea { width: 100%; min-height: 20rem; font-family: monospace; } \
                     pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }";

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (STYLE) }
            }
            body { (body) }
        }
    }
}

/// The static creation form.
pub fn home() -> String {
    page(
        "New paste",
        html! {
            h1 { "New paste" }
            form method="post" action="/create" {
                p {
                    label for="title" { "Title (optional)" }
                    br;
                    input type="text" id="title" name="title";
                }
                p {
                    label for="content" { "Content" }
                    br;
                    textarea id="content" name="content" required {}
                }
                button type="submit" { "Create paste" }
            }
        },
    )
    .into_string()
}

/// A single paste. Title and content are escaped by `maud`.
pub fn paste(paste: &Paste) -> String {
    let title = paste.display_title();
    let created = paste.created_at.format(TIMESTAMP_FORMAT).to_string();

    page(
        title,
        html! {
            h1 { (title) }
            p {
                "Created " (created) " · "
                a href={ "/raw/" (paste.slug) } { "raw" }
                " · slug " code { (paste.slug) }
            }
            pre { code { (paste.content) } }
            p { a href="/" { "New paste" } }
        },
    )
    .into_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn sample(title: Option<&str>, content: &str) -> Paste {
        Paste {
            slug: "aB3dE9".into(),
            title: title.map(Into::into),
            content: content.into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
        }
    }

    #[test]
    fn escapes_title_and_content() {
        let html = paste(&sample(
            Some("<b>bold</b>"),
            "<script>alert('x')</script> & more",
        ));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn shows_timestamp_and_slug() {
        let html = paste(&sample(Some("notes"), "hello"));
        assert!(html.contains("2024-03-09 07:05:01"));
        assert!(html.contains("aB3dE9"));
        assert!(html.contains("/raw/aB3dE9"));
    }

    #[test]
    fn falls_back_to_slug_title() {
        let html = paste(&sample(None, "hello"));
        assert!(html.contains("<h1>aB3dE9</h1>"));
    }

    #[test]
    fn home_posts_to_create() {
        let html = home();
        assert!(html.contains(r#"action="/create""#));
        assert!(html.contains(r#"name="content""#));
        assert!(html.contains(r#"name="title""#));
    }
}
