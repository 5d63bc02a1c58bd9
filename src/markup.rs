//! Server-side fragments carrying the markers the page scripts look for.

use maud::{DOCTYPE, Markup, html};

use crate::theme::ThemePreference;

const THEME_CHOICES: [(&str, &str); 3] =
    [("system", "System"), ("light", "Light"), ("dark", "Dark")];

pub fn theme_select(current: &ThemePreference) -> Markup {
    html! {
        label class="theme-picker" {
            "Theme "
            select data-theme-toggle aria-label="Theme" {
                @for (value, label) in THEME_CHOICES {
                    option value=(value) selected[current.as_str() == value] { (label) }
                }
            }
        }
    }
}

pub fn copy_button(label: &str, value: &str) -> Markup {
    html! {
        button type="button" class="copy-btn" data-copy=(value) { (label) }
    }
}

pub fn toast_surface() -> Markup {
    html! {
        div class="toast" role="status" aria-live="polite" {}
    }
}

/// A complete page with the theme picker in the header and the toast at the
/// end of the body.
pub fn scaffold(title: &str, body: Markup) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (title) }
            }
            body {
                header class="topbar" {
                    h1 { (title) }
                    (theme_select(&ThemePreference::System))
                }
                main { (body) }
                (toast_surface())
            }
        }
    };
    markup.into_string()
}

/// The page used when the CLI runs without `--input`.
pub fn demo_page() -> String {
    scaffold(
        "AppHub",
        html! {
            section class="release" {
                h2 { "Latest release" }
                img src="screenshot.png" alt="Screenshot";
                p {
                    code { "sha256:4f2a9c" }
                    " "
                    (copy_button("Copy checksum", "sha256:4f2a9c"))
                }
                p {
                    code { "https://apphub.example.com/apps/demo" }
                    " "
                    (copy_button("Copy link", "https://apphub.example.com/apps/demo"))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_select_marks_current() {
        let html = theme_select(&ThemePreference::Dark).into_string();
        assert!(html.contains("data-theme-toggle"));
        assert!(html.contains(r#"<option value="dark" selected>"#));
        assert!(!html.contains(r#"<option value="light" selected>"#));
    }

    #[test]
    fn copy_button_escapes_payload() {
        let html = copy_button("Copy", r#"a"b"#).into_string();
        assert!(html.contains(r#"data-copy="a&quot;b""#));
    }
}
