//! HTML pages. Plain string rendering; every user-supplied value goes
//! through [`escape`].

use axum::http::StatusCode;
use model::entities::note;

use crate::flash::Flash;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, username: Option<&str>, flash: Option<Flash>, body: &str) -> String {
    let nav = match username {
        Some(name) => format!(
            r#"<span>Signed in as <strong>{}</strong></span> <a href="/dashboard">Notes</a> <a href="/logout">Logout</a>"#,
            escape(name)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };

    let flash = match flash {
        Some(flash) => format!(
            r#"<p class="flash {}">{}</p>"#,
            if flash.is_error() { "error" } else { "info" },
            escape(flash.message())
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Notekeeper</title>
</head>
<body>
<nav><a href="/">Notekeeper</a> {nav}</nav>
{flash}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn home(flash: Option<Flash>) -> String {
    layout(
        "Welcome",
        None,
        flash,
        r#"<p>Keep your notes in one place.</p>
<p><a href="/register">Create an account</a> or <a href="/login">log in</a>.</p>"#,
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input type="text" name="username" maxlength="100" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#
    )
}

pub fn register(flash: Option<Flash>) -> String {
    let body = format!(
        r#"{}
<p>Already registered? <a href="/login">Log in</a>.</p>"#,
        credentials_form("/register", "Register")
    );
    layout("Register", None, flash, &body)
}

pub fn login(flash: Option<Flash>) -> String {
    let body = format!(
        r#"{}
<p>No account yet? <a href="/register">Register</a>.</p>"#,
        credentials_form("/login", "Log in")
    );
    layout("Login", None, flash, &body)
}

pub fn dashboard(username: &str, notes: &[note::Model], flash: Option<Flash>) -> String {
    let mut body = String::from(
        r#"<form method="post" action="/dashboard">
<textarea name="note" rows="3" placeholder="Write a note"></textarea>
<button type="submit">Add note</button>
</form>
"#,
    );

    if notes.is_empty() {
        body.push_str(r#"<p class="empty">No notes yet.</p>"#);
    } else {
        body.push_str("<ul class=\"notes\">\n");
        for note in notes {
            body.push_str(&format!(
                r#"<li id="note-{id}"><pre>{content}</pre> <a href="/edit/{id}">Edit</a> <a href="/delete/{id}">Delete</a></li>
"#,
                id = note.id,
                content = escape(&note.content),
            ));
        }
        body.push_str("</ul>");
    }

    layout("Your notes", Some(username), flash, &body)
}

pub fn edit_note(username: &str, note: &note::Model) -> String {
    let body = format!(
        r#"<form method="post" action="/edit/{id}">
<textarea name="note" rows="6">{content}</textarea>
<button type="submit">Save</button>
</form>
<p><a href="/dashboard">Cancel</a></p>"#,
        id = note.id,
        content = escape(&note.content),
    );
    layout("Edit note", Some(username), None, &body)
}

pub fn error_page(status: StatusCode) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = if status == StatusCode::NOT_FOUND {
        r#"<p>The requested page was not found.</p><p><a href="/">Home</a></p>"#
    } else {
        r#"<p>Something went wrong.</p><p><a href="/">Home</a></p>"#
    };
    layout(title, None, None, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("it's"), "it&#x27;s");
    }

    #[test]
    fn dashboard_escapes_note_content() {
        let notes = vec![note::Model {
            id: 3,
            content: "<b>bold</b>".to_string(),
            user_id: Some(1),
        }];
        let page = dashboard("alice", &notes, None);
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
        assert!(page.contains(r#"href="/edit/3""#));
        assert!(page.contains(r#"href="/delete/3""#));
    }

    #[test]
    fn flash_is_rendered_with_its_kind() {
        let page = login(Some(Flash::InvalidCredentials));
        assert!(page.contains(r#"class="flash error""#));
        assert!(page.contains("Invalid credentials!"));

        let page = home(Some(Flash::LoggedOut));
        assert!(page.contains(r#"class="flash info""#));
    }
}
