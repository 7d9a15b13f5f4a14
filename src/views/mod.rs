use crate::{dto::NoteListing, handlers::web::flash::Flash};

const STYLE: &str = "
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
.flash { padding: 0.5rem 1rem; border-radius: 4px; }
.flash.success { background: #e6f4ea; color: #1e4620; }
.flash.error { background: #fdecea; color: #611a15; }
.note { border-bottom: 1px solid #ddd; padding: 0.75rem 0; }
.note time { color: #666; font-size: 0.85rem; }
textarea { width: 100%; }
";

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn count_label(count: i64) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}

fn write_note(page: &mut String, note: &NoteListing) {
    let content = escape_html(&note.content);
    page.push_str(&format!(
        r#"<li class="note">
<time>{date}</time>
<form method="post" action="/edit/{id}">
<textarea name="content" rows="3">{content}</textarea>
<button type="submit">Save</button>
</form>
<form method="post" action="/delete/{id}">
<button type="submit">Delete</button>
</form>
</li>
"#,
        id = note.id,
        date = escape_html(&note.formatted_date),
    ));
}

/// Renders the list page.
pub fn render_index(notes: &[NoteListing], count: i64, flash: Option<Flash>) -> String {
    let mut page = String::new();

    page.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Notes</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Notes</h1>\n<p class=\"count\">{}</p>\n",
        count_label(count)
    ));

    if let Some(flash) = flash {
        page.push_str(&format!(
            "<p class=\"flash {}\">{}</p>\n",
            flash.category().as_str(),
            escape_html(flash.message())
        ));
    }

    page.push_str(
        r#"<form method="post" action="/add">
<textarea name="content" rows="3" placeholder="Write a note"></textarea>
<button type="submit">Add note</button>
</form>
"#,
    );

    if notes.is_empty() {
        page.push_str("<p class=\"empty\">No notes yet.</p>\n");
    } else {
        page.push_str("<ul class=\"notes\">\n");
        for note in notes {
            write_note(&mut page, note);
        }
        page.push_str("</ul>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}
