// src/web/render.rs
// Page rendering. A pure function of the session snapshot: no I/O, no clock.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use strum::IntoEnumIterator;

use crate::chat::{Notice, NoticeLevel};
use crate::llm::Model;
use crate::memory::{MAX_MEMORY_LENGTH, MIN_MEMORY_LENGTH};
use crate::persona::Persona;
use crate::session::SessionState;

pub const PAGE_TITLE: &str = "Groq Chat Assistant";

/// Everything the page shows
pub struct PageView<'a> {
    pub session: &'a SessionState,
    pub notice: Option<&'a Notice>,
    pub now: DateTime<Utc>,
}

const STYLE: &str = "
body { font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 1rem; background: #f0f2f6; }
main { flex: 1; padding: 1rem 2rem; max-width: 60rem; }
label { display: block; margin-top: 0.75rem; font-size: 0.9rem; }
select, input, textarea { width: 100%; box-sizing: border-box; }
.human { background: #e8f0fe; padding: 0.5rem; border-radius: 4px; white-space: pre-wrap; }
.ai { background: #e6f4ea; padding: 0.5rem; border-radius: 4px; white-space: pre-wrap; }
.notice { padding: 0.5rem; border-radius: 4px; margin: 0.5rem 0; }
.notice-success { background: #e6f4ea; }
.notice-warning { background: #fef7e0; }
.notice-error { background: #fce8e6; }
.stats { display: flex; gap: 2rem; }
.actions { display: flex; gap: 0.5rem; justify-content: flex-end; margin-top: 0.5rem; }
footer { margin-top: 2rem; border-top: 1px solid #ddd; padding-top: 0.5rem; color: #555; }
";

/// Render the whole page
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);

    render_sidebar(&mut html, view.session);

    html.push_str("<main>\n");
    let _ = writeln!(html, "<h1>🤖 {}</h1>", PAGE_TITLE);
    render_stats(&mut html, view.session, view.now);
    html.push_str(
        "<form method=\"post\" action=\"/clear\"><button type=\"submit\">🗑️ Clear Chat History</button></form>\n",
    );
    render_history(&mut html, view.session);
    if let Some(notice) = view.notice {
        render_notice(&mut html, notice);
    }
    render_input(&mut html);
    render_footer(&mut html, view.session);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, session: &SessionState) {
    html.push_str("<aside>\n<h2>Chat Settings</h2>\n<form method=\"post\" action=\"/settings\">\n");

    html.push_str("<label for=\"api_key\">Enter your Groq API Key</label>\n");
    html.push_str("<input type=\"password\" id=\"api_key\" name=\"api_key\" autocomplete=\"off\">\n");
    if session.has_api_key() {
        html.push_str("<small>API key set for this session</small>\n");
    }

    html.push_str("<label for=\"model\">Choose a model</label>\n<select id=\"model\" name=\"model\">\n");
    for model in Model::iter() {
        let id = model.id();
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            encode_double_quoted_attribute(&id),
            selected(model == session.selected_model),
            encode_text(&id)
        );
    }
    html.push_str("</select>\n");

    let k = session.memory_length.get();
    let _ = writeln!(
        html,
        "<label for=\"memory_length\">Conversation memory (messages): {k}</label>\n\
         <input type=\"range\" id=\"memory_length\" name=\"memory_length\" min=\"{}\" max=\"{}\" value=\"{k}\">",
        MIN_MEMORY_LENGTH, MAX_MEMORY_LENGTH
    );

    html.push_str(
        "<label for=\"persona\">Select conversation style:</label>\n<select id=\"persona\" name=\"persona\">\n",
    );
    for persona in Persona::iter() {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            persona,
            selected(persona == session.selected_persona),
            persona.label()
        );
    }
    html.push_str("</select>\n<div class=\"actions\"><button type=\"submit\">Apply</button></div>\n");
    html.push_str("</form>\n</aside>\n");
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected { " selected" } else { "" }
}

fn render_stats(html: &mut String, session: &SessionState, now: DateTime<Utc>) {
    let Some(stats) = session.stats(now) else {
        return;
    };
    html.push_str("<section class=\"stats-panel\">\n<h3>📊 Chat Statistics</h3>\n<div class=\"stats\">\n");
    let _ = writeln!(
        html,
        "<div><small>Messages</small><div id=\"stat-messages\">{}</div></div>",
        stats.messages
    );
    let _ = writeln!(
        html,
        "<div><small>Duration</small><div id=\"stat-duration\">{}</div></div>",
        stats.duration_label()
    );
    html.push_str("</div>\n</section>\n");
}

fn render_history(html: &mut String, session: &SessionState) {
    html.push_str("<section class=\"history\">\n");
    let persona = session.selected_persona.label();
    for message in &session.chat_history {
        let _ = writeln!(
            html,
            "<div class=\"turn\">\n<p>You:</p>\n<div class=\"human\">{}</div>\n\
             <p>Assistant ({} mode):</p>\n<div class=\"ai\">{}</div>\n</div>",
            encode_text(&message.human),
            persona,
            encode_text(&message.ai)
        );
    }
    html.push_str("</section>\n");
}

fn render_notice(html: &mut String, notice: &Notice) {
    let class = match notice.level {
        NoticeLevel::Success => "notice-success",
        NoticeLevel::Warning => "notice-warning",
        NoticeLevel::Error => "notice-error",
    };
    let _ = writeln!(
        html,
        "<div class=\"notice {}\" role=\"status\">{}</div>",
        class,
        encode_text(&notice.text)
    );
}

fn render_input(html: &mut String) {
    html.push_str("<h3>Your Message</h3>\n");
    html.push_str("<form method=\"post\" action=\"/send\" id=\"send-form\">\n");
    html.push_str(
        "<textarea name=\"message\" rows=\"4\" placeholder=\"Type your message here...\"></textarea>\n",
    );
    html.push_str("<div class=\"actions\">\n<button type=\"submit\">📩 Send</button>\n");
    html.push_str("<button type=\"submit\" formaction=\"/new-topic\">🆕 New Topic</button>\n</div>\n");
    html.push_str("</form>\n");
}

fn render_footer(html: &mut String, session: &SessionState) {
    let _ = writeln!(
        html,
        "<footer>Using Groq AI with {} persona | Memory: {} messages</footer>",
        session.selected_persona,
        session.memory_length
    );
}
