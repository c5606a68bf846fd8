//! Single-page query form

use axum::{
    extract::{Query, State},
    response::Html,
};
use pulldown_cmark::{escape::escape_html, html, Event, Options, Parser};
use serde::Deserialize;

use crate::api::query::answer;
use crate::api::state::AppState;
use crate::api::types::ApiError;

pub const PAGE_TITLE: &str = "ChatCPG-demo";
pub const LOADING_MESSAGE: &str = "Generating summary...";

#[derive(Debug, Default, Deserialize)]
pub struct UiParams {
    pub query: Option<String>,
}

/// GET /
///
/// Without a (non-blank) `query` only the form is rendered and the pipeline is not touched.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<UiParams>,
) -> Result<Html<String>, ApiError> {
    let query = params.query.unwrap_or_default();

    if query.trim().is_empty() {
        return Ok(Html(render_page(&query, None)?));
    }

    let result = answer(&state, &query).await?;

    Ok(Html(render_page(&query, Some(&result.reply))?))
}

/// Full page; `reply` is shown below the form when present
pub fn render_page(query: &str, reply: Option<&str>) -> Result<String, ApiError> {
    let mut escaped_query = String::with_capacity(query.len());
    escape_html(&mut escaped_query, query)
        .map_err(|e| ApiError::internal(format!("Failed to render page: {}", e)))?;

    let reply_section = reply
        .map(|r| format!(r#"<section class="reply">{}</section>"#, render_markdown(r)))
        .unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.5; }}
.warning {{ font-weight: bold; }}
label {{ display: block; font-size: 1.3rem; margin: 1.5rem 0 0.5rem; }}
input[type=text] {{ width: 100%; padding: 0.5rem; font-size: 1rem; box-sizing: border-box; }}
#loading {{ display: none; margin-top: 1rem; }}
form.busy + #loading {{ display: block; }}
.reply {{ margin-top: 1.5rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>This application takes a user query (e. g., clinical question) and generates a summary of evidence-based recommendations on geriatric trauma care, relevant to this query.</p>
<p class="warning">DO NOT ENTER PERSONAL INFORMATION OR PATIENT DATA!</p>
<p><u>Publication:</u> Kocar et al. 2024, submitted<br>
<u>GitHub:</u> <a href="https://github.com/IfGF-UUlm/CPG-summarization">https://github.com/IfGF-UUlm/CPG-summarization</a><br>
<u>Contact:</u> thomas.kocar@uni-ulm.de</p>
<form method="get" action="/" onsubmit="this.classList.add('busy')">
<label for="query">Enter your query here:</label>
<input type="text" id="query" name="query" value="{query}" autofocus>
</form>
<div id="loading">{loading}</div>
{reply}
</body>
</html>
"#,
        title = PAGE_TITLE,
        query = escaped_query,
        loading = LOADING_MESSAGE,
        reply = reply_section,
    ))
}

/// Render model output as markdown. Raw HTML in the reply is shown as text.
fn render_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
