//! Server-side HTML for the gallery and error pages.
//!
//! All sheet and config text goes through `html_escape` before it reaches
//! the page.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::config::PageConfig;
use crate::recipe::Recipe;

use super::query::GalleryQuery;

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: Georgia, "Times New Roman", serif; color: #2c3e50; }
header { padding: 1.5rem 2rem 0; }
.layout { display: flex; gap: 2rem; padding: 1rem 2rem 2rem; }
aside { flex: 0 0 16rem; }
aside form { display: flex; flex-direction: column; gap: 0.5rem; }
aside select { min-height: 10rem; }
main { flex: 1; min-width: 0; }
.suggestion { background: #ffffff; padding: 20px; border-radius: 15px; border: 2px solid #e6e6e6; margin-bottom: 20px; display: flex; gap: 1.5rem; }
.suggestion img { max-width: 33%; border-radius: 10px; }
.gallery { display: grid; gap: 1.5rem; }
.card img { width: 100%; border-radius: 10px; }
.placeholder { background: #fff3cd; padding: 1rem; border-radius: 10px; }
.card hr { border: none; border-top: 1px solid #e6e6e6; }
.caption { color: #7f8c8d; font-size: 0.9rem; }
.notice { background: #e8f4fd; padding: 0.75rem; border-radius: 8px; }
.error { background: #fdecea; padding: 1rem; border-radius: 10px; white-space: pre-wrap; }
@media (max-width: 720px) {
  .layout { flex-direction: column; }
  aside { flex: none; }
  .gallery { grid-template-columns: 1fr !important; }
}
"#;

/// Everything the gallery page shows for one request.
#[derive(Debug, Clone, Copy)]
pub struct GalleryPage<'a> {
    pub page: &'a PageConfig,
    /// Tag vocabulary for the multi-select.
    pub tags: &'a [String],
    pub query: &'a GalleryQuery,
    /// Recipes to show, already filtered and ordered.
    pub recipes: &'a [&'a Recipe],
    pub suggestion: Option<&'a Recipe>,
}

/// Renders the full gallery document.
#[must_use]
pub fn render_gallery(view: &GalleryPage<'_>) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<form method="post" action="{}"><button type="submit">✨ Surprise Me!</button></form>"#,
        attr(&view.query.location("/suggest"))
    ));

    if let Some(recipe) = view.suggestion {
        body.push_str(&render_suggestion(recipe, view.query));
    }

    body.push_str(r#"<div class="layout">"#);
    body.push_str(&render_sidebar(view));
    body.push_str("<main><h2>All Recipes</h2>");

    if view.recipes.is_empty() {
        body.push_str(r#"<p class="notice">No recipes found. Try a different search!</p>"#);
    } else {
        body.push_str(&format!(
            r#"<div class="gallery" style="grid-template-columns: repeat({}, minmax(0, 1fr));">"#,
            view.page.columns.max(1)
        ));
        for recipe in view.recipes {
            body.push_str(&render_card(recipe));
        }
        body.push_str("</div>");
    }

    body.push_str("</main></div>");
    document(view.page, &body)
}

/// Renders a page explaining why the gallery cannot be shown.
#[must_use]
pub fn render_error_page(page: &PageConfig, heading: &str, message: &str) -> String {
    let body = format!(
        r#"<main style="padding: 0 2rem;"><h2>{}</h2><p class="error">{}</p></main>"#,
        text(heading),
        text(message)
    );
    document(page, &body)
}

fn document(page: &PageConfig, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{icon} {title}</title>
<style>{STYLE}</style>
</head>
<body style="background-color: {background};">
<header><h1>{heading}</h1></header>
{body}
</body>
</html>
"#,
        icon = text(&page.icon),
        title = text(&page.title),
        background = attr(&page.background),
        heading = text(&page.heading),
    )
}

fn render_suggestion(recipe: &Recipe, query: &GalleryQuery) -> String {
    let mut html = String::from(r#"<section class="suggestion">"#);

    if let Some(url) = recipe.image() {
        html.push_str(&format!(r#"<img src="{}" alt="">"#, attr(url)));
    }

    html.push_str("<div><h3>🌟 How about this?</h3>");
    html.push_str(&format!("<h2>{}</h2>", text(dish_label(recipe))));
    html.push_str(&format!(
        "<p>🏷️ <strong>Category:</strong> {}</p>",
        text(recipe.category.as_deref().unwrap_or_default())
    ));
    if let Some(notes) = recipe.notes.as_deref() {
        html.push_str(&format!(r#"<p class="notice">💡 {}</p>"#, text(notes)));
    }
    html.push_str(&format!(
        r#"<form method="post" action="{}"><button type="submit">Close Suggestion ✕</button></form>"#,
        attr(&query.location("/suggest/clear"))
    ));
    html.push_str("</div></section>");
    html
}

fn render_sidebar(view: &GalleryPage<'_>) -> String {
    let mut html = String::from(r#"<aside><h2>🔍 Find a Recipe</h2><form method="get" action="/">"#);

    html.push_str(r#"<label for="tag">Filter by Category:</label><select id="tag" name="tag" multiple>"#);
    for tag in view.tags {
        let selected = if view.query.is_tag_selected(tag) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            attr(tag),
            text(tag)
        ));
    }
    html.push_str("</select>");

    html.push_str(&format!(
        r#"<label for="q">Search by Name:</label><input id="q" type="search" name="q" value="{}" placeholder="{}">"#,
        attr(&view.query.search),
        attr(&view.page.search_placeholder)
    ));
    html.push_str(r#"<button type="submit">Apply</button></form></aside>"#);
    html
}

fn render_card(recipe: &Recipe) -> String {
    let mut html = String::from(r#"<article class="card">"#);

    match recipe.image() {
        Some(url) => html.push_str(&format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            attr(url),
            attr(dish_label(recipe))
        )),
        None => html.push_str(r#"<p class="placeholder">📸 Photo coming soon!</p>"#),
    }

    html.push_str(&format!("<h3>{}</h3>", text(dish_label(recipe))));
    if let Some(category) = recipe.category.as_deref() {
        html.push_str(&format!(r#"<p class="caption">🏷️ {}</p>"#, text(category)));
    }
    if let Some(notes) = recipe.notes.as_deref() {
        html.push_str(&format!("<p><em>{}</em></p>", text(notes)));
    }
    html.push_str("<hr></article>");
    html
}

fn dish_label(recipe: &Recipe) -> &str {
    recipe.dish.as_deref().unwrap_or("Untitled recipe")
}
