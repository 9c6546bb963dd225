use crate::NormalizedArticle;

/// Render the full Markdown document: YAML frontmatter, a blank line, the body.
///
/// Unset fields are omitted rather than written as null, so a document with no
/// resolvable date simply has no `date:` key. The output contains nothing
/// time-of-run dependent; rerunning over unchanged input is byte-identical.
pub fn build_markdown_document(article: &NormalizedArticle) -> String {
    let mut doc = String::with_capacity(article.body.len() + 256);
    doc.push_str("---\n");
    doc.push_str(&format!("title: {}\n", yaml_quote(&article.title)));
    if !article.description.is_empty() {
        doc.push_str(&format!(
            "description: {}\n",
            yaml_quote(&article.description)
        ));
    }
    if let Some(date) = article.date {
        doc.push_str(&format!("date: \"{}\"\n", date.format("%Y-%m-%d")));
    }
    doc.push_str(&format!("author: {}\n", yaml_quote(&article.author)));
    doc.push_str("---\n\n");
    doc.push_str(&article.body);
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    doc
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
