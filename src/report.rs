/*!
 * HTML report generation for comment translations.
 *
 * Renders the stored translations as a single reviewable table, with each
 * row linking back to its point on the live map.
 */

use anyhow::Result;
use std::path::Path;

use crate::database::models::CommentReportRow;
use crate::file_utils::FileManager;

/// Render the comment translation report as a standalone HTML document
pub fn render_comment_report(rows: &[CommentReportRow], site_url: &str) -> String {
    let mut html = String::with_capacity(1024 + rows.len() * 256);

    html.push_str(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Comment translations</title>\n</head>\n<body>\n",
    );
    html.push_str("<table class=\"table table-striped\">\n<thead>\n<tr>");
    for heading in [
        "url",
        "country",
        "rating",
        "language",
        "is_original",
        "original_comment",
        "translated_comment",
        "translation_date",
    ] {
        html.push_str(&format!("<th>{}</th>", heading));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        let url = format!("{}/#{}", site_url.trim_end_matches('/'), row.point_id);

        html.push_str("<tr>");
        html.push_str(&format!(
            "<td><a href=\"{}\">{}</a></td>",
            escape_html(&url),
            row.point_id
        ));
        html.push_str(&format!(
            "<td>{}</td>",
            escape_html(row.country.as_deref().unwrap_or(""))
        ));
        html.push_str(&format!("<td>{}</td>", row.rating));
        html.push_str(&format!("<td>{}</td>", escape_html(&row.language)));
        html.push_str(&format!(
            "<td>{}</td>",
            if row.is_original { "Yes" } else { "No" }
        ));
        html.push_str(&format!("<td>{}</td>", escape_html(&row.original_comment)));
        html.push_str(&format!(
            "<td>{}</td>",
            escape_html(row.translated_comment.as_deref().unwrap_or(""))
        ));
        html.push_str(&format!("<td>{}</td>", escape_html(&row.translation_date)));
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

/// Write the comment translation report under the output directory
pub fn write_comment_report(
    output_dir: &Path,
    rows: &[CommentReportRow],
    site_url: &str,
) -> Result<std::path::PathBuf> {
    let path = output_dir.join("translations.html");
    FileManager::write_to_file(&path, &render_comment_report(rows, site_url))?;
    Ok(path)
}

/// Escape text for embedding in HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
