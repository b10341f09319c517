//! Generated entry document (`index.html`).

use lume_bundler::BuildMode;

/// Render the entry document for `mode`.
///
/// Production loads the bundle as a classic script. Development loads the
/// live-update runtime as a module, which imports the bundle itself.
pub fn entry_document(mode: BuildMode, title: &str) -> String {
    let title = escape_html(title);
    let (title, script) = match mode {
        BuildMode::Production => (title, r#"<script src="./bundle.js"></script>"#),
        BuildMode::Development => (
            format!("dev - {title}"),
            r#"<script type="module" src="./hmr-client.js"></script>"#,
        ),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <link rel="stylesheet" href="./index.css">
  </head>
  <body>
    <div id="root"></div>
    {script}
  </body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
