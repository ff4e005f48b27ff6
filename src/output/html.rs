//! Static gallery page
//!
//! The whole document comes from [`render_html`]; nothing here touches the
//! filesystem or the clock.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::config::PageOptions;
use crate::consts::DATE_FORMAT;
use crate::core::WallpaperRecord;

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: var(--background);
            min-height: 100vh;
            padding: 20px;
            color: #2b4d45;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        header { text-align: center; color: var(--primary); margin-bottom: 40px; }
        header h1 { font-size: 3em; margin-bottom: 10px; }
        header p { font-size: 1.1em; opacity: 0.9; }
        .featured {
            background: white;
            border-radius: 12px;
            overflow: hidden;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
            margin-bottom: 40px;
        }
        .featured img { width: 100%; height: 400px; object-fit: cover; display: block; }
        .featured-info { padding: 30px; }
        .featured-info h2 { color: #333; margin-bottom: 15px; font-size: 2em; }
        .featured-info p { color: #666; line-height: 1.6; margin-bottom: 10px; }
        .featured-info .copyright {
            color: #999;
            font-size: 0.9em;
            margin-top: 15px;
            padding-top: 15px;
            border-top: 1px solid #eee;
        }
        .btn-download {
            display: inline-block;
            margin-top: 20px;
            padding: 12px 30px;
            background: linear-gradient(135deg, var(--primary) 0%, var(--secondary) 100%);
            color: white;
            text-decoration: none;
            border-radius: 6px;
            transition: transform 0.3s, box-shadow 0.3s;
        }
        .btn-download:hover { transform: translateY(-2px); box-shadow: 0 10px 20px rgba(0,0,0,0.2); }
        .wallpapers-title { color: var(--primary); font-size: 2em; margin-bottom: 30px; text-align: center; }
        .wallpapers-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 20px;
            margin-bottom: 40px;
        }
        .wallpaper-item {
            background: white;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
            transition: transform 0.3s, box-shadow 0.3s;
        }
        .wallpaper-item:hover { transform: translateY(-5px); box-shadow: 0 15px 40px rgba(0,0,0,0.3); }
        .wallpaper-item img { width: 100%; height: 200px; object-fit: cover; display: block; }
        .wallpaper-item .info { padding: 15px; }
        .wallpaper-item h3 { color: #333; margin-bottom: 8px; font-size: 1.1em; }
        .wallpaper-item .description {
            color: #666;
            font-size: 0.9em;
            margin-bottom: 10px;
            line-height: 1.5;
            display: -webkit-box;
            -webkit-line-clamp: 2;
            -webkit-box-orient: vertical;
            overflow: hidden;
        }
        .wallpaper-item .copyright { color: #999; font-size: 0.85em; }
        .wallpaper-item .date {
            color: #bbb;
            font-size: 0.8em;
            margin-top: 10px;
            padding-top: 10px;
            border-top: 1px solid #eee;
        }
        .wallpaper-item .btn-download { padding: 8px 16px; font-size: 0.9em; margin-top: 10px; }
        footer { text-align: center; color: #4b6b64; padding: 20px; opacity: 0.9; }
        footer a { color: var(--primary); }
        @media (max-width: 768px) {
            header h1 { font-size: 2em; }
            .featured img { height: 250px; }
            .wallpapers-grid { grid-template-columns: 1fr; }
        }
"#;

/// Render the gallery: `history[0]` as the featured entry, the rest as a grid.
///
/// `updated_at` is shown in the footer; for a given history and page the
/// output is otherwise byte-identical across calls.
pub(crate) fn render_html(
    history: &[WallpaperRecord],
    page: &PageOptions,
    updated_at: &str,
) -> String {
    let mut out = String::with_capacity(8 * 1024 + history.len() * 1024);
    let featured = history.first();

    out.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(out, "<html lang=\"{}\">", attr(&page.lang));
    let _ = writeln!(
        out,
        "<!-- wallpaper-id: {} timestamp: {} -->",
        text(featured.map(|r| r.id.as_str()).unwrap_or_default()),
        text(featured.map(|r| r.timestamp.as_str()).unwrap_or_default()),
    );
    out.push_str("<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(out, "    <title>{}</title>", text(&page.title));
    out.push_str("    <style>\n");
    let _ = writeln!(
        out,
        "        :root {{ --primary: {}; --secondary: {}; --background: {}; }}",
        css_value(&page.theme.primary),
        css_value(&page.theme.secondary),
        css_value(&page.theme.background),
    );
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");

    out.push_str("        <header>\n");
    let _ = writeln!(out, "            <h1>{}</h1>", text(&page.title));
    let _ = writeln!(out, "            <p>{}</p>", text(&page.description));
    out.push_str("        </header>\n");

    if let Some(record) = featured {
        render_featured(&mut out, record);
    }

    let rest = history.get(1..).unwrap_or_default();
    if !rest.is_empty() {
        out.push_str("        <h2 class=\"wallpapers-title\">History</h2>\n");
        out.push_str("        <div class=\"wallpapers-grid\">\n");
        for record in rest {
            render_card(&mut out, record);
        }
        out.push_str("        </div>\n");
    }

    out.push_str("        <footer>\n");
    out.push_str(
        "            <p>Images from <a href=\"https://www.bing.com\" target=\"_blank\">Bing</a></p>\n",
    );
    let _ = writeln!(out, "            <p>Last updated: {}</p>", text(updated_at));
    out.push_str("        </footer>\n    </div>\n</body>\n</html>\n");
    out
}

fn render_featured(out: &mut String, record: &WallpaperRecord) {
    out.push_str("        <section class=\"featured\">\n");
    if let Some(src) = record.display_src() {
        let _ = writeln!(
            out,
            "            <img src=\"{}\" alt=\"{}\">",
            attr(src),
            attr(&record.title)
        );
    }
    out.push_str("            <div class=\"featured-info\">\n");
    let _ = writeln!(out, "                <h2>{}</h2>", text(&record.title));
    let _ = writeln!(out, "                <p>{}</p>", text(&record.description));
    let _ = writeln!(
        out,
        "                <p class=\"copyright\">{}</p>",
        text(&record.copyright)
    );
    let _ = writeln!(
        out,
        "                <p class=\"date\">{}</p>",
        record.date.format(DATE_FORMAT)
    );
    if let Some(href) = record.download_href() {
        let _ = writeln!(
            out,
            "                <a href=\"{}\" target=\"_blank\" class=\"btn-download\">Download</a>",
            attr(href)
        );
    }
    out.push_str("            </div>\n        </section>\n");
}

fn render_card(out: &mut String, record: &WallpaperRecord) {
    out.push_str("            <article class=\"wallpaper-item\">\n");
    if let Some(src) = record.display_src() {
        let _ = writeln!(
            out,
            "                <img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            attr(src),
            attr(&record.title)
        );
    }
    out.push_str("                <div class=\"info\">\n");
    let _ = writeln!(out, "                    <h3>{}</h3>", text(&record.title));
    let _ = writeln!(
        out,
        "                    <p class=\"description\">{}</p>",
        text(&record.description)
    );
    let _ = writeln!(
        out,
        "                    <p class=\"copyright\">{}</p>",
        text(&record.copyright)
    );
    let _ = writeln!(
        out,
        "                    <p class=\"date\">{}</p>",
        record.date.format(DATE_FORMAT)
    );
    if let Some(href) = record.download_href() {
        let _ = writeln!(
            out,
            "                    <a href=\"{}\" target=\"_blank\" class=\"btn-download\">Download</a>",
            attr(href)
        );
    }
    out.push_str("                </div>\n            </article>\n");
}

/// Theme values land inside a `<style>` block; drop anything that could close it
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}
