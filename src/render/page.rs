//! Full HTML documents for the WebView.

use crate::history::HistoryNode;
use crate::render::cards::{escape_html, render_card, ViewOptions};

const STYLES: &str = concat!(
    ":root{--bg:#f4f5f7;--card:#fff;--fg:#1f2328;--muted:#6e7781;--border:#d8dee4;--pos:#1a7f37;--neg:#cf222e;--radius:12px;",
    "--font:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,Helvetica,Arial,sans-serif}",
    "*{margin:0;padding:0;box-sizing:border-box}",
    "body{font-family:var(--font);background:var(--bg);color:var(--fg);padding:16px;-webkit-text-size-adjust:100%}",
    "header{margin-bottom:12px}h1{font-size:20px;font-weight:600}",
    ".meta{color:var(--muted);font-size:12px;margin-top:2px}",
    ".cards{display:flex;flex-direction:column;gap:10px}",
    ".card{background:var(--card);border:1px solid var(--border);border-left:4px solid var(--pos);border-radius:var(--radius);padding:12px 14px}",
    ".card.neg{border-left-color:var(--neg)}",
    ".card-head{display:flex;justify-content:space-between;align-items:center;gap:12px}",
    ".card-title{font-size:15px;font-weight:600}.card-sub{color:var(--muted);font-size:13px}",
    ".card-amount{font-size:18px;font-weight:700;white-space:nowrap}",
    ".card-amount.pos{color:var(--pos)}.card-amount.neg{color:var(--neg)}",
    ".card-key{color:var(--muted);font-size:11px;margin-top:6px;font-family:ui-monospace,monospace}",
    ".card-fields{width:100%;margin-top:8px;border-collapse:collapse;font-size:12px}",
    ".card-fields th{text-align:left;color:var(--muted);font-weight:500;padding:2px 8px 2px 0;vertical-align:top;width:35%}",
    ".card-fields td{padding:2px 0;word-break:break-word}",
    ".empty{color:var(--muted);text-align:center;padding:32px 0}",
    ".error{color:var(--neg);text-align:center;padding:32px 0}",
    "body.compact{padding:8px}body.compact .cards{gap:6px}body.compact .card{padding:8px 10px}",
    "body.compact header{display:none}"
);

fn document(title: &str, body_class: &str, body: &str) -> String {
    let mut html = String::with_capacity(STYLES.len() + body.len() + 512);
    html.push_str("<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"UTF-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>");
    html.push_str(&escape_html(title));
    html.push_str("</title><style>");
    html.push_str(STYLES);
    html.push_str("</style></head><body");
    if !body_class.is_empty() {
        html.push_str(" class=\"");
        html.push_str(body_class);
        html.push('"');
    }
    html.push('>');
    html.push_str(body);
    html.push_str("</body></html>");
    html
}

/// Render the card list for `path`.
pub fn render_page(path: &str, nodes: &[HistoryNode], opts: &ViewOptions) -> String {
    let mut body = String::with_capacity(256 + nodes.len() * 512);
    body.push_str("<header><h1>");
    body.push_str(&escape_html(&opts.title));
    body.push_str("</h1><p class=\"meta\">");
    body.push_str(&escape_html(path));
    body.push_str(" &middot; ");
    body.push_str(&nodes.len().to_string());
    body.push_str(" registros</p></header><main class=\"cards\">");

    if nodes.is_empty() {
        body.push_str("<div class=\"empty\">Sin registros</div>");
    } else {
        for node in nodes {
            body.push_str(&render_card(node, opts));
        }
    }
    body.push_str("</main>");

    document(&opts.title, if opts.compact { "compact" } else { "" }, &body)
}

/// Minimal error document so the WebView shows something readable.
pub fn render_error_page(message: &str) -> String {
    let mut body = String::with_capacity(message.len() + 64);
    body.push_str("<div class=\"error\">");
    body.push_str(&escape_html(message));
    body.push_str("</div>");
    document("Error", "", &body)
}
