//! Card rendering.
//!
//! Each `HistoryNode` becomes one card: a title, a subtitle, an amount with a
//! sign-based CSS class and, outside compact mode, the node key and a table of
//! its fields. Every interpolated value goes through `escape_html`.

use serde_json::Value;

use crate::config::ViewDefaults;
use crate::history::{FieldEntry, HistoryNode};

/// Presentational options for `/view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Page heading and card title fallback.
    pub title: String,
    /// Card subtitle fallback.
    pub sub: String,
    /// Suffix appended to amounts.
    pub unit: String,
    /// Field holding the card amount, matched case-insensitively.
    pub amount_key: String,
    /// Hide node keys and field tables.
    pub compact: bool,
}

impl ViewOptions {
    pub fn from_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            title: defaults.title.clone(),
            sub: defaults.sub.clone(),
            unit: defaults.unit.clone(),
            amount_key: defaults.amount_key.clone(),
            compact: false,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_defaults(&ViewDefaults::default())
    }
}

/// Truthy query flag: `1`, `true`, `yes`, `on`.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Render a value as display text. Strings are taken verbatim, `null` is
/// empty, nested values become compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Case-insensitive field lookup; `""` when absent.
pub fn get_field(children: &[FieldEntry], name: &str) -> String {
    children
        .iter()
        .find(|entry| entry.key.eq_ignore_ascii_case(name))
        .map(|entry| stringify(&entry.data))
        .unwrap_or_default()
}

pub fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Amount shown on a card: the configured field, else the first numeric
/// field, else the number of fields.
pub fn amount_of(node: &HistoryNode, opts: &ViewOptions) -> String {
    let explicit = get_field(&node.children, &opts.amount_key);
    if !explicit.trim().is_empty() {
        return explicit.trim().to_string();
    }

    node.children
        .iter()
        .map(|entry| stringify(&entry.data))
        .find(|s| is_numeric(s))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| node.children.len().to_string())
}

pub fn sign_class(amount: &str) -> &'static str {
    if amount.trim_start().starts_with('-') {
        "neg"
    } else {
        "pos"
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).into_owned()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Render one card fragment.
pub fn render_card(node: &HistoryNode, opts: &ViewOptions) -> String {
    let title = non_empty(get_field(&node.children, "title")).unwrap_or_else(|| opts.title.clone());
    let sub = non_empty(get_field(&node.children, "subtitle"))
        .or_else(|| non_empty(opts.sub.clone()))
        .unwrap_or_else(|| node.key.clone());

    let amount = amount_of(node, opts);
    let sign = sign_class(&amount);
    let amount_text = if opts.unit.is_empty() {
        amount.clone()
    } else {
        format!("{} {}", amount, opts.unit)
    };

    let mut html = String::with_capacity(256 + node.children.len() * 64);
    html.push_str("<div class=\"card ");
    html.push_str(sign);
    html.push_str("\"><div class=\"card-head\"><div class=\"card-text\"><div class=\"card-title\">");
    html.push_str(&escape_html(&title));
    html.push_str("</div><div class=\"card-sub\">");
    html.push_str(&escape_html(&sub));
    html.push_str("</div></div><div class=\"card-amount ");
    html.push_str(sign);
    html.push_str("\">");
    html.push_str(&escape_html(&amount_text));
    html.push_str("</div></div>");

    if !opts.compact {
        html.push_str("<div class=\"card-key\">");
        html.push_str(&escape_html(&node.key));
        html.push_str("</div>");

        if !node.children.is_empty() {
            html.push_str("<table class=\"card-fields\">");
            for entry in &node.children {
                html.push_str("<tr><th>");
                html.push_str(&escape_html(&entry.key));
                html.push_str("</th><td>");
                html.push_str(&escape_html(&stringify(&entry.data)));
                html.push_str("</td></tr>");
            }
            html.push_str("</table>");
        }
    }

    html.push_str("</div>");
    html
}
