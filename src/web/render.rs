//! HTML rendering of controller pages

use std::fmt::Write;

use crate::trip::{
    DAILY_LABEL, HOTEL_LABEL, MAX_STAY_DAYS, MIN_DAILY_SPENDING_USD, MIN_STAY_DAYS, PURPOSE_LABEL,
    STAY_LABEL,
};
use crate::view::{
    Block, DisplayOptions, FormState, Page, Sidebar, View, HOTEL_HELP, PURPOSE_HELP,
};

const STYLE: &str = r#"
body { background-color: #FFF5E1; font-family: sans-serif; margin: 0; display: flex; }
nav { background-color: grey; padding: 15px; min-width: 220px; min-height: 100vh; }
nav a { display: block; color: black; margin-bottom: 8px; }
nav a.selected { font-weight: bold; }
main { padding: 30px; max-width: 760px; }
h1 { color: #FF6C00; }
.success { background: #dff0d8; padding: 12px; border-radius: 5px; }
.info { background: #d9edf7; padding: 12px; border-radius: 5px; }
.warning { background: #fcf8e3; padding: 12px; border-radius: 5px; }
.error { background: #f2dede; padding: 12px; border-radius: 5px; }
button { background-color: #FF8C00; color: black; font-weight: bold; border-radius: 5px; border: none; padding: 10px; width: 100%; }
button:hover { background-color: red; }
fieldset { border: none; padding: 0; margin-bottom: 12px; }
small { color: #555; }
"#;

/// Minimal escaping for text and attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `?tips=..&contributors=..` carrying the sidebar toggles between requests
pub fn query_string(display: &DisplayOptions) -> String {
    format!(
        "?tips={}&contributors={}",
        display.show_tips, display.show_contributors
    )
}

fn link(view: View, display: &DisplayOptions) -> String {
    format!("/{}{}", view.slug(), query_string(display))
}

pub fn page(page: &Page) -> String {
    let display = page.sidebar.display;
    let mut body = String::new();

    let _ = write!(body, "<h1>{}</h1>", escape(&page.title));
    for block in &page.blocks {
        body.push_str(&render_block(block, page.view, &display));
    }

    document(&page.title, &sidebar(&page.sidebar), &body)
}

/// Full-page error shown when the model could not be loaded
pub fn startup_error(message: &str) -> String {
    let body = format!(
        "<h1>Tourism Expenditure Prediction</h1><div class=\"error\">Error: {}</div>",
        escape(message)
    );
    document("Tourism Expenditure Prediction", "", &body)
}

fn document(title: &str, nav: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>{}<main>{}</main></body></html>",
        escape(title),
        STYLE,
        nav,
        body
    )
}

fn sidebar(sidebar: &Sidebar) -> String {
    let display = sidebar.display;
    let mut nav = String::from("<nav><h2>Main Menu</h2>");

    for view in View::ALL {
        let class = if view == sidebar.selected { " class=\"selected\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"{}\"{}>{}</a>",
            escape(&link(view, &display)),
            class,
            escape(view.label())
        );
    }
    nav.push_str("<hr>");

    let toggled_tips = DisplayOptions {
        show_tips: !display.show_tips,
        ..display
    };
    let _ = write!(
        nav,
        "<a href=\"{}\">{} Help Tips</a>",
        escape(&link(sidebar.selected, &toggled_tips)),
        if display.show_tips { "Hide" } else { "Show" }
    );
    if let Some(tip) = sidebar.tip {
        let _ = write!(nav, "<small>{}</small>", escape(tip));
    }

    let toggled_contributors = DisplayOptions {
        show_contributors: !display.show_contributors,
        ..display
    };
    let _ = write!(
        nav,
        "<a href=\"{}\">{} Project Contributors</a>",
        escape(&link(sidebar.selected, &toggled_contributors)),
        if display.show_contributors { "Hide" } else { "Show" }
    );
    if let Some(note) = sidebar.contributors {
        let _ = write!(nav, "<div class=\"info\">{}</div>", escape(note));
    }

    nav.push_str("</nav>");
    nav
}

fn render_block(block: &Block, view: View, display: &DisplayOptions) -> String {
    match block {
        Block::Heading(text) => format!("<h3>{}</h3>", escape(text)),
        Block::Text(text) => format!("<p>{}</p>", escape(text)),
        Block::Success(text) => format!("<div class=\"success\">{}</div>", escape(text)),
        Block::Info(text) => format!("<div class=\"info\">{}</div>", escape(text)),
        Block::Warning(text) => format!("<div class=\"warning\">{}</div>", escape(text)),
        Block::Error(text) => format!("<div class=\"error\">{}</div>", escape(text)),
        Block::Details {
            heading,
            items,
            note,
        } => {
            let mut html = format!("<div class=\"info\"><h3>{}</h3><ul>", escape(heading));
            for (label, value) in items {
                let _ = write!(
                    html,
                    "<li><strong>{}:</strong> {}</li>",
                    escape(label),
                    escape(value)
                );
            }
            html.push_str("</ul>");
            if let Some(note) = note {
                let _ = write!(html, "<p><em>Note: {}</em></p>", escape(note));
            }
            html.push_str("</div>");
            html
        }
        Block::PredictForm(form) => predict_form(form, view, display),
        Block::ClearSummaryButton => format!(
            "<form method=\"post\" action=\"{}\"><button type=\"submit\">Clear Summary</button></form>",
            escape(&format!("/summary/clear{}", query_string(display)))
        ),
    }
}

fn radio_group(name: &str, label: &str, help: &str, options: &[&str], selected: &str) -> String {
    let mut html = format!(
        "<fieldset><legend>{}</legend><small>{}</small><br>",
        escape(label),
        escape(help)
    );
    for option in options {
        let checked = if option.eq_ignore_ascii_case(selected) { " checked" } else { "" };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label> ",
            name,
            escape(option),
            checked,
            escape(option)
        );
    }
    html.push_str("</fieldset>");
    html
}

fn predict_form(form: &FormState, view: View, display: &DisplayOptions) -> String {
    let mut html = format!(
        "<form method=\"post\" action=\"{}\">",
        escape(&link(view, display))
    );
    html.push_str(&radio_group(
        "purpose",
        PURPOSE_LABEL,
        PURPOSE_HELP,
        &form.purpose_options,
        &form.purpose,
    ));
    let _ = write!(
        html,
        "<fieldset><label>{} <input type=\"number\" name=\"stay_days\" min=\"{:.1}\" max=\"{:.1}\" step=\"0.1\" value=\"{}\"></label></fieldset>",
        escape(STAY_LABEL),
        MIN_STAY_DAYS,
        MAX_STAY_DAYS,
        escape(&form.stay_days)
    );
    let _ = write!(
        html,
        "<fieldset><label>{} <input type=\"number\" name=\"daily_spending\" min=\"{:.1}\" step=\"any\" value=\"{}\"></label></fieldset>",
        escape(DAILY_LABEL),
        MIN_DAILY_SPENDING_USD,
        escape(&form.daily_spending)
    );
    html.push_str(&radio_group(
        "hotel_class",
        HOTEL_LABEL,
        HOTEL_HELP,
        &form.hotel_options,
        &form.hotel_class,
    ));
    html.push_str("<button type=\"submit\">Predict Total Expenditure</button></form>");
    html
}
