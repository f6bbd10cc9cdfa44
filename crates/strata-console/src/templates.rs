//! HTML templates for the console.
//!
//! Uses a simple template approach with Tailwind CSS and Font Awesome.

use crate::capability::CapabilityState;
use crate::notify::{Severity, Toast};
use crate::route::Route;

/// Legacy consoles linked from the frame unless hidden.
pub const LEGACY_LINKS: [(&str, &str); 2] = [
    ("Legacy coordinator console", "/legacy-coordinator-console.html"),
    ("Legacy overlord console", "/legacy-overlord-console.html"),
];

/// Everything the shared navigation frame needs.
pub struct Frame<'a> {
    /// Active tab; `None` on the loading page.
    pub active: Option<Route>,
    pub capability: CapabilityState,
    pub hide_legacy_links: bool,
    pub toasts: &'a [Toast],
}

/// Base HTML layout wrapper.
pub fn layout(title: &str, frame: &Frame<'_>, content: &str, auto_refresh: bool) -> String {
    let refresh = if auto_refresh {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {refresh}
    <title>{title} - Strata Console</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body class="bg-gray-50 min-h-screen">
    {NAV}

    <main class="p-6 lg:p-8">
        <div class="max-w-7xl mx-auto">
            {content}
        </div>
    </main>

    {TOASTS}
</body>
</html>"##,
        title = escape_html(title),
        NAV = header_bar(frame),
        TOASTS = toast_stack(frame.toasts),
    )
}

fn header_bar(frame: &Frame<'_>) -> String {
    let tabs: String = match frame.active {
        Some(active) => Route::TABLE
            .iter()
            .filter(|r| **r != Route::Home)
            .map(|route| {
                let class = if *route == active {
                    "bg-indigo-700"
                } else {
                    "hover:bg-indigo-500"
                };
                format!(
                    r##"<a href="{href}" class="flex items-center gap-2 px-3 py-2 rounded-lg {class}" data-route="{name}">
                    <i class="fas fa-{icon}"></i> {title}
                </a>"##,
                    href = route.path(),
                    name = route.name(),
                    icon = route.icon(),
                    title = route.title(),
                )
            })
            .collect(),
        None => String::new(),
    };

    let legacy: String = if frame.hide_legacy_links {
        String::new()
    } else {
        LEGACY_LINKS
            .iter()
            .map(|(label, href)| {
                format!(r##"<a href="{href}" class="text-xs text-indigo-100 hover:underline">{label}</a>"##)
            })
            .collect()
    };

    format!(
        r##"<nav class="bg-indigo-600 text-white px-4 py-3 sticky top-0 z-50 shadow-lg">
        <div class="flex items-center justify-between">
            <div class="flex items-center gap-4">
                <a href="/" class="font-semibold text-lg">Strata Console</a>
                {tabs}
            </div>
            <div class="flex items-center gap-4">
                {legacy}
                {badge}
            </div>
        </div>
    </nav>"##,
        badge = capability_badge(frame.capability),
    )
}

fn capability_badge(capability: CapabilityState) -> String {
    let (label, color) = match capability {
        CapabilityState::Unknown => ("Connecting", "gray"),
        CapabilityState::WorkingWithSql => ("SQL", "green"),
        CapabilityState::WorkingWithoutSql => ("Native only", "yellow"),
        CapabilityState::Broken => ("Unreachable", "red"),
    };
    format!(
        r##"<span class="flex items-center gap-1 text-sm" data-capability="{capability}">{}</span>"##,
        badge(label, color)
    )
}

fn toast_stack(toasts: &[Toast]) -> String {
    if toasts.is_empty() {
        return String::new();
    }
    let items: String = toasts
        .iter()
        .map(|toast| {
            let color = match toast.notification.severity {
                Severity::Error => "bg-red-500",
                Severity::Warning => "bg-yellow-500",
                Severity::Success => "bg-green-500",
                Severity::Info => "bg-indigo-500",
            };
            format!(
                r##"<div class="{color} text-white px-4 py-3 rounded-lg shadow-lg flex items-start gap-3 max-w-md" data-severity="{severity}">
                <span class="flex-1">{message}</span>
                <time class="text-xs opacity-75" datetime="{created}">{shown}</time>
                <form method="post" action="/toasts/{id}/dismiss">
                    <button type="submit" class="hover:opacity-75" title="Dismiss"><i class="fas fa-times"></i></button>
                </form>
            </div>"##,
                severity = toast.notification.severity.as_str(),
                message = escape_html(&toast.notification.message),
                id = toast.id,
                created = toast.created_at.to_rfc3339(),
                shown = toast.created_at.format("%H:%M:%S UTC"),
            )
        })
        .collect();
    format!(r##"<div id="toasts" class="fixed bottom-4 right-4 space-y-2 z-50">{items}</div>"##)
}

/// Placeholder shown until capability discovery resolves.
pub fn loading_page(toasts: &[Toast], hide_legacy_links: bool) -> String {
    let frame = Frame {
        active: None,
        capability: CapabilityState::Unknown,
        hide_legacy_links,
        toasts,
    };
    let content = format!(
        r##"<div id="loading" class="text-center py-12">
            {spinner}
            <p class="text-gray-500">Checking what the data system supports...</p>
        </div>"##,
        spinner = spinner()
    );
    layout("Loading", &frame, &content, true)
}

/// Card component.
pub fn card(title: &str, content: &str) -> String {
    format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 p-6 mb-6">
            <h2 class="text-lg font-semibold text-gray-900 mb-4">{title}</h2>
            {content}
        </div>"##,
        title = escape_html(title),
    )
}

/// Badge component.
pub fn badge(text: &str, color: &str) -> String {
    format!(
        r#"<span class="px-2 py-1 text-xs font-medium rounded-full bg-{color}-100 text-{color}-800">{text}</span>"#
    )
}

/// Two-column key/value table; values are escaped.
pub fn definition_list(rows: &[(&str, String)]) -> String {
    let items: String = rows
        .iter()
        .map(|(key, value)| {
            format!(
                r#"<div class="flex gap-4 py-2"><dt class="w-56 text-gray-500">{key}</dt><dd class="font-mono text-gray-900" data-prop="{key}">{value}</dd></div>"#,
                value = escape_html(value),
            )
        })
        .collect();
    format!(r#"<dl class="divide-y divide-gray-100">{items}</dl>"#)
}

/// Empty state component.
pub fn empty_state(icon: &str, title: &str, description: &str) -> String {
    format!(
        r##"<div class="text-center py-12">
            <i class="fas fa-{icon} text-4xl text-gray-400 mb-4"></i>
            <h3 class="text-lg font-medium text-gray-900">{title}</h3>
            <p class="mt-1 text-gray-500">{description}</p>
        </div>"##
    )
}

/// Form posting to a navigation action.
///
/// `fields` are `(name, label, prefilled value)`; an empty label makes the
/// field hidden.
pub fn action_form(action: &str, button: &str, fields: &[(&str, &str, &str)]) -> String {
    let inputs: String = fields
        .iter()
        .map(|(name, label, value)| {
            let value = escape_html(value);
            if label.is_empty() {
                format!(r#"<input type="hidden" name="{name}" value="{value}">"#)
            } else {
                format!(
                    r#"<label class="flex flex-col text-sm text-gray-600">{label}
                    <input type="text" name="{name}" value="{value}" class="mt-1 px-3 py-2 border border-gray-300 rounded-lg">
                </label>"#
                )
            }
        })
        .collect();
    format!(
        r##"<form method="post" action="{action}" class="flex items-end gap-3 mb-3">
            {inputs}
            <button type="submit" class="bg-indigo-600 hover:bg-indigo-700 text-white px-4 py-2 rounded-lg font-medium">{button}</button>
        </form>"##
    )
}

/// Loading spinner.
pub fn spinner() -> &'static str {
    r##"<div class="flex items-center justify-center py-8">
        <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-indigo-600"></div>
    </div>"##
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
