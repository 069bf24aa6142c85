//! HTTP handlers: dashboard page, status, control and voice toggle.

use crate::AppState;
use axum::{
    extract::{Extension, Json},
    response::Html,
};
use robot_core::Lexicon;
use robot_types::Snapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const DASHBOARD_TEMPLATE: &str = include_str!("../templates/index.html");

/// Request body for `POST /control`.
///
/// Any well-formed JSON is accepted. A field that is missing, null or not a
/// string reads as the empty string, which names no component and is not
/// the `on` action.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ControlRequest {
    pub component: String,
    pub action: String,
}

impl ControlRequest {
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            component: field("component"),
            action: field("action"),
        }
    }
}

/// Response body for `POST /voice/toggle`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceToggleResponse {
    /// Voice mode after the toggle.
    pub active: bool,
}

/// Serves the dashboard, pre-filled with the current state. The page then
/// polls `/status` every two seconds.
pub async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    let snapshot = state.dispatcher.store().snapshot();
    Html(render_dashboard(&snapshot, state.dispatcher.lexicon()))
}

pub async fn status_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.dispatcher.store().snapshot())
}

/// Switches one component, or everything off for `{"component": "all", "action": "off"}`.
///
/// Always answers with the snapshot taken right after the command, including
/// for unknown components (which change nothing but the last message).
pub async fn control_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<Snapshot> {
    let body = ControlRequest::from_json(&body);
    tracing::debug!(component = %body.component, action = %body.action, "control request");
    Json(state.dispatcher.dispatch_http(&body.component, &body.action))
}

pub async fn toggle_voice_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<VoiceToggleResponse> {
    let active = state.dispatcher.toggle_voice_mode();
    Json(VoiceToggleResponse { active })
}

/// Fills the dashboard template. Labels come from the lexicon so the page
/// speaks the configured language.
fn render_dashboard(snapshot: &Snapshot, lexicon: &Lexicon) -> String {
    let active = snapshot.voice_active;
    let labels = [
        ("{{title}}", lexicon.dashboard_title()),
        ("{{voice_button}}", lexicon.voice_button(active)),
        ("{{voice_enable}}", lexicon.voice_button(false)),
        ("{{voice_disable}}", lexicon.voice_button(true)),
        ("{{all_off}}", lexicon.all_off_button()),
        ("{{gpio_heading}}", lexicon.gpio_heading()),
    ];

    let mut page = DASHBOARD_TEMPLATE
        .replace("{{lang}}", lexicon.language().code())
        .replace("{{color}}", snapshot.color.hex())
        .replace("{{voice_class}}", if active { " active" } else { "" });
    for (placeholder, label) in labels {
        page = page.replace(placeholder, &escape_html(label));
    }
    // Last, so a message that spells a placeholder is left as typed.
    page.replace("{{message}}", &escape_html(&snapshot.message))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_core::RobotStore;
    use robot_types::Language;
    use serde_json::json;

    #[test]
    fn escapes_markup_in_messages() {
        assert_eq!(
            escape_html(r#"<b>"hi" & 'bye'</b>"#),
            "&lt;b&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn control_request_reads_only_string_fields() {
        let request = ControlRequest::from_json(&json!({"component": "led_red", "action": null}));
        assert_eq!(request.component, "led_red");
        assert_eq!(request.action, "");

        let request = ControlRequest::from_json(&json!({"component": 7, "action": ["on"]}));
        assert_eq!(request, ControlRequest::default());

        assert_eq!(ControlRequest::from_json(&json!("led_red")), ControlRequest::default());
    }

    #[test]
    fn template_has_every_placeholder() {
        for placeholder in [
            "{{lang}}",
            "{{color}}",
            "{{message}}",
            "{{title}}",
            "{{voice_class}}",
            "{{voice_button}}",
            "{{voice_enable}}",
            "{{voice_disable}}",
            "{{all_off}}",
            "{{gpio_heading}}",
        ] {
            assert!(DASHBOARD_TEMPLATE.contains(placeholder), "{placeholder}");
        }
    }

    #[test]
    fn dashboard_is_fully_localized() {
        let snapshot = RobotStore::new("{{title}}").snapshot();
        let page = render_dashboard(&snapshot, &Lexicon::new(Language::Spanish));
        assert!(page.contains("<html lang=\"es\">"));
        assert!(page.contains("<h1>Control Robot Raspberry Pi</h1>"));
        assert!(page.contains("data-all-off=\"APAGAR TODO\""));
        assert!(page.contains(">Activar control por voz</button>"));
        assert!(page.contains("<h3>Estado GPIO</h3>"));
        assert!(page.contains("<h2 id=\"lastMessage\">{{title}}</h2>"));
        for english in ["Robot Control Panel", "Enable voice control", "ALL OFF"] {
            assert!(!page.contains(english), "{english}");
        }
    }
}
