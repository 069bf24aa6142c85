//! Spoken and displayed phrases, per language.

use robot_types::{Component, Language};

/// Phrase book for one [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexicon {
    language: Language,
}

impl Lexicon {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Initial last message.
    pub fn waiting(&self) -> &'static str {
        match self.language {
            Language::English => "Waiting for commands...",
            Language::Spanish => "Esperando comandos...",
        }
    }

    /// Last message while the recognizer is capturing.
    pub fn listening(&self) -> &'static str {
        match self.language {
            Language::English => "Listening...",
            Language::Spanish => "Escuchando...",
        }
    }

    /// Last message after the recognizer could not be reached.
    pub fn recognition_error(&self) -> &'static str {
        match self.language {
            Language::English => "Recognition error",
            Language::Spanish => "Error de reconocimiento",
        }
    }

    pub fn component_switched(&self, component: Component, on: bool) -> String {
        let state = match (self.language, on) {
            (Language::English, true) => "on",
            (Language::English, false) => "off",
            (Language::Spanish, true) => "encendido",
            (Language::Spanish, false) => "apagado",
        };
        format!("{} {}", component.spoken_name(), state)
    }

    pub fn color_activated(&self, name: &str) -> String {
        match self.language {
            Language::English => format!("Color {} activated", name),
            Language::Spanish => format!("Color {} activado", name),
        }
    }

    pub fn all_off(&self) -> &'static str {
        match self.language {
            Language::English => "All components turned off",
            Language::Spanish => "Todos los componentes apagados",
        }
    }

    /// Status report listing the components that are on.
    pub fn status(&self, active: &[Component]) -> String {
        if active.is_empty() {
            return match self.language {
                Language::English => "All components are off".to_string(),
                Language::Spanish => "Todos los componentes están apagados".to_string(),
            };
        }
        let names = active
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        match self.language {
            Language::English => format!("Active: {}", names),
            Language::Spanish => format!("Activos: {}", names),
        }
    }

    pub fn unrecognized(&self) -> &'static str {
        match self.language {
            Language::English => "Command not recognized",
            Language::Spanish => "Comando no reconocido",
        }
    }

    pub fn voice_mode(&self, active: bool) -> &'static str {
        match (self.language, active) {
            (Language::English, true) => "Voice control enabled",
            (Language::English, false) => "Voice control disabled",
            (Language::Spanish, true) => "Control por voz activado",
            (Language::Spanish, false) => "Control por voz desactivado",
        }
    }

    /// Dashboard page title and heading.
    pub fn dashboard_title(&self) -> &'static str {
        match self.language {
            Language::English => "Robot Control Panel",
            Language::Spanish => "Control Robot Raspberry Pi",
        }
    }

    /// Voice button label while voice mode is `active`: it offers the opposite.
    pub fn voice_button(&self, active: bool) -> &'static str {
        match (self.language, active) {
            (Language::English, false) => "Enable voice control",
            (Language::English, true) => "Disable voice control",
            (Language::Spanish, false) => "Activar control por voz",
            (Language::Spanish, true) => "Desactivar control por voz",
        }
    }

    pub fn all_off_button(&self) -> &'static str {
        match self.language {
            Language::English => "ALL OFF",
            Language::Spanish => "APAGAR TODO",
        }
    }

    pub fn gpio_heading(&self) -> &'static str {
        match self.language {
            Language::English => "GPIO status",
            Language::Spanish => "Estado GPIO",
        }
    }

    /// Fallback announcement for bus payloads with no known prefix.
    pub fn message_received(&self, payload: &str) -> String {
        match self.language {
            Language::English => format!("Message received: {}", payload),
            Language::Spanish => format!("Mensaje recibido: {}", payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_announcements() {
        let es = Lexicon::new(Language::Spanish);
        assert_eq!(es.component_switched(Component::LedRed, true), "led red encendido");
        assert_eq!(es.component_switched(Component::Motor1, false), "motor1 apagado");

        let en = Lexicon::new(Language::English);
        assert_eq!(en.component_switched(Component::LedBlue, true), "led blue on");
    }

    #[test]
    fn status_report() {
        let es = Lexicon::new(Language::Spanish);
        assert_eq!(
            es.status(&[Component::LedRed, Component::Motor2]),
            "Activos: led_red, motor2"
        );
        assert_eq!(es.status(&[]), "Todos los componentes están apagados");
    }

    #[test]
    fn dashboard_labels_follow_language() {
        let es = Lexicon::new(Language::Spanish);
        assert_eq!(es.all_off_button(), "APAGAR TODO");
        assert_eq!(es.voice_button(false), "Activar control por voz");
        assert_eq!(es.voice_button(true), "Desactivar control por voz");

        let en = Lexicon::new(Language::English);
        assert_eq!(en.dashboard_title(), "Robot Control Panel");
        assert_eq!(en.gpio_heading(), "GPIO status");
    }

    #[test]
    fn voice_mode_wording_differs() {
        let lexicon = Lexicon::new(Language::English);
        assert_ne!(lexicon.voice_mode(true), lexicon.voice_mode(false));
    }
}
