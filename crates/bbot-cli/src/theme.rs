use bbot_core::LogKind;
use crossterm::style::Color;

#[derive(Clone)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub user_color: Color,
    pub assistant_color: Color,
    pub system_color: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            accent: Color::Rgb { r: 122, g: 162, b: 247 },
            muted: Color::Rgb { r: 100, g: 100, b: 100 },
            error: Color::Rgb { r: 247, g: 118, b: 142 },
            user_color: Color::Cyan,
            assistant_color: Color::Green,
            system_color: Color::Yellow,
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula",
            accent: Color::Rgb { r: 255, g: 121, b: 198 },
            muted: Color::Rgb { r: 98, g: 114, b: 164 },
            error: Color::Rgb { r: 255, g: 85, b: 85 },
            user_color: Color::Rgb { r: 139, g: 233, b: 253 },
            assistant_color: Color::Rgb { r: 80, g: 250, b: 123 },
            system_color: Color::Rgb { r: 241, g: 250, b: 140 },
        }
    }

    /// No colours at all, for dumb terminals and piped output.
    pub fn plain() -> Self {
        Self {
            name: "plain",
            accent: Color::Reset,
            muted: Color::Reset,
            error: Color::Reset,
            user_color: Color::Reset,
            assistant_color: Color::Reset,
            system_color: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "plain" => Self::plain(),
            _ => Self::dark(),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["dark", "dracula", "plain"]
    }

    pub fn color_for(&self, kind: LogKind) -> Color {
        match kind {
            LogKind::System => self.system_color,
            LogKind::User => self.user_color,
            LogKind::Assistant => self.assistant_color,
            LogKind::Error => self.error,
        }
    }
}
