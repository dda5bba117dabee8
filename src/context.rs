use std::cell::Cell;
use std::rc::Rc;

use crate::i18n::Language;
use crate::palette::Theme;

/// Language and theme shared by every mounted component. Passed explicitly;
/// there is no global instance.
#[derive(Debug, Default)]
pub struct UiContext {
    language: Cell<Language>,
    theme: Cell<Theme>,
}

impl UiContext {
    pub fn new(language: Language, theme: Theme) -> Rc<Self> {
        Rc::new(Self {
            language: Cell::new(language),
            theme: Cell::new(theme),
        })
    }

    pub fn language(&self) -> Language {
        self.language.get()
    }

    /// Returns true if the language changed.
    pub fn set_language(&self, language: Language) -> bool {
        self.language.replace(language) != language
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme.get().toggled();
        self.theme.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_change_is_reported() {
        let ctx = UiContext::new(Language::Ru, Theme::Dark);
        assert!(!ctx.set_language(Language::Ru));
        assert!(ctx.set_language(Language::Uz));
        assert_eq!(ctx.language(), Language::Uz);
    }

    #[test]
    fn theme_toggles() {
        let ctx = UiContext::new(Language::Ru, Theme::Dark);
        assert_eq!(ctx.toggle_theme(), Theme::Light);
        assert_eq!(ctx.theme(), Theme::Light);
    }
}
