use owo_colors::{OwoColorize, Style};

/// Colors used by the report and by error messages. Everything is plain
/// text unless color was asked for with `--color`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    enabled: bool,
    exclude_undefined: bool,
}

impl Palette {
    pub fn new(enabled: bool, exclude_undefined: bool) -> Self {
        Self {
            enabled,
            exclude_undefined,
        }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bad(&self, text: &str) -> String {
        self.paint(text, Style::new().red().bold())
    }

    pub fn good(&self, text: &str) -> String {
        self.paint(text, Style::new().green().bold())
    }

    /// Missing entries only look bad when they are going to be dropped.
    pub fn missing(&self, text: &str) -> String {
        if self.exclude_undefined {
            self.bad(text)
        } else {
            self.good(text)
        }
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_untouched() {
        let p = Palette::plain();
        assert_eq!("d", p.bad("d"));
        assert_eq!("u", p.good("u"));
        assert_eq!("n", p.missing("n"));
        assert_eq!("oops", p.error("oops"));
    }

    #[test]
    fn enabled_adds_escapes() {
        let p = Palette::new(true, true);
        let d = p.bad("d");
        assert!(d.starts_with('\u{1b}'));
        assert!(d.contains('d'));
        assert_eq!(p.bad("n"), p.missing("n"));
        let keep = Palette::new(true, false);
        assert_eq!(keep.good("n"), keep.missing("n"));
    }
}
