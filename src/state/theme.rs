//! Accent color themes

/// A named accent color and its hover shade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub color: &'static str,
    pub hover: &'static str,
}

pub static THEMES: &[Theme] = &[
    Theme {
        name: "Black",
        color: "slate-900",
        hover: "black",
    },
    Theme {
        name: "Red",
        color: "red-600",
        hover: "red-700",
    },
    Theme {
        name: "Emerald",
        color: "emerald-600",
        hover: "emerald-700",
    },
    Theme {
        name: "Amber",
        color: "amber-500",
        hover: "amber-600",
    },
    Theme {
        name: "Indigo",
        color: "indigo-600",
        hover: "indigo-700",
    },
    Theme {
        name: "Rose",
        color: "rose-600",
        hover: "rose-700",
    },
];

impl Theme {
    /// Find a theme by name, ignoring case
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("emerald").unwrap().color, "emerald-600");
        assert!(Theme::by_name("purple").is_none());
        assert_eq!(Theme::default().name, "Black");
    }
}
