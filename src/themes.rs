use crate::models::ThemeInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub emoji: &'static str,
    /// Accent gradient used for the time blocks and primary buttons.
    pub gradient: &'static str,
    /// Page background gradient.
    pub background: &'static str,
}

pub static THEMES: [Theme; 7] = [
    Theme {
        name: "Wedding",
        emoji: "💒",
        gradient: "linear-gradient(135deg, #ec4899, #e11d48)",
        background: "linear-gradient(135deg, #fdf2f8, #ffe4e6)",
    },
    Theme {
        name: "Birthday",
        emoji: "🎂",
        gradient: "linear-gradient(135deg, #a855f7, #4f46e5)",
        background: "linear-gradient(135deg, #faf5ff, #e0e7ff)",
    },
    Theme {
        name: "New Year",
        emoji: "🎆",
        gradient: "linear-gradient(135deg, #eab308, #ea580c)",
        background: "linear-gradient(135deg, #fefce8, #ffedd5)",
    },
    Theme {
        name: "Baby",
        emoji: "👶",
        gradient: "linear-gradient(135deg, #06b6d4, #2563eb)",
        background: "linear-gradient(135deg, #ecfeff, #dbeafe)",
    },
    Theme {
        name: "Vacation",
        emoji: "✈️",
        gradient: "linear-gradient(135deg, #10b981, #0d9488)",
        background: "linear-gradient(135deg, #ecfdf5, #ccfbf1)",
    },
    Theme {
        name: "Event",
        emoji: "🎉",
        gradient: "linear-gradient(135deg, #ef4444, #db2777)",
        background: "linear-gradient(135deg, #fef2f2, #fce7f3)",
    },
    Theme {
        name: "Simple",
        emoji: "⏰",
        gradient: "linear-gradient(135deg, #4b5563, #334155)",
        background: "linear-gradient(135deg, #f9fafb, #f1f5f9)",
    },
];

/// Falls back to the first theme for any index outside the catalog.
pub fn clamp_index(index: usize) -> usize {
    if index < THEMES.len() { index } else { 0 }
}

pub fn theme_at(index: usize) -> &'static Theme {
    &THEMES[clamp_index(index)]
}

pub fn catalog() -> Vec<ThemeInfo> {
    (0..THEMES.len()).map(theme_info).collect()
}

pub fn theme_info(index: usize) -> ThemeInfo {
    let index = clamp_index(index);
    let theme = &THEMES[index];
    ThemeInfo {
        index,
        name: theme.name,
        emoji: theme.emoji,
        gradient: theme.gradient,
        background: theme.background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_index_falls_back_to_first() {
        assert_eq!(clamp_index(6), 6);
        assert_eq!(clamp_index(7), 0);
        assert_eq!(clamp_index(usize::MAX), 0);
        assert_eq!(theme_at(42).name, "Wedding");
    }

    #[test]
    fn catalog_keeps_order() {
        let names: Vec<_> = catalog().iter().map(|theme| theme.name).collect();
        assert_eq!(
            names,
            ["Wedding", "Birthday", "New Year", "Baby", "Vacation", "Event", "Simple"]
        );
        assert!(catalog().iter().enumerate().all(|(i, theme)| theme.index == i));
    }
}
