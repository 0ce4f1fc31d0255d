use super::tokens::Category;

const MAX_DISPLAY_CHARS: usize = 8;

/// Tailwind classes used by the visualizer's token chips.
pub fn color_of(category: Category) -> &'static str {
    match category {
        Category::Literal => "bg-emerald-500/20 text-emerald-300 border-2 border-emerald-400/50",
        Category::Keyword => "bg-violet-500/20 text-violet-300 border-2 border-violet-400/50",
        Category::Operator => "bg-orange-500/20 text-orange-300 border-2 border-orange-400/50",
        Category::Identifier => "bg-blue-500/20 text-blue-300 border-2 border-blue-400/50",
        Category::Delimiter => "bg-gray-500/20 text-gray-300 border-2 border-gray-400/50",
        Category::Preprocessor => "bg-pink-500/20 text-pink-300 border-2 border-pink-400/50",
        Category::Comment => "bg-green-500/20 text-green-300 border-2 border-green-400/50",
        Category::Unknown => "bg-red-500/20 text-red-300 border-2 border-red-400/50",
    }
}

/// Shorten long values for display. Identifiers and keywords are never cut.
pub fn display_value_of(value: &str, category: Category) -> String {
    if matches!(category, Category::Identifier | Category::Keyword) {
        return value.to_string();
    }

    match value.char_indices().nth(MAX_DISPLAY_CHARS) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
