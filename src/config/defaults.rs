pub fn title() -> String {
    "Mr. Qizhi".to_string()
}

pub fn tagline() -> String {
    "AI · Urban Planning · Gov-Tech · Digital Transformation · Digital Twin".to_string()
}

pub fn headline() -> String {
    "AI and Urban Planning Insights".to_string()
}

pub fn description() -> String {
    "Mr. Qizhi - Expert in urban planning, AI technology, Gov-Tech, digital transformation, smart cities, and digital twins.".to_string()
}

pub fn keywords() -> String {
    "AI, urban planning, Gov-Tech, digital transformation, smart city, digital twin, government"
        .to_string()
}

pub fn base_url() -> String {
    "https://ai.liexpress.cc".to_string()
}

pub fn language() -> String {
    "en".to_string()
}

pub fn copyright() -> String {
    "© 2026 Mr. Qizhi | AI Powered Content".to_string()
}

pub fn post_dir() -> String {
    "post".to_string()
}

pub fn data_dir() -> String {
    "data".to_string()
}

pub fn template_dir() -> String {
    "templates".to_string()
}

pub fn latest_limit() -> usize {
    60
}

pub fn topic_limit() -> usize {
    12
}

pub fn tag_limit() -> usize {
    12
}

pub fn about_heading() -> String {
    "About".to_string()
}

pub fn about_paragraphs() -> Vec<String> {
    vec![
        "Mr. Qizhi writes about AI, urban planning, Gov-Tech, digital transformation, and digital twin cities, with a focus on practical frameworks, delivery systems, and real-world tradeoffs.".to_string(),
        "If you're new here, start from the homepage (latest posts), then use Tags / Archive to browse by topic or time.".to_string(),
    ]
}
