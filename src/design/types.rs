use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationLevel {
    None,
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PixelDensity {
    Minimal,
    #[default]
    Normal,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NeonIntensity {
    Low,
    #[default]
    Medium,
    High,
}

/// User preferences for design generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignPreferences {
    pub dark_mode: bool,
    pub animation_level: AnimationLevel,
    pub high_contrast: bool,
    pub pixel_density: PixelDensity,
    pub neon_intensity: NeonIntensity,
}

impl Default for DesignPreferences {
    fn default() -> Self {
        DesignPreferences {
            dark_mode: true,
            animation_level: AnimationLevel::default(),
            high_contrast: false,
            pixel_density: PixelDensity::default(),
            neon_intensity: NeonIntensity::default(),
        }
    }
}

/// Design elements extracted from an inspiration image (or canned by the
/// fallback synthesizer). `colors` is ordered by prominence; the first three
/// entries are treated as primary/secondary/accent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignAnalysis {
    pub colors: Vec<String>,
    pub aesthetic: String,
    pub mood: String,
    pub layout_style: String,
    pub typography_suggestions: String,
    pub animation_ideas: String,
}

/// Request body for description-based generation.
#[derive(Debug, Clone, Deserialize)]
pub struct TextDesignRequest {
    pub description: String,
    #[serde(default)]
    pub preferences: Option<DesignPreferences>,
    #[serde(default)]
    pub current_css: Option<String>,
}

/// Response payload shared by both generation endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CssGenerationResponse {
    pub css: String,
    pub explanation: String,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// The closed CSS class vocabulary shared with the profile renderer.
/// Generated stylesheets may only target these selectors; the generation
/// system prompt renders its selector list from this table.
pub const PROFILE_SELECTORS: [(&str, &str); 13] = [
    ("pixelpage", "Main profile container"),
    ("profile-header", "Hero/banner area at the top"),
    ("profile-avatar", "User avatar/profile picture"),
    ("profile-bio", "About me / bio section"),
    ("top-friends", "Top friends display grid"),
    ("top-friends-item", "Individual friend card"),
    ("music-player", "Music widget/player"),
    ("photo-gallery", "Image gallery grid"),
    ("photo-gallery-item", "Individual photo"),
    ("guestbook", "Guestbook/comments section"),
    ("guestbook-entry", "Individual guestbook comment"),
    ("widget", "Generic widget container"),
    ("profile-badge", "Custom badges/achievements"),
];

/// The selector list in the form the generation system prompt embeds.
pub fn selector_vocabulary() -> String {
    PROFILE_SELECTORS
        .iter()
        .map(|(name, description)| format!("- .{name} - {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}
