use crate::design::types::{AnimationLevel, DesignAnalysis, DesignPreferences};

pub const MOCK_PALETTE: [&str; 5] = ["#FF006E", "#8338EC", "#3A86FF", "#FB5607", "#FFBE0B"];

/// Substitutes for missing primary/secondary/accent slots, and the palette
/// reported when hex extraction over generated CSS comes up empty.
pub const DEFAULT_PALETTE: [&str; 3] = ["#FF006E", "#8338EC", "#3A86FF"];

const KEYFRAMES: &str = "
@keyframes glow-pulse {
  0%, 100% { filter: drop-shadow(0 0 8px var(--glow-color)); }
  50% { filter: drop-shadow(0 0 16px var(--glow-color)); }
}

@keyframes float {
  0%, 100% { transform: translateY(0px); }
  50% { transform: translateY(-10px); }
}
";

/// Canned analysis used whenever the vendor path is skipped or fails.
pub fn analysis() -> DesignAnalysis {
    DesignAnalysis {
        colors: MOCK_PALETTE.iter().map(|c| c.to_string()).collect(),
        aesthetic: "vibrant cyberpunk with neon accents".to_string(),
        mood: "energetic and futuristic".to_string(),
        layout_style: "centered with dynamic asymmetric elements".to_string(),
        typography_suggestions: "bold geometric sans-serif with glowing effects".to_string(),
        animation_ideas: "subtle pulsing glows, smooth hover transitions, floating elements"
            .to_string(),
    }
}

/// Deterministic CSS template over the closed selector set. A pure function
/// of its two arguments: the same analysis and preferences always produce
/// byte-identical output.
pub fn generate_css(analysis: &DesignAnalysis, preferences: &DesignPreferences) -> String {
    let primary = analysis
        .colors
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_PALETTE[0]);
    let secondary = analysis
        .colors
        .get(1)
        .map(String::as_str)
        .unwrap_or(DEFAULT_PALETTE[1]);
    let accent = analysis
        .colors
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_PALETTE[2]);

    let header_animation = if preferences.animation_level == AnimationLevel::High {
        "\n  animation: glow-pulse 3s ease-in-out infinite;"
    } else {
        ""
    };

    let animation_keyframes = if preferences.animation_level != AnimationLevel::None {
        KEYFRAMES
    } else {
        ""
    };

    format!(
        r#"/* PixelBoxx Profile - {aesthetic} */
:root {{
  --primary-color: {primary};
  --secondary-color: {secondary};
  --accent-color: {accent};
  --glow-color: {primary};
  --bg-dark: #0a0e27;
  --text-light: #ffffff;
  --border-width: 4px;
  --pixel-size: 8px;
}}

.pixelpage {{
  background: linear-gradient(135deg, var(--bg-dark) 0%, #1a1f3a 100%);
  color: var(--text-light);
  font-family: 'Courier New', monospace;
  padding: var(--pixel-size);
  image-rendering: pixelated;
}}

.profile-header {{
  background: linear-gradient(90deg, var(--primary-color) 0%, var(--secondary-color) 100%);
  padding: calc(var(--pixel-size) * 4);
  position: relative;
  box-shadow:
    0 0 0 var(--border-width) var(--accent-color),
    0 var(--pixel-size) 0 var(--border-width) rgba(0,0,0,0.3);
  text-align: center;{header_animation}
}}

.profile-avatar {{
  border: var(--border-width) solid var(--accent-color);
  box-shadow:
    0 0 20px var(--glow-color),
    inset 0 0 20px rgba(0,0,0,0.3);
  image-rendering: pixelated;
  border-radius: 0;
}}

.profile-bio {{
  background: rgba(0, 0, 0, 0.6);
  border: var(--border-width) solid var(--primary-color);
  padding: calc(var(--pixel-size) * 3);
  margin: calc(var(--pixel-size) * 2) 0;
  box-shadow:
    0 0 0 2px var(--accent-color),
    0 var(--pixel-size) 20px rgba(0,0,0,0.5);
  line-height: 1.6;
}}

.top-friends {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
  gap: var(--pixel-size);
  margin: calc(var(--pixel-size) * 2) 0;
}}

.top-friends-item {{
  background: rgba(0, 0, 0, 0.7);
  border: 2px solid var(--secondary-color);
  padding: var(--pixel-size);
  text-align: center;
  transition: transform 0.3s ease, box-shadow 0.3s ease;
}}

.top-friends-item:hover {{
  transform: translateY(-4px);
  box-shadow:
    0 0 20px var(--secondary-color),
    0 var(--pixel-size) 0 var(--secondary-color);
}}

.photo-gallery {{
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  gap: calc(var(--pixel-size) * 2);
  margin: calc(var(--pixel-size) * 2) 0;
}}

.photo-gallery-item {{
  border: var(--border-width) solid var(--accent-color);
  box-shadow: 0 0 15px rgba(0,0,0,0.5);
  transition: transform 0.3s ease;
  image-rendering: pixelated;
}}

.photo-gallery-item:hover {{
  transform: scale(1.05);
  box-shadow: 0 0 25px var(--glow-color);
}}

.guestbook {{
  background: rgba(0, 0, 0, 0.5);
  border: var(--border-width) solid var(--primary-color);
  padding: calc(var(--pixel-size) * 2);
  margin: calc(var(--pixel-size) * 2) 0;
}}

.guestbook-entry {{
  background: rgba(255, 255, 255, 0.05);
  border-left: 4px solid var(--accent-color);
  padding: var(--pixel-size);
  margin: var(--pixel-size) 0;
}}

.music-player {{
  background: linear-gradient(135deg, var(--primary-color) 0%, var(--secondary-color) 100%);
  border: var(--border-width) solid var(--accent-color);
  padding: calc(var(--pixel-size) * 2);
  text-align: center;
  box-shadow:
    0 0 30px var(--glow-color),
    inset 0 0 20px rgba(0,0,0,0.3);
}}
{animation_keyframes}
@media (max-width: 768px) {{
  .pixelpage {{
    padding: calc(var(--pixel-size) / 2);
  }}

  .top-friends {{
    grid-template-columns: repeat(2, 1fr);
  }}

  .photo-gallery {{
    grid-template-columns: repeat(2, 1fr);
  }}
}}
"#,
        aesthetic = analysis.aesthetic,
    )
}

/// Fallback for description-based generation: canned analysis through the
/// template, with an explanation echoing the first 100 characters of the
/// description.
pub fn css_from_description(
    description: &str,
    preferences: &DesignPreferences,
) -> (String, String) {
    let preview: String = description.chars().take(100).collect();
    let explanation = format!(
        "Created a design inspired by your description: '{preview}...'. \
         The design uses a pixel art aesthetic with neon accents and smooth animations."
    );

    let canned = analysis();
    (generate_css(&canned, preferences), explanation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_is_byte_deterministic() {
        let canned = analysis();
        let preferences = DesignPreferences::default();
        assert_eq!(
            generate_css(&canned, &preferences),
            generate_css(&canned, &preferences)
        );
    }

    #[test]
    fn palette_slots_fall_back_to_defaults() {
        let sparse = DesignAnalysis {
            colors: vec!["#123456".to_string()],
            ..analysis()
        };
        let css = generate_css(&sparse, &DesignPreferences::default());
        assert!(css.contains("--primary-color: #123456;"));
        assert!(css.contains("--secondary-color: #8338EC;"));
        assert!(css.contains("--accent-color: #3A86FF;"));
    }

    #[test]
    fn no_keyframes_when_animations_are_off() {
        let preferences = DesignPreferences {
            animation_level: AnimationLevel::None,
            ..DesignPreferences::default()
        };
        let css = generate_css(&analysis(), &preferences);
        assert!(!css.contains("@keyframes"));
        assert!(!css.contains("animation:"));
    }

    #[test]
    fn medium_animation_gets_keyframes_but_no_header_animation() {
        let css = generate_css(&analysis(), &DesignPreferences::default());
        assert!(css.contains("@keyframes glow-pulse"));
        assert!(css.contains("@keyframes float"));
        assert!(!css.contains("animation: glow-pulse 3s ease-in-out infinite;"));
    }

    #[test]
    fn high_animation_animates_the_header() {
        let preferences = DesignPreferences {
            animation_level: AnimationLevel::High,
            ..DesignPreferences::default()
        };
        let css = generate_css(&analysis(), &preferences);
        assert!(css.contains("animation: glow-pulse 3s ease-in-out infinite;"));
    }

    #[test]
    fn styles_every_mock_selector() {
        let css = generate_css(&analysis(), &DesignPreferences::default());
        for selector in [
            ".pixelpage",
            ".profile-header",
            ".profile-avatar",
            ".profile-bio",
            ".top-friends",
            ".top-friends-item",
            ".photo-gallery",
            ".photo-gallery-item",
            ".guestbook",
            ".guestbook-entry",
            ".music-player",
        ] {
            assert!(css.contains(&format!("{selector} {{")), "missing {selector}");
        }
    }

    #[test]
    fn includes_mobile_breakpoint() {
        let css = generate_css(&analysis(), &DesignPreferences::default());
        assert!(css.contains("@media (max-width: 768px)"));
    }

    #[test]
    fn description_explanation_echoes_first_100_chars() {
        let description = "A glowing cyberpunk sunset over a neon city skyline, with rain-slick \
                           streets reflecting magenta holograms and distant arcology towers";
        let (_, explanation) = css_from_description(description, &DesignPreferences::default());
        let preview: String = description.chars().take(100).collect();
        assert!(explanation.contains(&preview));
    }
}
