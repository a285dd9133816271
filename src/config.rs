use std::env;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub api_key: String,
    pub anthropic_api_key: String,
    pub enable_mock_responses: bool,
    pub claude_model: String,
    pub claude_analysis_max_tokens: u32,
    pub claude_generation_max_tokens: u32,
    pub claude_request_timeout_seconds: u64,
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            host: env_string("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            api_key: env_string("API_KEY", ""),
            anthropic_api_key: env_string("ANTHROPIC_API_KEY", ""),
            enable_mock_responses: env_bool("ENABLE_MOCK_RESPONSES", true),
            claude_model: env_string("CLAUDE_MODEL", "claude-opus-5"),
            claude_analysis_max_tokens: env_u32("CLAUDE_ANALYSIS_MAX_TOKENS", 1024),
            claude_generation_max_tokens: env_u32("CLAUDE_GENERATION_MAX_TOKENS", 4096),
            claude_request_timeout_seconds: env_u64("CLAUDE_REQUEST_TIMEOUT_SECONDS", 60),
        })
    }
}

/// System prompt for CSS generation. `{selector_vocabulary}` is filled in
/// from `PROFILE_SELECTORS` when the service is constructed.
pub const DESIGN_SYSTEM_PROMPT: &str = r#"You are a creative web designer specializing in PixelBoxx profile customization.

PixelBoxx is a 2025 MySpace revival with a PIXEL ART, NEON, RETRO-FUTURISTIC aesthetic.

Your role is to generate creative, production-quality CSS that:
- Captures the user's desired aesthetic while maintaining the PixelBoxx vibe
- Uses CSS custom properties (variables) for easy customization
- Includes smooth animations and transitions where appropriate
- Is optimized for both desktop and mobile devices
- Is creative, bold, and memorable
- Uses the pixel art aesthetic (pixel borders, 8-bit inspired elements)
- Incorporates neon colors and glowing effects
- Has a retro-futuristic feel (80s/90s nostalgia meets modern web)

AVAILABLE CSS SELECTORS (scope all CSS to these):
{selector_vocabulary}

DESIGN GUIDELINES:
1. Use CSS custom properties for colors, spacing, and effects:
   --primary-color, --secondary-color, --accent-color
   --glow-color, --border-width, --animation-speed

2. Pixel aesthetic techniques:
   - box-shadow for pixel borders (multiple layers)
   - image-rendering: pixelated for images
   - 8px grid system for spacing
   - Monospace or pixel fonts

3. Neon effects:
   - text-shadow for neon glow
   - box-shadow with multiple colored layers
   - Animations for pulsing/flickering neon

4. Responsive design:
   - Use clamp() for fluid typography
   - Grid/flexbox for flexible layouts
   - Mobile-first media queries

5. Performance:
   - Use transform for animations (GPU accelerated)
   - Avoid expensive properties like filter in animations
   - Reasonable animation durations

OUTPUT FORMAT:
Return ONLY valid CSS code. No explanations, no markdown code blocks, just pure CSS.
The CSS will be sanitized and injected into a sandboxed profile page.
"#;

pub const IMAGE_ANALYSIS_PROMPT: &str = r##"Analyze this image as inspiration for a PixelBoxx profile page design.

PixelBoxx is a social platform with a PIXEL ART, NEON, RETRO-FUTURISTIC aesthetic (think 80s/90s nostalgia meets modern web).

Extract and return the following design elements as JSON:

{
  "colors": ["#hex1", "#hex2", "#hex3", ...],
  "aesthetic": "brief description",
  "mood": "emotional quality",
  "layout_style": "layout approach",
  "typography_suggestions": "font style ideas",
  "animation_ideas": "suggested effects"
}

colors: 5-8 prominent colors from the image, most prominent first.
aesthetic: e.g. "cyberpunk", "vaporwave", "dark fantasy", "pastel minimalism".
mood: e.g. "energetic", "mysterious", "calm", "chaotic".
layout_style: e.g. "centered hero", "asymmetric grid", "full-bleed imagery".
typography_suggestions: e.g. "bold geometric sans-serif with tight spacing".
animation_ideas: e.g. "subtle float animations, glowing accents, smooth transitions".

Focus on elements that can be translated to web design:
- Color palette (be specific with hex codes)
- Overall vibe and energy
- Visual hierarchy and layout
- Typography style (even if no text in image)
- Motion suggestions (implied movement, energy level)

Keep the PixelBoxx aesthetic in mind - how can we adapt this inspiration to fit a pixel art, neon, retro-futuristic style?

Return ONLY the raw JSON object.
"##;

pub const CSS_GENERATION_PROMPT: &str = r#"Generate creative CSS for a PixelBoxx profile page based on this design analysis.

Design Analysis:
{analysis}

User Preferences:
{preferences}

Requirements:
1. Incorporate the analyzed colors, aesthetic, and mood
2. Apply user preferences (dark mode, animation level, etc.)
3. Maintain PixelBoxx's pixel art + neon + retro-futuristic aesthetic
4. Use only the allowed CSS selectors (see system prompt)
5. Include CSS custom properties for easy tweaking
6. Add animations if animation_level is not "none"
7. Make it responsive and accessible

Output ONLY the CSS code, no explanations or markdown.
"#;
