use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::config::{Config, CSS_GENERATION_PROMPT, DESIGN_SYSTEM_PROMPT, IMAGE_ANALYSIS_PROMPT};
use crate::design::mock::{self, DEFAULT_PALETTE};
use crate::design::types::{
    selector_vocabulary, CssGenerationResponse, DesignAnalysis, DesignPreferences,
};
use crate::design::{parser, sniff};
use crate::errors::ServiceError;
use crate::llm::ClaudeClient;

const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_RESULT_COLORS: usize = 8;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9A-Fa-f]{6}").expect("valid hex color regex"));

/// Settings the orchestrator is constructed from. Injected explicitly so
/// the service never reads ambient process state; `From<&Config>` bridges
/// the startup path.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub api_key: String,
    pub force_mock: bool,
    pub model: String,
    pub analysis_max_tokens: u32,
    pub generation_max_tokens: u32,
    pub request_timeout_seconds: u64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            api_key: String::new(),
            force_mock: true,
            model: "claude-opus-5".to_string(),
            analysis_max_tokens: 1024,
            generation_max_tokens: 4096,
            request_timeout_seconds: 60,
        }
    }
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        ServiceOptions {
            api_key: config.anthropic_api_key.clone(),
            force_mock: config.enable_mock_responses,
            model: config.claude_model.clone(),
            analysis_max_tokens: config.claude_analysis_max_tokens,
            generation_max_tokens: config.claude_generation_max_tokens,
            request_timeout_seconds: config.claude_request_timeout_seconds,
        }
    }
}

/// Top-level design generation service. The live-vendor vs. fallback mode
/// is fixed at construction: `client` is `Some` only when a credential is
/// present and mock mode is off. Vendor failures never escape: every
/// vendor-path error degrades to the deterministic synthesizer.
pub struct DesignService {
    client: Option<ClaudeClient>,
    system_prompt: String,
}

impl DesignService {
    pub fn new(options: ServiceOptions) -> Result<Self, ServiceError> {
        let has_credential = !options.api_key.trim().is_empty();
        if !has_credential && !options.force_mock {
            return Err(ServiceError::Configuration);
        }

        let client = if has_credential && !options.force_mock {
            let client = ClaudeClient::new(
                options.api_key,
                options.model,
                options.analysis_max_tokens,
                options.generation_max_tokens,
                options.request_timeout_seconds,
            );
            info!("Design service running against Claude model {}", client.model());
            Some(client)
        } else {
            info!("Design service running with mock responses");
            None
        };

        Ok(DesignService {
            client,
            system_prompt: DESIGN_SYSTEM_PROMPT.replace("{selector_vocabulary}", &selector_vocabulary()),
        })
    }

    pub fn uses_vendor(&self) -> bool {
        self.client.is_some()
    }

    /// Analyze an inspiration image. In fallback mode, or on any vendor
    /// failure, the canned analysis is substituted; callers never observe
    /// a vendor error.
    pub async fn analyze_image(&self, image_bytes: &[u8]) -> DesignAnalysis {
        let Some(client) = &self.client else {
            return mock::analysis();
        };

        match self.vendor_analyze(client, image_bytes).await {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!("Image analysis fell back to the canned response: {err:#}");
                mock::analysis()
            }
        }
    }

    async fn vendor_analyze(
        &self,
        client: &ClaudeClient,
        image_bytes: &[u8],
    ) -> Result<DesignAnalysis> {
        let media_type = sniff::classify_image(image_bytes);
        let reply = client
            .analyze_image(media_type, image_bytes, IMAGE_ANALYSIS_PROMPT)
            .await?;
        serde_json::from_str(reply.trim()).context("Claude analysis reply was not valid JSON")
    }

    /// Generate CSS from an analysis and the user's preferences, optionally
    /// building on existing CSS. Vendor failures degrade to the template.
    pub async fn generate_css_from_analysis(
        &self,
        analysis: &DesignAnalysis,
        preferences: &DesignPreferences,
        current_css: Option<&str>,
    ) -> String {
        let Some(client) = &self.client else {
            return mock::generate_css(analysis, preferences);
        };

        match self
            .vendor_generate(client, analysis, preferences, current_css)
            .await
        {
            Ok(css) => css,
            Err(err) => {
                warn!("CSS generation fell back to the template: {err:#}");
                mock::generate_css(analysis, preferences)
            }
        }
    }

    async fn vendor_generate(
        &self,
        client: &ClaudeClient,
        analysis: &DesignAnalysis,
        preferences: &DesignPreferences,
        current_css: Option<&str>,
    ) -> Result<String> {
        let mut prompt = CSS_GENERATION_PROMPT
            .replace("{analysis}", &serde_json::to_string_pretty(analysis)?)
            .replace("{preferences}", &serde_json::to_string_pretty(preferences)?);

        if let Some(css) = current_css {
            prompt.push_str(&format!("\n\nCurrent CSS to build upon:\n{css}"));
        }

        let reply = client.complete(&self.system_prompt, &prompt).await?;
        Ok(parser::clean_css(&reply))
    }

    /// Generate CSS from a free-text description. A trimmed description
    /// shorter than 10 characters is rejected before any generation work;
    /// that is the only error this operation surfaces.
    pub async fn generate_css_from_description(
        &self,
        description: &str,
        preferences: &DesignPreferences,
        current_css: Option<&str>,
    ) -> Result<CssGenerationResponse, ServiceError> {
        if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ServiceError::Validation(
                "Description must be at least 10 characters long".to_string(),
            ));
        }

        if let Some(client) = &self.client {
            match self
                .vendor_describe(client, description, preferences, current_css)
                .await
            {
                Ok(response) => return Ok(response),
                Err(err) => {
                    warn!("Description generation fell back to the template: {err:#}");
                }
            }
        }

        let (css, explanation) = mock::css_from_description(description, preferences);
        Ok(CssGenerationResponse {
            css,
            explanation,
            colors: mock::analysis().colors,
            preview_url: None,
        })
    }

    async fn vendor_describe(
        &self,
        client: &ClaudeClient,
        description: &str,
        preferences: &DesignPreferences,
        current_css: Option<&str>,
    ) -> Result<CssGenerationResponse> {
        let current_css_section = current_css
            .map(|css| format!("Current CSS to build upon:\n{css}\n\n"))
            .unwrap_or_default();
        let prompt = format!(
            "Generate CSS for a PixelBoxx profile based on this description:\n\n\
             \"{description}\"\n\n\
             User Preferences:\n{preferences}\n\n\
             {current_css_section}\
             First, briefly explain your design choices in 2-3 sentences.\n\
             Then output the CSS code.\n\n\
             Format:\n\
             EXPLANATION: [your explanation]\n\
             CSS:\n\
             [css code]\n",
            preferences = serde_json::to_string_pretty(preferences)?,
        );

        let reply = client.complete(&self.system_prompt, &prompt).await?;
        let (explanation, css) = parser::split_explanation_and_css(&reply);
        let colors = extract_hex_colors(&css);

        Ok(CssGenerationResponse {
            css,
            explanation,
            colors,
            preview_url: None,
        })
    }
}

/// Scan CSS for `#rrggbb` literals: deduplicated in first-seen order,
/// capped at 8, with the fixed default palette substituted when the scan
/// comes up empty.
pub fn extract_hex_colors(css: &str) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for found in HEX_COLOR_RE.find_iter(css) {
        let value = found.as_str().to_string();
        if !colors.contains(&value) {
            colors.push(value);
            if colors.len() == MAX_RESULT_COLORS {
                break;
            }
        }
    }

    if colors.is_empty() {
        DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
    } else {
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::mock::MOCK_PALETTE;

    fn mock_service() -> DesignService {
        DesignService::new(ServiceOptions::default()).expect("mock service constructs")
    }

    #[test]
    fn construction_fails_without_credential_when_mock_disabled() {
        let options = ServiceOptions {
            force_mock: false,
            ..ServiceOptions::default()
        };
        assert!(matches!(
            DesignService::new(options),
            Err(ServiceError::Configuration)
        ));
    }

    #[test]
    fn credential_without_force_mock_selects_the_vendor_path() {
        let options = ServiceOptions {
            api_key: "sk-test".to_string(),
            force_mock: false,
            ..ServiceOptions::default()
        };
        let service = DesignService::new(options).expect("live service constructs");
        assert!(service.uses_vendor());
    }

    #[test]
    fn force_mock_wins_even_with_a_credential() {
        let options = ServiceOptions {
            api_key: "sk-test".to_string(),
            force_mock: true,
            ..ServiceOptions::default()
        };
        let service = DesignService::new(options).expect("mock service constructs");
        assert!(!service.uses_vendor());
    }

    #[test]
    fn extracts_colors_in_first_seen_order_without_duplicates() {
        let css = ".a { color: #FF006E; } .b { color: #8338EC; } .c { color: #FF006E; }";
        assert_eq!(extract_hex_colors(css), vec!["#FF006E", "#8338EC"]);
    }

    #[test]
    fn caps_extracted_colors_at_eight() {
        let css = "#111111 #222222 #333333 #444444 #555555 #666666 #777777 #888888 #999999";
        let colors = extract_hex_colors(css);
        assert_eq!(colors.len(), 8);
        assert_eq!(colors.first().map(String::as_str), Some("#111111"));
        assert_eq!(colors.last().map(String::as_str), Some("#888888"));
    }

    #[test]
    fn substitutes_default_palette_when_no_colors_found() {
        let css = ".pixelpage { color: var(--primary-color); }";
        assert_eq!(extract_hex_colors(css), DEFAULT_PALETTE.to_vec());
    }

    #[test]
    fn short_hex_literals_are_not_extracted() {
        assert_eq!(extract_hex_colors(".a { color: #fff; }"), DEFAULT_PALETTE.to_vec());
    }

    #[tokio::test]
    async fn fallback_analysis_is_the_canned_one() {
        let service = mock_service();
        let analysis = service.analyze_image(&[0xFF, 0xD8, 0xFF]).await;
        assert_eq!(analysis.colors, MOCK_PALETTE.to_vec());
        assert_eq!(analysis.aesthetic, "vibrant cyberpunk with neon accents");
    }

    #[tokio::test]
    async fn fallback_generation_matches_the_template() {
        let service = mock_service();
        let analysis = mock::analysis();
        let preferences = DesignPreferences::default();
        let css = service
            .generate_css_from_analysis(&analysis, &preferences, None)
            .await;
        assert_eq!(css, mock::generate_css(&analysis, &preferences));
    }

    #[tokio::test]
    async fn description_generation_in_fallback_mode_end_to_end() {
        let service = mock_service();
        let description = "A glowing cyberpunk sunset over a neon city skyline";
        let result = service
            .generate_css_from_description(description, &DesignPreferences::default(), None)
            .await
            .expect("valid description generates");

        let preview: String = description.chars().take(100).collect();
        assert!(result.explanation.contains(&preview));
        assert_eq!(result.colors, MOCK_PALETTE.to_vec());
        for (selector, _) in crate::design::types::PROFILE_SELECTORS {
            if selector == "widget" || selector == "profile-badge" {
                continue;
            }
            assert!(
                result.css.contains(&format!(".{selector} {{")),
                "missing rule for .{selector}"
            );
        }
    }

    #[tokio::test]
    async fn short_description_is_rejected_before_generation() {
        let service = mock_service();
        let result = service
            .generate_css_from_description("hi", &DesignPreferences::default(), None)
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn whitespace_padding_does_not_satisfy_the_length_check() {
        let service = mock_service();
        let result = service
            .generate_css_from_description("  hi      ", &DesignPreferences::default(), None)
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
