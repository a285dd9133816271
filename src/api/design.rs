use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};

use crate::design::types::{CssGenerationResponse, DesignPreferences, TextDesignRequest};
use crate::errors::ServiceError;
use crate::state::AppState;

/// POST /design/from-image. Multipart upload of an inspiration image plus
/// an optional `preferences` JSON field. Analysis and generation both
/// degrade to deterministic output internally, so the only failures here
/// are validation ones.
pub async fn design_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CssGenerationResponse>, ServiceError> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut preferences = DesignPreferences::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServiceError::Validation(format!("Invalid multipart payload: {err}")))?
    {
        let name = field.name().map(|value| value.to_string());
        match name.as_deref() {
            Some("image") => {
                let declared_type = field.content_type().map(|value| value.to_string());
                let bytes = field.bytes().await.map_err(|err| {
                    ServiceError::Validation(format!("Failed to read image: {err}"))
                })?;
                validate_image_content_type(declared_type.as_deref(), &bytes)?;
                image_bytes = Some(bytes.to_vec());
            }
            Some("preferences") => {
                let raw = field.text().await.map_err(|err| {
                    ServiceError::Validation(format!("Failed to read preferences: {err}"))
                })?;
                if !raw.trim().is_empty() {
                    preferences = serde_json::from_str(&raw).map_err(|err| {
                        ServiceError::Validation(format!("Invalid preferences JSON: {err}"))
                    })?;
                }
            }
            _ => {}
        }
    }

    let image = image_bytes
        .ok_or_else(|| ServiceError::Validation("Image file is required".to_string()))?;
    if image.is_empty() {
        return Err(ServiceError::Validation("Image file is empty".to_string()));
    }

    let analysis = state.service.analyze_image(&image).await;
    let css = state
        .service
        .generate_css_from_analysis(&analysis, &preferences, None)
        .await;

    let palette_preview = analysis
        .colors
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let explanation = format!(
        "Generated a {} design with a {} mood. The color palette includes {}. Layout style: {}.",
        analysis.aesthetic, analysis.mood, palette_preview, analysis.layout_style
    );

    Ok(Json(CssGenerationResponse {
        css,
        explanation,
        colors: analysis.colors,
        preview_url: None,
    }))
}

fn validate_image_content_type(declared: Option<&str>, bytes: &[u8]) -> Result<(), ServiceError> {
    if let Some(content_type) = declared {
        if content_type.starts_with("image/") {
            return Ok(());
        }
        return Err(ServiceError::Validation("File must be an image".to_string()));
    }

    // No declared type on the part: sniff the bytes instead.
    match infer::get(bytes) {
        Some(kind) if kind.mime_type().starts_with("image/") => Ok(()),
        _ => Err(ServiceError::Validation("File must be an image".to_string())),
    }
}

/// POST /design/from-description
pub async fn design_from_description(
    State(state): State<AppState>,
    Json(request): Json<TextDesignRequest>,
) -> Result<Json<CssGenerationResponse>, ServiceError> {
    let preferences = request.preferences.unwrap_or_default();
    let result = state
        .service
        .generate_css_from_description(
            &request.description,
            &preferences,
            request.current_css.as_deref(),
        )
        .await?;

    Ok(Json(result))
}

/// GET /design/health
pub async fn design_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "endpoints": ["/design/from-image", "/design/from-description"],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_image_type_passes() {
        assert!(validate_image_content_type(Some("image/png"), &[]).is_ok());
    }

    #[test]
    fn declared_non_image_type_is_rejected() {
        assert!(validate_image_content_type(Some("text/plain"), &[]).is_err());
    }

    #[test]
    fn undeclared_type_falls_back_to_sniffing() {
        let png = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
        ];
        assert!(validate_image_content_type(None, &png).is_ok());
        assert!(validate_image_content_type(None, b"just some text").is_err());
    }
}
