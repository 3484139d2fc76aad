//! Try-on DTOs

use serde::{Deserialize, Serialize};

use crate::domain::tryon::{Category, Mode, TryOnRequest};

/// Body of `POST /api/try-on`
///
/// Images are optional at the type level so a missing one is reported as a
/// 400 by the handler rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTryOn {
    #[serde(default)]
    pub model_image: Option<String>,
    #[serde(default)]
    pub garment_image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub mode: Option<Mode>,
}

impl CreateTryOn {
    /// Converts into a submission, or `None` if either image is missing or empty
    pub fn into_request(self) -> Option<TryOnRequest> {
        let model_image = self.model_image.filter(|s| !s.is_empty())?;
        let garment_image = self.garment_image.filter(|s| !s.is_empty())?;

        Some(TryOnRequest {
            model_image,
            garment_image,
            category: self.category.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
        })
    }
}

/// Successful try-on response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnResult {
    pub status: String,
    pub result: String,
}

impl TryOnResult {
    pub fn completed(result: impl Into<String>) -> Self {
        Self {
            status: "completed".to_string(),
            result: result.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_try_on_defaults() {
        let body: CreateTryOn =
            serde_json::from_str(r#"{"modelImage":"m.jpg","garmentImage":"g.jpg"}"#).unwrap();
        let req = body.into_request().unwrap();

        assert_eq!(req.category, Category::Tops);
        assert_eq!(req.mode, Mode::Balanced);
    }

    #[test]
    fn test_create_try_on_missing_image() {
        let body: CreateTryOn = serde_json::from_str(r#"{"modelImage":"m.jpg"}"#).unwrap();
        assert!(body.into_request().is_none());

        let body: CreateTryOn =
            serde_json::from_str(r#"{"modelImage":"","garmentImage":"g.jpg"}"#).unwrap();
        assert!(body.into_request().is_none());
    }
}
