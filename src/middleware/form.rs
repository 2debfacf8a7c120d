//! Form body extractor accepting both urlencoded and multipart submissions.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use axum_extra::extract::{Form, WithRejection};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Deserialize a form from `application/x-www-form-urlencoded` or
/// `multipart/form-data`. Repeated keys (`sdg[]`) collect into `Vec` fields.
///
/// File parts of a multipart body are ignored; only text fields are read.
/// Every rejection is reported through [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormData<T>(pub T);

impl<T, S> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let WithRejection(Form(value), _) =
                WithRejection::<Form<T>, AppError>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut pairs: Vec<(String, String)> = Vec::new();
        while let Some(field) = multipart.next_field().await? {
            if field.file_name().is_some() {
                continue;
            }
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await?;
            pairs.push((name, value));
        }

        from_pairs(&pairs).map(Self)
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Deserialize collected text fields the same way a urlencoded body would be.
fn from_pairs<T: DeserializeOwned>(pairs: &[(String, String)]) -> Result<T, AppError> {
    let encoded = serde_html_form::to_string(pairs)
        .map_err(|e| AppError::Internal(format!("Form re-encoding failed: {e}")))?;
    serde_html_form::from_str(&encoded)
        .map_err(|e| AppError::Validation(format!("Failed to deserialize form body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProgramForm;
    use crate::models::user::LoginForm;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_sdg_fields_collect() {
        let form: ProgramForm = from_pairs(&pairs(&[
            ("title", "Coastal Cleanup"),
            ("sdg[]", "14"),
            ("sdg[]", "6"),
        ]))
        .unwrap();
        assert_eq!(form.title.as_deref(), Some("Coastal Cleanup"));
        assert_eq!(form.sdg, vec!["14", "6"]);
    }

    #[test]
    fn values_with_separators_survive() {
        let form: ProgramForm =
            from_pairs(&pairs(&[("members", "A & B = team"), ("sdg[]", "1")])).unwrap();
        assert_eq!(form.members.as_deref(), Some("A & B = team"));
    }

    #[test]
    fn missing_required_field_is_validation_error() {
        let err = from_pairs::<LoginForm>(&pairs(&[("username", "a")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("password")));
    }
}
