// src/utils/exam_token.rs

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims of an exam token.
/// The server keeps no exam state; the answer key travels with the client.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExamClaims {
    /// Subject - the exam id.
    pub sub: String,
    /// Exam board the exam was generated for.
    pub board: String,
    /// Correct option index per question, in order.
    pub key: Vec<usize>,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs the answer key of a generated exam.
pub fn sign_exam_token(
    exam_id: &str,
    exam_board: &str,
    key: Vec<usize>,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs()
        .checked_add(expiration_seconds)
        .and_then(|exp| usize::try_from(exp).ok())
        .ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Exam token TTL of {}s is out of range",
                expiration_seconds
            ))
        })?;

    let claims = ExamClaims {
        sub: exam_id.to_owned(),
        board: exam_board.to_owned(),
        key,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes an exam token.
///
/// A tampered, expired or foreign token is the client's fault, so it maps to
/// `BadRequest`.
pub fn verify_exam_token(token: &str, secret: &str) -> Result<ExamClaims, AppError> {
    let token_data = decode::<ExamClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Rejected exam token: {:?}", e);
        AppError::BadRequest("Invalid or expired exam token".to_string())
    })?;

    Ok(token_data.claims)
}
