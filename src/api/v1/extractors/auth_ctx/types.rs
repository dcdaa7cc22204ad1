/*
 * Responsibility
 * - Handler から見える「認証済み主体」の型
 * - middleware が検証して request extensions に格納し、handler はこの型 (または accessor) だけを使う
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - 生成は検証成功時のみ。以後は読み取り専用
 */

use serde::Serialize;

use crate::services::auth::AccessClaims;

/// The caller a request was authenticated as.
///
/// Only built inside this crate from validated claims; callers outside can
/// read one but not construct one.
///
/// ```compile_fail
/// use agam_api::api::v1::extractors::Identity;
/// use agam_api::services::auth::AccessClaims;
///
/// let _ = Identity::from(AccessClaims {
///     user_id: 1,
///     email: "root@example.com".into(),
///     exp: u64::MAX,
///     iat: None,
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    subject_id: i64,
    email: String,
}

impl Identity {
    pub(crate) fn new(subject_id: i64, email: String) -> Self {
        Self { subject_id, email }
    }

    pub(crate) fn from_claims(claims: AccessClaims) -> Self {
        Self::new(claims.user_id, claims.email)
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

