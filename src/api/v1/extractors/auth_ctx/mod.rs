/*!
 * Authentication context
 *
 * Responsibility:
 * - 認証済みリクエストの Identity を handler に提供する
 * - 格納キーは context に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Identity
 * - Authenticated (extractor)
 * - subject_id / email (accessor)
 *
 * Identity を書き込めるのは crate 内 (Auth Gate) だけ。
 */

mod context;
mod core;
mod types;

pub(crate) use context::with_identity;
pub use context::{email, subject_id};
pub use core::Authenticated;
pub use types::Identity;
