//! 统一的视图生命周期状态
//!
//! 每个视图用一个 `ViewStatus` 驱动：
//! `Idle -> Pending -> Success(msg) | Error(msg) -> Idle`。
//! 提交控件在 `is_pending()` 期间禁用，成功/错误消息由
//! `StatusAlert` 统一渲染，不再按视图各自维护 disabled 标志。

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Pending,
    Success(String),
    Error(String),
}

impl ViewStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(msg) | Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 成功/错误提示框
#[component]
pub fn StatusAlert(status: RwSignal<ViewStatus>) -> impl IntoView {
    view! {
        <Show when=move || status.get().message().is_some()>
            <div
                role="alert"
                class=move || {
                    if status.get().is_error() {
                        "alert alert-error text-sm py-2 mb-4"
                    } else {
                        "alert alert-success text-sm py-2 mb-4"
                    }
                }
            >
                <span>{move || status.get().message().unwrap_or_default().to_string()}</span>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let status = ViewStatus::default();
        assert!(!status.is_pending());
        assert!(!status.is_error());
        assert!(status.message().is_none());
    }

    #[test]
    fn pending_disables_submission() {
        assert!(ViewStatus::Pending.is_pending());
        assert!(ViewStatus::Pending.message().is_none());
    }

    #[test]
    fn terminal_states_carry_messages() {
        let ok = ViewStatus::success("done");
        assert_eq!(ok.message(), Some("done"));
        assert!(!ok.is_error());
        assert!(!ok.is_pending());

        let err = ViewStatus::error("boom");
        assert_eq!(err.message(), Some("boom"));
        assert!(err.is_error());
        assert!(!err.is_pending());
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut status = ViewStatus::Pending;
        assert!(status.is_pending());
        status = ViewStatus::error("failed");
        assert!(status.is_error());
        status = ViewStatus::Idle;
        assert!(status.message().is_none());
    }
}
