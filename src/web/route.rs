//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、参数解析及守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Register,
    ForgotPassword,
    /// 邮件里的重置链接 `/reset-password/{uid}/{token}`
    ResetPassword { uid: String, token: String },
    ChangePassword,
    /// 文件列表 (需要认证)
    Files,
    Upload,
    Share,
    SharedList,
    /// 公开的分享下载 `/shared/{token}`，无需会话即可访问
    PublicDownload { token: String },
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 未知路径落到文件列表：已登录用户回到主视图，
    /// 未登录用户由守卫转入登录页。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password", uid, token] => Self::ResetPassword {
                uid: (*uid).to_string(),
                token: (*token).to_string(),
            },
            ["change-password"] => Self::ChangePassword,
            ["files"] => Self::Files,
            ["upload"] => Self::Upload,
            ["share"] => Self::Share,
            ["shared-list"] => Self::SharedList,
            ["shared", token] => Self::PublicDownload {
                token: (*token).to_string(),
            },
            _ => Self::Files,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { uid, token } => {
                format!("/reset-password/{}/{}", uid, token)
            }
            Self::ChangePassword => "/change-password".to_string(),
            Self::Files => "/files".to_string(),
            Self::Upload => "/upload".to_string(),
            Self::Share => "/share".to_string(),
            Self::SharedList => "/shared-list".to_string(),
            Self::PublicDownload { token } => format!("/shared/{}", token),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Files | Self::Upload | Self::Share | Self::SharedList | Self::ChangePassword
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录/注册页）
    pub fn auth_success_redirect() -> Self {
        Self::Files
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/files"), AppRoute::Files);
        assert_eq!(AppRoute::from_path("/upload"), AppRoute::Upload);
        assert_eq!(AppRoute::from_path("/share"), AppRoute::Share);
        assert_eq!(AppRoute::from_path("/shared-list"), AppRoute::SharedList);
        assert_eq!(
            AppRoute::from_path("/change-password"),
            AppRoute::ChangePassword
        );
    }

    #[test]
    fn parses_parameterized_paths() {
        assert_eq!(
            AppRoute::from_path("/reset-password/Mg/tok-abc/"),
            AppRoute::ResetPassword {
                uid: "Mg".into(),
                token: "tok-abc".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/shared/uuid-42"),
            AppRoute::PublicDownload {
                token: "uuid-42".into()
            }
        );
    }

    #[test]
    fn trailing_slash_is_accepted() {
        assert_eq!(AppRoute::from_path("/files/"), AppRoute::Files);
    }

    #[test]
    fn unknown_paths_fall_back_to_files() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::Files);
        assert_eq!(AppRoute::from_path("/a/b/c/d"), AppRoute::Files);
    }

    #[test]
    fn path_round_trips() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::ForgotPassword,
            AppRoute::ResetPassword {
                uid: "Mg".into(),
                token: "tok".into(),
            },
            AppRoute::ChangePassword,
            AppRoute::Files,
            AppRoute::Upload,
            AppRoute::Share,
            AppRoute::SharedList,
            AppRoute::PublicDownload {
                token: "uuid".into(),
            },
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn guard_flags() {
        assert!(AppRoute::Files.requires_auth());
        assert!(AppRoute::ChangePassword.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::ForgotPassword.requires_auth());
        // 公开下载与重置链接必须在无会话时可达
        assert!(
            !AppRoute::PublicDownload {
                token: "t".into()
            }
            .requires_auth()
        );
        assert!(
            !AppRoute::ResetPassword {
                uid: "u".into(),
                token: "t".into()
            }
            .requires_auth()
        );
    }

    #[test]
    fn authenticated_users_leave_auth_forms() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Files.should_redirect_when_authenticated());
        assert!(!AppRoute::ForgotPassword.should_redirect_when_authenticated());
    }
}
