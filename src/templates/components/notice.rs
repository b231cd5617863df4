// components/notice.rs
use crate::params::Params;
use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "success" => NoticeLevel::Success,
            "error" => NoticeLevel::Error,
            _ => NoticeLevel::Info,
        }
    }
}

/// One-shot message shown after a redirect. Travels as `notice` + `level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn from_params(params: &Params) -> Option<Self> {
        let text = params.get("notice")?;
        Some(Self {
            level: NoticeLevel::parse(params.get("level").unwrap_or("info")),
            text: text.to_string(),
        })
    }

    pub fn push_into(&self, params: &mut Params) {
        params.push("notice", self.text.as_str());
        params.push("level", self.level.as_str());
    }
}

pub fn notice_banner(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(n) = notice {
            div class={ "notice notice-" (n.level.as_str()) } role="status" { (n.text) }
        }
    }
}
