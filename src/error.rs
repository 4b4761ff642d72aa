use std::fmt;

// =========================================================
// 错误类别
// =========================================================

/// 错误类别
///
/// 调用方据此区分"没有收到响应"和"收到了但不可用"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 配置无效 (如 base URL 为空)
    Config,
    /// 未收到响应：连接失败、DNS、CORS 等
    Transport,
    /// 超过配置的超时时间仍未收到响应
    Timeout,
    /// 收到非 2xx 响应
    Status,
    /// 响应体结构与预期不符
    Decode,
}

impl ApiErrorKind {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Config => "INVALID_CONFIG",
            ApiErrorKind::Transport => "TRANSPORT_ERROR",
            ApiErrorKind::Timeout => "TIMEOUT",
            ApiErrorKind::Status => "HTTP_STATUS_ERROR",
            ApiErrorKind::Decode => "DECODE_ERROR",
        }
    }

    /// 是否属于"没有收到响应"
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiErrorKind::Transport | ApiErrorKind::Timeout)
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "client.send", "store.get_data"
    pub operation: String,
    /// 额外的细节信息，如请求路径
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 访问层的统一错误
///
/// - kind: 错误类别
/// - status: HTTP 状态码（仅 `Status` 类别有值）
/// - message: 错误消息
/// - spans: 结构化的调用追踪栈
///
/// 错误值在拦截器中只被记录、不被改写，因此调用方拿到的就是原始错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Config, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ApiErrorKind::Status, message);
        err.status = Some(status);
        err
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.error_code())?;
        if let Some(status) = self.status {
            write!(f, " {}", status)?;
        }
        write!(f, " {}", self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
