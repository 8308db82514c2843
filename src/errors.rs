//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portfolio_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortfolioSystemError {
            $($variant(String),)*
        }

        impl PortfolioSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortfolioSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortfolioSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortfolioSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortfolioSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortfolioSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portfolio_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Conflict Error"),
    PreconditionFailed("E007", "Precondition Failed"),
    Serialization("E008", "Serialization Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl PortfolioSystemError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortfolioSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortfolioSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortfolioSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortfolioSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortfolioSystemError {
    fn from(err: std::io::Error) -> Self {
        PortfolioSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortfolioSystemError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioSystemError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortfolioSystemError::database_config("test").code(), "E001");
        assert_eq!(PortfolioSystemError::validation("test").code(), "E004");
        assert_eq!(PortfolioSystemError::conflict("test").code(), "E006");
        assert_eq!(
            PortfolioSystemError::precondition_failed("test").code(),
            "E007"
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortfolioSystemError::conflict("test").error_type(),
            "Conflict Error"
        );
        assert_eq!(
            PortfolioSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortfolioSystemError::conflict("already under review");
        assert_eq!(err.message(), "already under review");
    }

    #[test]
    fn test_format_simple() {
        let err = PortfolioSystemError::precondition_failed("cannot approve without scorecard");
        let formatted = err.format_simple();
        assert!(formatted.contains("Precondition Failed"));
        assert!(formatted.contains("cannot approve without scorecard"));
    }
}
