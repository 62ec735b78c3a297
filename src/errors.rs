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
/// - context() 方法 - 为错误详情添加定位前缀
/// - 便捷构造函数
macro_rules! define_sync_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SyncError {
            $($variant(String),)*
        }

        impl SyncError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SyncError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SyncError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SyncError::$variant(msg) => msg,)*
                }
            }

            /// 在错误详情前加上实体定位信息，保持错误类型不变
            pub fn context<T: fmt::Display>(self, location: T) -> Self {
                match self {
                    $(SyncError::$variant(msg) => SyncError::$variant(format!("{location}: {msg}")),)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SyncError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SyncError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sync_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Serialization("E005", "Serialization Error"),
    DateParse("E006", "Date Parse Error"),
    Configuration("E007", "Course Configuration Error"),
    InvalidQid("E008", "Invalid Question Reference"),
}

impl SyncError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SyncError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SyncError {
    fn from(err: sea_orm::DbErr) -> Self {
        SyncError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SyncError {
    fn from(err: chrono::ParseError) -> Self {
        SyncError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
