use crate::common::error::{ConfigError, CrepoError};

/// crepo全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use crepo::common::result::CrepoResult;
/// use crepo::common::error::ConfigError;
///
/// fn example_function() -> CrepoResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> CrepoResult<()> {
///     Err(ConfigError::UnknownProject { name: "missing".to_string() }.into())
/// }
/// ```
pub type CrepoResult<T> = Result<T, CrepoError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// OptionをCrepoResultに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use crepo::common::result::{CrepoResult, OptionExt};
    /// use crepo::common::error::ConfigError;
    ///
    /// let none_value: Option<String> = None;
    /// let result: CrepoResult<String> = none_value.ok_or_crepo(
    ///     ConfigError::UnknownProject { name: "p1".to_string() }
    /// );
    /// assert!(result.is_err());
    /// ```
    fn ok_or_crepo(self, error: impl Into<CrepoError>) -> CrepoResult<T>;

    /// Noneの場合にUnknownProjectエラーを返す
    fn ok_or_unknown_project(self, name: impl Into<String>) -> Result<T, ConfigError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_crepo(self, error: impl Into<CrepoError>) -> CrepoResult<T> {
        self.ok_or_else(|| error.into())
    }

    fn ok_or_unknown_project(self, name: impl Into<String>) -> Result<T, ConfigError> {
        self.ok_or_else(|| ConfigError::UnknownProject { name: name.into() })
    }
}
