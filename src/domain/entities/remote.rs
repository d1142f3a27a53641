use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::domain::value_objects::fetch_template::FetchTemplate;

/// リモートの定義
///
/// 名前はマニフェストの`remotes`マップのキーで与えられる
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    /// フェッチURLのテンプレート（`%(name)s`をプロジェクト名で置換）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchTemplate>,
}

impl Remote {
    /// 新しいRemoteインスタンスを作成
    pub fn new(fetch: FetchTemplate) -> Self {
        Self { fetch: Some(fetch) }
    }

    /// テンプレート文字列からRemoteを作成
    pub fn from_template(fetch: impl Into<String>) -> Result<Self, ConfigError> {
        FetchTemplate::parse(fetch).map(Self::new)
    }

    /// リモート側のプロジェクト名を埋め込んだURLを取得
    ///
    /// `remote_name`はエラーメッセージ用
    pub fn fetch_url(&self, remote_name: &str, project_name: &str) -> Result<String, ConfigError> {
        self.fetch
            .as_ref()
            .map(|template| template.render(project_name))
            .ok_or_else(|| ConfigError::MissingFetch {
                remote: remote_name.to_string(),
            })
    }
}
