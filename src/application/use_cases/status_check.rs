use serde::Serialize;
use tracing::debug;

use crate::common::error::ConfigError;
use crate::domain::entities::{manifest::Manifest, project::Project};
use crate::domain::value_objects::tracking_status::TrackingStatus;

/// 単一プロジェクトのステータス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    /// プロジェクト名
    pub name: String,

    /// ベースディレクトリからの相対パス
    pub dir: String,

    /// ローカルの追跡ブランチ
    pub tracking_branch: String,

    /// 追跡対象のリモートブランチ
    pub remote_refspec: String,

    /// クローン済みか
    pub cloned: bool,

    /// リモートとの関係（取得できた場合）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingStatus>,

    /// エラーメッセージ（取得に失敗した場合）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectStatus {
    fn for_project(project: &Project) -> Self {
        Self {
            name: project.name().to_string(),
            dir: project.dir().to_string_lossy().into_owned(),
            tracking_branch: project.tracking_branch().to_string(),
            remote_refspec: project.remote_refspec(),
            cloned: false,
            tracking: None,
            error: None,
        }
    }

    /// 期待どおりの状態か（クローン済みかつリモートと一致）
    pub fn is_clean(&self) -> bool {
        self.cloned && self.tracking.map_or(false, |t| t.is_equal())
    }
}

/// ステータス確認のユースケース
///
/// 個々のプロジェクトの失敗は結果に記録し、全体は中断しない
pub struct StatusCheckUseCase {
    projects: Vec<String>,
}

impl StatusCheckUseCase {
    pub fn new(projects: Vec<String>) -> Self {
        Self { projects }
    }

    pub fn execute(&self, manifest: &Manifest) -> Result<Vec<ProjectStatus>, ConfigError> {
        let targets = manifest.select_projects(&self.projects)?;
        Ok(targets.into_iter().map(Self::check_project).collect())
    }

    fn check_project(project: &Project) -> ProjectStatus {
        let mut status = ProjectStatus::for_project(project);
        if !project.is_cloned() {
            return status;
        }

        status.cloned = true;
        match project.tracking_status() {
            Ok(tracking) => status.tracking = Some(tracking),
            Err(e) => {
                debug!(project = %project.name(), "tracking status failed: {}", e);
                status.error = Some(e.to_string());
            }
        }
        status
    }
}
