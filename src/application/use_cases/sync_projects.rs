use thiserror::Error;
use tracing::{error, info};

use crate::common::error::{ConfigError, CrepoError};
use crate::domain::entities::{manifest::Manifest, project::Project};

/// SyncProjects関連のエラー
#[derive(Debug, Error)]
pub enum SyncProjectsError {
    #[error("Invalid project selection: {0}")]
    Selection(#[from] ConfigError),

    #[error("Sync failed for project '{project}': {source}")]
    ProjectFailed {
        project: String,
        #[source]
        source: CrepoError,
    },
}

/// プロジェクト同期の設定
#[derive(Debug, Clone, Default)]
pub struct SyncProjectsConfig {
    /// 同期するプロジェクト名（空の場合は全て）
    pub projects: Vec<String>,

    /// 失敗したプロジェクトがあっても残りを続行するか
    pub keep_going: bool,
}

impl SyncProjectsConfig {
    pub fn with_projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// 同期操作の結果
#[derive(Debug, Default)]
pub struct SyncResult {
    /// 同期に成功したプロジェクトの数
    pub synced_count: usize,

    /// 新規クローンされたプロジェクトの数
    pub cloned_count: usize,

    /// 失敗したプロジェクトとそのエラー（keep_going時のみ蓄積）
    pub failures: Vec<(String, CrepoError)>,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// プロジェクト同期のユースケース
///
/// プロジェクトは名前順に一つずつ処理する
pub struct SyncProjectsUseCase {
    config: SyncProjectsConfig,
}

impl SyncProjectsUseCase {
    pub fn new(config: SyncProjectsConfig) -> Self {
        Self { config }
    }

    /// 同期を実行
    pub fn execute(&self, manifest: &Manifest) -> Result<SyncResult, SyncProjectsError> {
        let targets = manifest.select_projects(&self.config.projects)?;
        let mut result = SyncResult::default();

        for project in targets {
            let was_cloned = project.is_cloned();

            match Self::sync_project(project) {
                Ok(()) => {
                    result.synced_count += 1;
                    if !was_cloned {
                        result.cloned_count += 1;
                    }
                }
                Err(source) if self.config.keep_going => {
                    error!(project = %project.name(), "sync failed: {}", source);
                    result.failures.push((project.name().to_string(), source));
                }
                Err(source) => {
                    return Err(SyncProjectsError::ProjectFailed {
                        project: project.name().to_string(),
                        source,
                    });
                }
            }
        }

        Ok(result)
    }

    /// 一つのプロジェクトをマニフェストの状態に合わせる
    fn sync_project(project: &Project) -> Result<(), CrepoError> {
        info!(project = %project.name(), "syncing {}", project.dir().display());
        project.clone_repository()?;
        project.ensure_remotes()?;
        project.checkout_tracking_branch()?;
        Ok(())
    }
}
