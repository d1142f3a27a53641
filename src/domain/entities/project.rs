use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::manifest::Manifest;
use super::remote::Remote;
use crate::common::error::ConfigError;
use crate::common::result::CrepoResult;
use crate::domain::value_objects::tracking_status::TrackingStatus;
use crate::infrastructure::git::GitRepository;
use crate::infrastructure::process::{ProcessError, ProcessRunner};

/// マニフェスト中のプロジェクト定義（ドキュメント表現）
///
/// 省略されたフィールドはProjectの構築時に補完される
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectDocument {
    /// プロジェクト名（出力時のみ。入力ではマップのキーが優先）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 使用するリモート名のリスト（省略時はデフォルトリモートのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remotes: Option<Vec<String>>,

    /// 追跡するブランチ（省略時はマニフェストのdefault-revision）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refspec: Option<String>,

    /// クローン元のリモート
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_remote: Option<String>,

    /// ベースディレクトリからの相対パス（省略時はプロジェクト名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// フェッチテンプレートに埋め込む名前（省略時はプロジェクト名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_project_name: Option<String>,
}

impl ProjectDocument {
    /// 全フィールド省略のドキュメントを作成
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remotes<I, S>(mut self, remotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remotes = Some(remotes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_from_remote(mut self, from_remote: impl Into<String>) -> Self {
        self.from_remote = Some(from_remote.into());
        self
    }

    pub fn with_refspec(mut self, refspec: impl Into<String>) -> Self {
        self.refspec = Some(refspec.into());
        self
    }

    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_remote_project_name(mut self, name: impl Into<String>) -> Self {
        self.remote_project_name = Some(name.into());
        self
    }
}

/// プロジェクトエンティティ
///
/// 一つのチェックアウトと、それが追跡するリモートブランチを表す
#[derive(Debug)]
pub struct Project {
    name: String,
    remotes: BTreeMap<String, Remote>,
    from_remote: String,
    refspec: String,
    dir: PathBuf,
    remote_project_name: String,
    repo: GitRepository,
}

/// クローン元リモートを決定する
///
/// 明示指定 → リモートが一つだけ → デフォルトリモートが含まれる、の順で決める
fn resolve_from_remote(
    project: &str,
    explicit: Option<String>,
    listed: &[String],
    default_remote: &str,
) -> Result<String, ConfigError> {
    let from_remote = match explicit.filter(|r| !r.is_empty()) {
        Some(remote) => remote,
        None => match listed {
            [only] => only.clone(),
            _ if listed.iter().any(|r| r == default_remote) => default_remote.to_string(),
            _ => {
                return Err(ConfigError::AmbiguousFromRemote {
                    project: project.to_string(),
                })
            }
        },
    };

    if !listed.contains(&from_remote) {
        return Err(ConfigError::FromRemoteNotListed {
            project: project.to_string(),
            remote: from_remote,
        });
    }

    Ok(from_remote)
}

impl Project {
    /// ドキュメントからプロジェクトを構築
    ///
    /// リモートの解決とデフォルト値の補完をここで行う。
    /// マニフェストへの登録は[`Manifest::add_project`]で別途行う
    pub fn from_document(
        manifest: &Manifest,
        name: impl Into<String>,
        document: ProjectDocument,
    ) -> Result<Self, ConfigError> {
        let name = name.into();

        if let Some(declared) = &document.name {
            if declared != &name {
                return Err(ConfigError::ProjectNameMismatch {
                    key: name,
                    name: declared.clone(),
                });
            }
        }

        let remote_names = document
            .remotes
            .unwrap_or_else(|| vec![manifest.default_remote().to_string()]);
        if remote_names.is_empty() {
            return Err(ConfigError::EmptyRemotes { project: name });
        }

        let mut remotes = BTreeMap::new();
        for remote_name in &remote_names {
            let remote = manifest
                .remote(remote_name)
                .ok_or_else(|| ConfigError::UnknownRemote {
                    project: name.clone(),
                    remote: remote_name.clone(),
                })?;
            remotes.insert(remote_name.clone(), remote.clone());
        }

        let from_remote = resolve_from_remote(
            &name,
            document.from_remote,
            &remote_names,
            manifest.default_remote(),
        )?;

        let refspec = document
            .refspec
            .unwrap_or_else(|| manifest.default_refspec().to_string());
        let dir = PathBuf::from(document.dir.unwrap_or_else(|| name.clone()));
        let remote_project_name = document
            .remote_project_name
            .unwrap_or_else(|| name.clone());
        let repo = GitRepository::new(manifest.base_dir().join(&dir), manifest.runner().clone());

        Ok(Self {
            name,
            remotes,
            from_remote,
            refspec,
            dir,
            remote_project_name,
            repo,
        })
    }

    /// ドキュメント表現に変換（デフォルト値は具体化される）
    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            name: Some(self.name.clone()),
            remotes: Some(self.remotes.keys().cloned().collect()),
            refspec: Some(self.refspec.clone()),
            from_remote: Some(self.from_remote.clone()),
            dir: Some(self.dir.to_string_lossy().into_owned()),
            remote_project_name: (self.remote_project_name != self.name)
                .then(|| self.remote_project_name.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// このプロジェクトが使うリモート
    pub fn remotes(&self) -> &BTreeMap<String, Remote> {
        &self.remotes
    }

    pub fn from_remote(&self) -> &str {
        &self.from_remote
    }

    pub fn refspec(&self) -> &str {
        &self.refspec
    }

    /// ベースディレクトリからの相対パス
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// チェックアウトの絶対パス
    pub fn checkout_path(&self) -> &Path {
        self.repo.work_dir()
    }

    pub fn remote_project_name(&self) -> &str {
        &self.remote_project_name
    }

    /// ローカルの追跡ブランチ名
    pub fn tracking_branch(&self) -> &str {
        &self.refspec
    }

    /// 追跡対象のリモートブランチ（例: origin/master）
    pub fn remote_refspec(&self) -> String {
        format!("{}/{}", self.from_remote, self.refspec)
    }

    pub fn git_repo(&self) -> &GitRepository {
        &self.repo
    }

    pub(crate) fn rebind_runner(&mut self, runner: Arc<dyn ProcessRunner>) {
        self.repo = GitRepository::new(self.repo.work_dir().to_path_buf(), runner);
    }

    /// 指定したリモートのURL
    pub fn clone_url(&self, remote_name: &str) -> Result<String, ConfigError> {
        let remote = self
            .remotes
            .get(remote_name)
            .ok_or_else(|| ConfigError::UnknownRemote {
                project: self.name.clone(),
                remote: remote_name.to_string(),
            })?;
        remote.fetch_url(remote_name, &self.remote_project_name)
    }

    pub fn is_cloned(&self) -> bool {
        self.repo.is_cloned()
    }

    /// ローカル追跡ブランチとリモートブランチの比較
    pub fn tracking_status(&self) -> CrepoResult<TrackingStatus> {
        Ok(self
            .repo
            .tracking_status(self.tracking_branch(), &self.remote_refspec())?)
    }

    /// 未クローンならクローンする
    ///
    /// 作業ツリーなしでクローンし、HEADが解決できなければ追跡ブランチを
    /// 作成してチェックアウトする
    pub fn clone_repository(&self) -> CrepoResult<()> {
        if self.is_cloned() {
            return Ok(());
        }

        warn!("Initializing project: {}", self.name);
        let url = self.clone_url(&self.from_remote)?;
        let outcome = self.repo.clone_from(&self.from_remote, &url)?;
        if !self.is_cloned() {
            return Err(ProcessError::command_failed(outcome.args, outcome.exit_code).into());
        }

        if self.repo.head_resolves()? {
            self.repo.checkout_head()?;
        } else {
            debug!(
                project = %self.name,
                "HEAD does not resolve, checking out {}",
                self.remote_refspec()
            );
            self.repo
                .checkout_new_tracking_branch(self.tracking_branch(), &self.remote_refspec())?;
        }

        Ok(())
    }

    /// 宣言された全リモートのURLを揃える
    ///
    /// 既に正しいURLのリモートには何もしない
    pub fn ensure_remotes(&self) -> CrepoResult<()> {
        for remote_name in self.remotes.keys() {
            let expected = self.clone_url(remote_name)?;

            match self.repo.remote_url(remote_name)? {
                Some(current) if current == expected => {
                    debug!(project = %self.name, remote = %remote_name, "remote up to date");
                }
                Some(current) => {
                    info!(
                        project = %self.name,
                        remote = %remote_name,
                        "updating remote url {} -> {}",
                        current,
                        expected
                    );
                    self.repo.set_remote_url(remote_name, &expected)?;
                }
                None => {
                    info!(project = %self.name, remote = %remote_name, "adding remote {}", expected);
                    self.repo.add_remote(remote_name, &expected)?;
                }
            }
        }

        Ok(())
    }

    /// 追跡ブランチが存在することを保証する
    ///
    /// 既存のブランチはどのコミットを指していてもそのままにする
    pub fn ensure_tracking_branch(&self) -> CrepoResult<()> {
        if !self.is_cloned() {
            self.clone_repository()?;
        }

        if !self.repo.branch_exists(self.tracking_branch())? {
            warn!(
                "Branch {} does not exist in project {}. checking out.",
                self.tracking_branch(),
                self.name
            );
            self.repo
                .create_tracking_branch(self.tracking_branch(), &self.remote_refspec())?;
        }

        Ok(())
    }

    /// 追跡ブランチをチェックアウトする
    pub fn checkout_tracking_branch(&self) -> CrepoResult<()> {
        self.ensure_tracking_branch()?;
        self.repo.checkout(self.tracking_branch())?;
        Ok(())
    }
}
