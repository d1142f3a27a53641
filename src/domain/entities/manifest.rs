use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::project::{Project, ProjectDocument};
use super::remote::Remote;
use crate::common::error::ConfigError;
use crate::common::result::{CrepoResult, OptionExt};
use crate::infrastructure::filesystem::manifest_store::{ManifestFormat, ManifestStore};
use crate::infrastructure::process::{GitProcessRunner, ProcessRunner};

/// default-revisionが省略された場合の追跡ブランチ
pub const DEFAULT_REFSPEC: &str = "master";

fn default_revision() -> String {
    DEFAULT_REFSPEC.to_string()
}

/// マニフェストのドキュメント表現
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestDocument {
    /// プロジェクトのデフォルト追跡ブランチ
    #[serde(default = "default_revision")]
    pub default_revision: String,

    /// デフォルトのリモート名（remotesのキーであること）
    pub default_remote: String,

    /// リモート名 → リモート定義
    #[serde(default)]
    pub remotes: BTreeMap<String, Remote>,

    /// プロジェクト名 → プロジェクト定義
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectDocument>,
}

impl ManifestDocument {
    /// プロジェクトなしのドキュメントを作成
    pub fn new(default_remote: impl Into<String>) -> Self {
        Self {
            default_revision: default_revision(),
            default_remote: default_remote.into(),
            remotes: BTreeMap::new(),
            projects: BTreeMap::new(),
        }
    }

    pub fn with_remote(mut self, name: impl Into<String>, remote: Remote) -> Self {
        self.remotes.insert(name.into(), remote);
        self
    }

    pub fn with_project(mut self, name: impl Into<String>, project: ProjectDocument) -> Self {
        self.projects.insert(name.into(), project);
        self
    }

    pub fn with_default_revision(mut self, revision: impl Into<String>) -> Self {
        self.default_revision = revision.into();
        self
    }
}

/// マニフェストエンティティ
///
/// リモートとデフォルト値は構築後に変更されない。
/// プロジェクトは[`Manifest::add_project`]でのみ追加される
#[derive(Debug)]
pub struct Manifest {
    base_dir: PathBuf,
    remotes: BTreeMap<String, Remote>,
    projects: BTreeMap<String, Project>,
    default_remote: String,
    default_refspec: String,
    runner: Arc<dyn ProcessRunner>,
}

impl Manifest {
    /// プロジェクトを持たないマニフェストを作成
    ///
    /// `default_remote`は`remotes`に含まれていなければならない
    pub fn new(
        base_dir: impl Into<PathBuf>,
        remotes: BTreeMap<String, Remote>,
        default_remote: impl Into<String>,
        default_refspec: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let default_remote = default_remote.into();
        if !remotes.contains_key(&default_remote) {
            return Err(ConfigError::UnknownDefaultRemote {
                remote: default_remote,
            });
        }

        Ok(Self {
            base_dir: base_dir.into(),
            remotes,
            projects: BTreeMap::new(),
            default_remote,
            default_refspec: default_refspec.into(),
            runner: Arc::new(GitProcessRunner::default()),
        })
    }

    /// ドキュメントからマニフェストと全プロジェクトを構築
    pub fn from_document(
        document: ManifestDocument,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::from_document_with_runner(document, base_dir, Arc::new(GitProcessRunner::default()))
    }

    /// 指定したプロセスランナーでマニフェストを構築
    pub fn from_document_with_runner(
        document: ManifestDocument,
        base_dir: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, ConfigError> {
        let mut manifest = Self::new(
            base_dir,
            document.remotes,
            document.default_remote,
            document.default_revision,
        )?
        .with_runner(runner);

        for (name, project) in document.projects {
            let project = Project::from_document(&manifest, name, project)?;
            manifest.add_project(project)?;
        }

        Ok(manifest)
    }

    /// マニフェストファイルを読み込む
    ///
    /// ベースディレクトリはファイルを含むディレクトリの絶対パスになる
    pub fn load(path: impl AsRef<Path>) -> CrepoResult<Self> {
        Self::load_with_runner(path, Arc::new(GitProcessRunner::default()))
    }

    pub fn load_with_runner(
        path: impl AsRef<Path>,
        runner: Arc<dyn ProcessRunner>,
    ) -> CrepoResult<Self> {
        let store = ManifestStore::new();
        let path = path.as_ref();
        let document = store.read_document(path)?;
        let base_dir = store.base_dir_of(path)?;
        Ok(Self::from_document_with_runner(document, base_dir, runner)?)
    }

    /// プロセスランナーを差し替える（登録済みプロジェクトにも反映）
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        for project in self.projects.values_mut() {
            project.rebind_runner(runner.clone());
        }
        self.runner = runner;
        self
    }

    /// プロジェクトを登録
    ///
    /// 同名のプロジェクトが既にあればエラーとし、既存の登録は変更しない
    pub fn add_project(&mut self, project: Project) -> Result<(), ConfigError> {
        if self.projects.contains_key(project.name()) {
            return Err(ConfigError::DuplicateProject {
                name: project.name().to_string(),
            });
        }
        self.projects.insert(project.name().to_string(), project);
        Ok(())
    }

    /// ドキュメント表現に変換
    pub fn to_document(&self) -> ManifestDocument {
        ManifestDocument {
            default_revision: self.default_refspec.clone(),
            default_remote: self.default_remote.clone(),
            remotes: self.remotes.clone(),
            projects: self
                .projects
                .iter()
                .map(|(name, project)| (name.clone(), project.to_document()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> CrepoResult<String> {
        ManifestStore::render_document(&self.to_document(), ManifestFormat::Json)
    }

    pub fn to_yaml(&self) -> CrepoResult<String> {
        ManifestStore::render_document(&self.to_document(), ManifestFormat::Yaml)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn remotes(&self) -> &BTreeMap<String, Remote> {
        &self.remotes
    }

    pub fn remote(&self, name: &str) -> Option<&Remote> {
        self.remotes.get(name)
    }

    pub fn default_remote(&self) -> &str {
        &self.default_remote
    }

    pub fn default_refspec(&self) -> &str {
        &self.default_refspec
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// 名前順の全プロジェクト
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// 名前で選んだプロジェクト（空なら全プロジェクト）
    ///
    /// 未知の名前が一つでもあればエラー
    pub fn select_projects(&self, names: &[String]) -> Result<Vec<&Project>, ConfigError> {
        if names.is_empty() {
            return Ok(self.projects().collect());
        }
        names
            .iter()
            .map(|name| self.project(name).ok_or_unknown_project(name.as_str()))
            .collect()
    }
}
