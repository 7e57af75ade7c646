//! Log source backed by libgit2.

use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::{GitError, GitResult, LogSource};

/// A Git repository wrapper rendering its history in the `%at %h %D | %s`
/// log format.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Discovers the repository from the given directory or its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GitError::RepoNotFound(path.to_path_buf()));
        }
        let inner =
            Git2Repo::discover(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Collects the `%D` decorations of every decorated commit.
    ///
    /// Order per commit: `HEAD`, tags, local branches, remote branches, each
    /// group sorted by name.
    fn decorations(&self) -> GitResult<HashMap<Oid, Vec<String>>> {
        let mut tags: Vec<(Oid, String)> = Vec::new();
        let mut branches: Vec<(Oid, String)> = Vec::new();
        let mut remotes: Vec<(Oid, String)> = Vec::new();

        let head = self.inner.head()?;
        let head_branch = if head.is_branch() {
            head.shorthand().map(String::from)
        } else {
            None
        };

        for reference in self.inner.references()? {
            let reference = reference?;
            let (Some(name), Some(short)) = (reference.name(), reference.shorthand()) else {
                continue;
            };
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };
            let oid = commit.id();

            if let Some(tag) = name.strip_prefix("refs/tags/") {
                tags.push((oid, format!("tag: {tag}")));
            } else if name.starts_with("refs/heads/") {
                if head_branch.as_deref() != Some(short) {
                    branches.push((oid, short.to_string()));
                }
            } else if name.starts_with("refs/remotes/") {
                remotes.push((oid, short.to_string()));
            }
        }

        let mut decorations: HashMap<Oid, Vec<String>> = HashMap::new();
        if let Some(target) = head.peel_to_commit().ok().map(|c| c.id()) {
            let label = head_branch.map_or_else(|| "HEAD".to_string(), |b| format!("HEAD -> {b}"));
            decorations.entry(target).or_default().push(label);
        }
        for mut group in [tags, branches, remotes] {
            group.sort_by(|a, b| a.1.cmp(&b.1));
            for (oid, label) in group {
                decorations.entry(oid).or_default().push(label);
            }
        }

        Ok(decorations)
    }
}

impl LogSource for Repository {
    fn read_log(&self) -> GitResult<String> {
        match self.inner.head() {
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                debug!(path = ?self.path(), "repository has no commits");
                return Ok(String::new());
            }
            Err(e) => return Err(e.into()),
            Ok(_) => {}
        }

        let decorations = self.decorations()?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        let mut log = String::new();
        let mut count = 0usize;
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;
            let short_id = commit.as_object().short_id()?;
            let refs = decorations
                .get(&oid)
                .map(|labels| labels.join(", "))
                .unwrap_or_default();

            _ = writeln!(
                log,
                "{} {} {} | {}",
                commit.time().seconds(),
                short_id.as_str().unwrap_or_default(),
                refs,
                commit.summary().unwrap_or_default()
            );
            count += 1;
        }

        debug!(count, path = ?self.path(), "rendered log");
        Ok(log)
    }
}
