use super::denylist::BuiltinDenylist;
use super::ignore_rules::IgnoreRuleSet;
use super::{archive_path_for, PackageFile, ARCHIVE_ROOT};
use crate::core::path::{to_slash, MANIFEST_FILE};
use crate::core::VsixResult;
use crate::resolver::DependencyRecord;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default README looked for at the project root
pub const DEFAULT_README: &str = "README.md";

/// Walks a project and produces the files to archive
pub struct FileCollector<'a> {
    root: PathBuf,
    rules: &'a IgnoreRuleSet,
    denylist: BuiltinDenylist,
    readme: String,
}

impl<'a> FileCollector<'a> {
    /// Create a collector. `ignore_files` are the names of the ignore files
    /// in use; they are never packaged themselves.
    pub fn new(
        root: &Path,
        rules: &'a IgnoreRuleSet,
        readme_path: Option<&str>,
        ignore_files: &[&str],
    ) -> VsixResult<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            rules,
            denylist: BuiltinDenylist::new(ignore_files)?,
            readme: readme_path
                .unwrap_or(DEFAULT_README)
                .trim_start_matches("./")
                .to_string(),
        })
    }

    /// Collect project files, then append one entry per bundled dependency.
    ///
    /// The result is sorted by archive path for project files; dependency
    /// entries follow in resolver order. Archive paths may collide; no
    /// de-duplication happens here.
    pub fn collect(&self, dependencies: &[DependencyRecord]) -> VsixResult<Vec<PackageFile>> {
        let mut files: Vec<PackageFile> = self
            .collect_relative()?
            .into_iter()
            .map(|relative| {
                let source = self.root.join(&relative);
                PackageFile::local(archive_path_for(&relative), source)
            })
            .collect();

        for dependency in dependencies {
            files.push(PackageFile::local(
                format!("{}/node_modules/{}", ARCHIVE_ROOT, dependency.name),
                dependency.installed_path.clone(),
            ));
        }

        tracing::debug!(
            "Collected {} file(s) ({} dependency entries) from {}",
            files.len(),
            dependencies.len(),
            self.root.display()
        );

        Ok(files)
    }

    /// Relative, slash-separated paths of every project file that survives
    /// both exclusion layers
    pub fn collect_relative(&self) -> VsixResult<Vec<String>> {
        let mut selected = BTreeSet::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match entry.path().strip_prefix(&self.root) {
                    Ok(relative) => {
                        !self.denylist.excludes_dir(relative) && !self.rules.prunes_dir(relative)
                    }
                    Err(_) => true,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if self.error_is_excluded(&err) => {
                    tracing::debug!("Skipping unreadable excluded path: {}", err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let forced = self.is_forced(relative);
            if !self.is_excluded(relative, forced) {
                selected.insert(to_slash(relative));
            }
        }

        // Forced files may live where the walk never descends
        for forced in [MANIFEST_FILE, self.readme.as_str()] {
            let relative = Path::new(forced);
            if self.root.join(relative).is_file() && !self.is_excluded(relative, true) {
                selected.insert(to_slash(relative));
            }
        }

        Ok(selected.into_iter().collect())
    }

    fn is_forced(&self, relative: &Path) -> bool {
        relative == Path::new(MANIFEST_FILE) || relative == Path::new(&self.readme)
    }

    /// Walk errors only matter for paths that would have been packaged
    fn error_is_excluded(&self, err: &walkdir::Error) -> bool {
        let Some(relative) = err.path().and_then(|p| p.strip_prefix(&self.root).ok()) else {
            return false;
        };
        self.denylist.excludes_dir(relative) || self.is_excluded(relative, self.is_forced(relative))
    }

    /// The one place exclusion precedence lives: the built-in layer is
    /// bypassed for forced files, the user layer never is.
    fn is_excluded(&self, relative: &Path, forced: bool) -> bool {
        let builtin = !forced && self.denylist.excludes_file(relative);
        builtin || self.rules.is_ignored(relative)
    }
}
