//! Directory traversal and per-file rewriting.

use crate::error::{RewriteError, RewriteResult};
use crate::import::ImportPattern;
use gqls_syntax::{convert_with_options, ConvertOptions};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Rewrite options.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Extensions of files whose imports are rewritten.
    pub source_extensions: Vec<String>,
    /// Extension of shorthand files.
    pub shorthand_extension: String,
    /// Extension of generated files.
    pub output_extension: String,
    pub convert: ConvertOptions,
    /// Fail on shorthand with structural errors instead of closing over them.
    pub strict: bool,
    /// Read and convert everything but write nothing.
    pub dry_run: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            source_extensions: vec!["js".to_string(), "jsx".to_string()],
            shorthand_extension: "gql".to_string(),
            output_extension: "graphql".to_string(),
            convert: ConvertOptions::default(),
            strict: false,
            dry_run: false,
        }
    }
}

/// One rewritten import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRewrite {
    /// The source file containing the import.
    pub source: PathBuf,
    pub binding: String,
    /// The shorthand file that was converted.
    pub shorthand: PathBuf,
    /// The generated file the import now points at.
    pub output: PathBuf,
}

/// Summary of a rewrite run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    /// Every file visited, source or not.
    pub files_scanned: usize,
    /// Source files written back.
    pub sources_written: usize,
    pub imports: Vec<ImportRewrite>,
}

/// Sequential import rewriter.
#[derive(Debug)]
pub struct Rewriter {
    options: RewriteOptions,
    pattern: ImportPattern,
    report: RewriteReport,
}

impl Rewriter {
    /// Creates a new rewriter.
    pub fn new(options: RewriteOptions) -> RewriteResult<Self> {
        let pattern = ImportPattern::new(&options.shorthand_extension, &options.output_extension)?;
        Ok(Self {
            options,
            pattern,
            report: RewriteReport::default(),
        })
    }

    /// Consumes the rewriter, returning what it did.
    pub fn finish(self) -> RewriteReport {
        self.report
    }

    /// Returns true if `path` has one of the configured source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.options.source_extensions.iter().any(|e| e == ext))
    }

    /// Recursively rewrites every source file under `dir`, depth-first.
    ///
    /// Symlinks are followed. A symlink cycle is not detected: the walk
    /// descends until the operating system refuses to resolve the path,
    /// which surfaces as [`RewriteError::Io`].
    pub fn visit_dir(&mut self, dir: &Path) -> RewriteResult<()> {
        debug!("Scanning {}", dir.display());

        let mut entries = fs::read_dir(dir)
            .map_err(|e| RewriteError::io(dir, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RewriteError::io(dir, e))?;
        entries.sort();

        for path in entries {
            let metadata = fs::metadata(&path).map_err(|e| RewriteError::io(&path, e))?;
            if metadata.is_dir() {
                self.visit_dir(&path)?;
                continue;
            }

            self.report.files_scanned += 1;
            if self.is_source_file(&path) {
                self.visit_file(&path)?;
            }
        }

        Ok(())
    }

    /// Rewrites the imports of one source file and writes it back.
    ///
    /// The write happens even when nothing matched.
    pub fn visit_file(&mut self, path: &Path) -> RewriteResult<()> {
        debug!("Rewriting {}", path.display());

        let text = fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;
        let rewritten = self.rewrite_source(&text, path)?;

        if !self.options.dry_run {
            fs::write(path, rewritten).map_err(|e| RewriteError::io(path, e))?;
            self.report.sources_written += 1;
        }

        Ok(())
    }

    /// Rewrites the import statements in `text`, generating the referenced
    /// files next to `source`. Returns the new text.
    pub fn rewrite_source(&mut self, text: &str, source: &Path) -> RewriteResult<String> {
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for import in self.pattern.find_iter(text) {
            let shorthand = resolve(dir, import.stem, &self.options.shorthand_extension);
            let generated = resolve(dir, import.stem, &self.options.output_extension);

            self.generate(&shorthand, &generated)?;

            output.push_str(&text[last..import.range.start]);
            output.push_str(&self.pattern.render(&import));
            last = import.range.end;

            self.report.imports.push(ImportRewrite {
                source: source.to_path_buf(),
                binding: import.binding.to_string(),
                shorthand,
                output: generated,
            });
        }

        output.push_str(&text[last..]);
        Ok(output)
    }

    fn generate(&self, shorthand: &Path, generated: &Path) -> RewriteResult<()> {
        let source = fs::read_to_string(shorthand).map_err(|e| RewriteError::io(shorthand, e))?;
        let result = convert_with_options(&source, self.options.convert.clone());

        if self.options.strict && result.diagnostics.has_errors() {
            return Err(RewriteError::Structure {
                path: shorthand.to_path_buf(),
                diagnostics: result.diagnostics,
            });
        }

        if self.options.dry_run {
            debug!("Would generate {}", generated.display());
        } else {
            fs::write(generated, result.output).map_err(|e| RewriteError::io(generated, e))?;
            info!("Generated {}", generated.display());
        }

        Ok(())
    }
}

/// Rewrites every source file under `root`.
///
/// Stops at the first I/O error; files already processed stay rewritten.
pub fn rewrite_dir(root: &Path, options: &RewriteOptions) -> RewriteResult<RewriteReport> {
    let mut rewriter = Rewriter::new(options.clone())?;
    rewriter.visit_dir(root)?;
    Ok(rewriter.finish())
}

/// Rewrites a single source file.
pub fn rewrite_file(path: &Path, options: &RewriteOptions) -> RewriteResult<RewriteReport> {
    let mut rewriter = Rewriter::new(options.clone())?;
    rewriter.report.files_scanned += 1;
    rewriter.visit_file(path)?;
    Ok(rewriter.finish())
}

/// Joins an import stem onto the importing file's directory.
///
/// Root and prefix components are dropped, so `'/q/x'` resolves inside
/// `dir` like `'q/x'`.
fn resolve(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let file = format!("{stem}.{ext}");
    let relative: PathBuf = Path::new(&file)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    dir.join(relative)
}
