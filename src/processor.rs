//! Template tree rendering.
//! Reproduces a template file or directory at the destination, substituting
//! fields into entry names and file contents. Output is rendered into a hidden
//! staging directory next to the destination and moved into place in one step
//! (see [`commit`]), so a failure never leaves a half-written tree behind.

use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    constants::STAGING_PREFIX,
    error::{Error, Result},
    renderer::{Fields, TemplateRenderer},
};

/// Fails if anything (file, directory or dangling link) exists at `destination`.
///
/// # Errors
/// * `Error::IoError` with kind `AlreadyExists` if the destination exists
pub fn ensure_destination_free<P: AsRef<Path>>(destination: P) -> Result<()> {
    let destination = destination.as_ref();
    if destination.symlink_metadata().is_ok() {
        return Err(Error::io(
            destination,
            io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }
    Ok(())
}

/// Returns false for names that cannot be a single directory entry.
pub fn is_rendered_name_valid(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}

/// Substitutes fields into a template entry name.
///
/// # Errors
/// * `Error::TemplateError` if the rendered name is empty, `.`, `..` or
///   contains a path separator
pub fn render_entry_name(
    name: &str,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<String> {
    let rendered = renderer.render(name, fields);
    if !is_rendered_name_valid(&rendered) {
        return Err(Error::TemplateError(format!(
            "entry '{}' renders to invalid name '{}'",
            name, rendered
        )));
    }
    Ok(rendered)
}

/// Renders each component of `relative`. Names that are not valid UTF-8 have
/// no placeholders to substitute and are kept byte-for-byte.
fn render_relative_path(
    relative: &Path,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<PathBuf> {
    let mut rendered = PathBuf::new();
    for component in relative.components() {
        match component.as_os_str().to_str() {
            Some(name) => rendered.push(render_entry_name(name, fields, renderer)?),
            None => rendered.push(component),
        }
    }
    Ok(rendered)
}

/// Renders one template file to `target`, which must not exist yet.
///
/// UTF-8 content gets fields substituted; anything else is copied as-is.
/// The template's permissions are carried over.
pub fn render_file(
    source: &Path,
    target: &Path,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    let bytes = fs::read(source).map_err(|e| Error::io(source, e))?;
    let output = match String::from_utf8(bytes) {
        Ok(text) => renderer.render(&text, fields).into_bytes(),
        Err(e) => {
            debug!("Copying non-text file: {}", source.display());
            e.into_bytes()
        }
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| Error::io(target, e))?;
    file.write_all(&output).map_err(|e| Error::io(target, e))?;

    let permissions = fs::metadata(source).map_err(|e| Error::io(source, e))?.permissions();
    fs::set_permissions(target, permissions).map_err(|e| Error::io(target, e))
}

/// Renders `template` at `root`. Returns created paths relative to `root`,
/// the root itself being the empty path.
fn render_tree(
    template: &Path,
    root: &Path,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let mut created = vec![PathBuf::new()];

    if !template.is_dir() {
        debug!("Rendering file: {}", template.display());
        render_file(template, root, fields, renderer)?;
        return Ok(created);
    }

    fs::create_dir(root).map_err(|e| Error::io(root, e))?;
    for entry in WalkDir::new(template).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(template).to_path_buf();
            Error::io(path, e.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(template)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let rendered = render_relative_path(relative, fields, renderer)?;
        let target = root.join(&rendered);

        debug!("Processing template entry: {} -> {}", relative.display(), rendered.display());

        if entry.file_type().is_dir() {
            fs::create_dir(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            render_file(entry.path(), &target, fields, renderer)?;
        }
        created.push(rendered);
    }

    Ok(created)
}

/// Moves the staged output to `destination` without replacing anything there.
///
/// A staged file is hard-linked into place, which fails with `AlreadyExists`
/// if the destination appeared in the meantime. A staged directory is renamed
/// after a final existence check; on Unix an empty directory created between
/// that check and the rename would be replaced. Filesystems without hard links
/// fall back to the same check and rename.
///
/// # Errors
/// * `Error::IoError` with kind `AlreadyExists` if the destination exists
pub fn commit<P: AsRef<Path>, Q: AsRef<Path>>(staged: P, destination: Q) -> Result<()> {
    let staged = staged.as_ref();
    let destination = destination.as_ref();

    if !staged.is_dir() {
        match fs::hard_link(staged, destination) {
            Ok(()) => return fs::remove_file(staged).map_err(|e| Error::io(staged, e)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::io(destination, e))
            }
            Err(e) => debug!("Hard link failed ({}), renaming instead", e),
        }
    }

    ensure_destination_free(destination)?;
    fs::rename(staged, destination).map_err(|e| Error::io(destination, e))
}

/// Directories on the way to `dir` that do not exist yet, deepest first.
fn missing_ancestors(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && p.symlink_metadata().is_err())
        .map(Path::to_path_buf)
        .collect()
}

fn remove_new_dirs(dirs: &[PathBuf]) {
    for dir in dirs {
        if let Err(e) = fs::remove_dir(dir) {
            debug!("Leaving directory {}: {}", dir.display(), e);
        }
    }
}

fn stage_and_commit(
    destination: &Path,
    parent: &Path,
    template: &Path,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let file_name = destination.file_name().ok_or_else(|| Error::InvalidDestinationError {
        destination: destination.display().to_string(),
    })?;
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| Error::io(parent, e))?;
    let staged_root = staging.path().join(file_name);
    debug!("Staging output in {}", staging.path().display());

    let created = render_tree(template, &staged_root, fields, renderer)?;
    commit(&staged_root, destination)?;
    if let Err(e) = staging.close() {
        warn!("Failed to remove staging directory: {}", e);
    }

    Ok(created)
}

/// Materializes `template` (a file or a directory) at `destination`.
///
/// Missing parent directories are created; on failure the ones this call
/// created are removed again, along with the staging directory.
///
/// # Arguments
/// * `destination` - Path to create; its name is used literally
/// * `template` - Template file or directory
/// * `fields` - Substitutions for entry names and contents
/// * `renderer` - Placeholder substitution engine
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Every created path, destination first
///
/// # Errors
/// * `Error::IoError` if the destination exists or a filesystem operation fails
/// * `Error::TemplateError` if an entry name renders to an invalid name
pub fn generate_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    template: Q,
    fields: &Fields,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let destination = destination.as_ref();
    let template = template.as_ref();
    ensure_destination_free(destination)?;

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let new_dirs = missing_ancestors(&parent);

    let created = match stage_and_commit(destination, &parent, template, fields, renderer) {
        Ok(created) => created,
        Err(e) => {
            remove_new_dirs(&new_dirs);
            return Err(e);
        }
    };

    let created: Vec<PathBuf> = created
        .into_iter()
        .map(|relative| {
            if relative.as_os_str().is_empty() {
                destination.to_path_buf()
            } else {
                destination.join(relative)
            }
        })
        .collect();
    for path in &created {
        info!("Created: '{}'", path.display());
    }

    Ok(created)
}
