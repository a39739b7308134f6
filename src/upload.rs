//! Metadata about files submitted with a request.
//!
//! Persisting uploads is the transport's job; this module only describes
//! what was received and where it ended up.

use crate::parse::{insert, Conflict, KeyPath, Node};

use indexmap::IndexMap;
use mime::Mime;

use std::fmt;
use std::path::{Path, PathBuf};

/// A single uploaded file.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedFile {
    field: String,
    client_filename: Option<String>,
    client_media_type: Option<Mime>,
    size: Option<u64>,
    status: UploadStatus,
}

/// Whether an upload was stored, and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    /// The file was written to the given path.
    Stored(PathBuf),
    /// The upload failed.
    Failed(UploadError),
}

impl UploadedFile {
    /// An upload that was stored at `path`.
    ///
    /// `field` is the form field name exactly as submitted, e.g. `docs[]`.
    pub fn stored(field: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(field.into(), UploadStatus::Stored(path.into()))
    }

    /// An upload that failed with `error`.
    pub fn failed(field: impl Into<String>, error: UploadError) -> Self {
        Self::new(field.into(), UploadStatus::Failed(error))
    }

    fn new(field: String, status: UploadStatus) -> Self {
        Self {
            field,
            client_filename: None,
            client_media_type: None,
            size: None,
            status,
        }
    }

    /// Set the filename sent by the client.
    pub fn client_filename(mut self, name: impl Into<String>) -> Self {
        self.client_filename = Some(name.into());
        self
    }

    /// Set the media type sent by the client.
    pub fn client_media_type(mut self, mime: Mime) -> Self {
        self.client_media_type = Some(mime);
        self
    }

    /// Set the size of the file in bytes.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

impl UploadedFile {
    /// The form field name exactly as submitted.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The filename sent by the client.
    ///
    /// This value is untrusted and should never be used as a path as-is.
    pub fn filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    /// The media type sent by the client. Untrusted.
    pub fn media_type(&self) -> Option<&Mime> {
        self.client_media_type.as_ref()
    }

    /// The size of the file in bytes, if known.
    pub fn file_size(&self) -> Option<u64> {
        self.size
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Where the file was stored, if the upload succeeded.
    pub fn path(&self) -> Option<&Path> {
        match &self.status {
            UploadStatus::Stored(path) => Some(path),
            UploadStatus::Failed(_) => None,
        }
    }

    /// Why the upload failed, if it did.
    pub fn error(&self) -> Option<UploadError> {
        match self.status {
            UploadStatus::Stored(_) => None,
            UploadStatus::Failed(err) => Some(err),
        }
    }
}

/// The reason an upload failed.
///
/// Each variant maps to the numeric code used by CGI-style upload
/// handlers, see [`UploadError::code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum UploadError {
    /// The file exceeds the server's maximum upload size.
    IniSize,
    /// The file exceeds the maximum size declared by the form.
    FormSize,
    /// The file was only partially received.
    Partial,
    /// No file was submitted for the field.
    NoFile,
    /// There is no temporary directory to store the file in.
    NoTmpDir,
    /// Writing the file to disk failed.
    CantWrite,
    /// An extension stopped the upload.
    Extension,
}

impl UploadError {
    /// The numeric upload error code.
    pub fn code(self) -> u8 {
        match self {
            UploadError::IniSize => 1,
            UploadError::FormSize => 2,
            UploadError::Partial => 3,
            UploadError::NoFile => 4,
            UploadError::NoTmpDir => 6,
            UploadError::CantWrite => 7,
            UploadError::Extension => 8,
        }
    }

    /// Convert a numeric upload error code.
    ///
    /// Returns `None` for `0` (success) and unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => UploadError::IniSize,
            2 => UploadError::FormSize,
            3 => UploadError::Partial,
            4 => UploadError::NoFile,
            6 => UploadError::NoTmpDir,
            7 => UploadError::CantWrite,
            8 => UploadError::Extension,
            _ => return None,
        })
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            UploadError::IniSize => "file exceeds the maximum upload size",
            UploadError::FormSize => "file exceeds the maximum size declared by the form",
            UploadError::Partial => "file was only partially uploaded",
            UploadError::NoFile => "no file was uploaded",
            UploadError::NoTmpDir => "missing a temporary directory",
            UploadError::CantWrite => "failed to write file to disk",
            UploadError::Extension => "upload stopped by an extension",
        };

        write!(f, "{}", message)
    }
}

impl std::error::Error for UploadError {}

/// A node of the upload tree.
#[derive(Clone, Debug, PartialEq)]
pub enum FileNode {
    File(UploadedFile),
    Nested(IndexMap<String, FileNode>),
}

impl FileNode {
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FileNode::File(file) => Some(file),
            FileNode::Nested(_) => None,
        }
    }

    /// Index into a nested node.
    pub fn get(&self, key: &str) -> Option<&FileNode> {
        match self {
            FileNode::Nested(children) => children.get(key),
            FileNode::File(_) => None,
        }
    }
}

impl Node for FileNode {
    fn empty() -> Self {
        FileNode::Nested(IndexMap::new())
    }

    fn branch(&mut self) -> &mut IndexMap<String, FileNode> {
        match self {
            FileNode::Nested(children) => children,
            leaf => {
                *leaf = FileNode::empty();
                leaf.branch()
            }
        }
    }

    fn is_branch(&self) -> bool {
        matches!(self, FileNode::Nested(_))
    }
}

/// Every file submitted with a request, keyed by form field.
///
/// Field names use the same bracket notation as query strings, so two
/// files submitted as `docs[]` are available as `docs` → `0` and `docs` → `1`.
///
/// ```
/// use bison_request::upload::{UploadedFile, UploadedFiles};
///
/// let files = UploadedFiles::from_iter([
///     UploadedFile::stored("docs[]", "/tmp/a").client_filename("a.pdf"),
///     UploadedFile::stored("docs[]", "/tmp/b").client_filename("b.pdf"),
/// ]);
///
/// let second = files.get("docs").and_then(|docs| docs.get("1")).and_then(|n| n.as_file());
/// assert_eq!(second.and_then(|f| f.filename()), Some("b.pdf"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadedFiles(IndexMap<String, FileNode>);

impl UploadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FileNode> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileNode)> {
        self.0.iter().map(|(field, node)| (field.as_str(), node))
    }

    /// Iterate over every file in the tree, depth first.
    pub fn files(&self) -> impl Iterator<Item = &UploadedFile> {
        let mut stack: Vec<&FileNode> = self.0.values().rev().collect();

        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    FileNode::File(file) => return Some(file),
                    FileNode::Nested(children) => stack.extend(children.values().rev()),
                }
            }

            None
        })
    }
}

impl FromIterator<UploadedFile> for UploadedFiles {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = UploadedFile>,
    {
        let mut tree = IndexMap::new();

        for file in iter {
            let field = file.field.clone();

            match KeyPath::parse(&field) {
                Some(path) => insert(&mut tree, &path, FileNode::File(file), Conflict::Replace),
                None => tracing::debug!(field = %field, "ignoring upload with an empty field name"),
            }
        }

        UploadedFiles(tree)
    }
}
