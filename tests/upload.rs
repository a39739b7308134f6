use bison_request::upload::{FileNode, UploadError, UploadStatus, UploadedFile, UploadedFiles};

use std::path::Path;

#[test]
fn files_are_keyed_like_query_parameters() {
    let files = UploadedFiles::from_iter([
        UploadedFile::stored("avatar", "/tmp/a")
            .client_filename("me.png")
            .client_media_type(mime::IMAGE_PNG)
            .size(1024),
        UploadedFile::stored("docs[]", "/tmp/b"),
        UploadedFile::failed("docs[]", UploadError::Partial),
        UploadedFile::stored("gallery[summer][]", "/tmp/c"),
    ]);

    let avatar = files.get("avatar").and_then(FileNode::as_file).unwrap();
    assert_eq!(avatar.field(), "avatar");
    assert_eq!(avatar.filename(), Some("me.png"));
    assert_eq!(avatar.media_type(), Some(&mime::IMAGE_PNG));
    assert_eq!(avatar.file_size(), Some(1024));
    assert_eq!(avatar.path(), Some(Path::new("/tmp/a")));
    assert_eq!(avatar.error(), None);

    let docs = files.get("docs").unwrap();
    let first = docs.get("0").and_then(FileNode::as_file).unwrap();
    let second = docs.get("1").and_then(FileNode::as_file).unwrap();
    assert_eq!(first.path(), Some(Path::new("/tmp/b")));
    assert_eq!(second.status(), &UploadStatus::Failed(UploadError::Partial));
    assert_eq!(second.field(), "docs[]");

    let summer = files
        .get("gallery")
        .and_then(|gallery| gallery.get("summer"))
        .and_then(|summer| summer.get("0"))
        .and_then(FileNode::as_file);
    assert!(summer.is_some());

    assert_eq!(files.len(), 3);
    assert_eq!(files.files().count(), 4);
}

#[test]
fn later_files_replace_flat_fields() {
    let files = UploadedFiles::from_iter([
        UploadedFile::stored("doc", "/tmp/old"),
        UploadedFile::stored("doc", "/tmp/new"),
    ]);

    let doc = files.get("doc").and_then(FileNode::as_file).unwrap();
    assert_eq!(doc.path(), Some(Path::new("/tmp/new")));
}

#[test]
fn files_iterates_in_submission_order() {
    let files = UploadedFiles::from_iter([
        UploadedFile::stored("a[]", "/tmp/1"),
        UploadedFile::stored("b", "/tmp/2"),
        UploadedFile::stored("a[]", "/tmp/3"),
    ]);

    let paths: Vec<_> = files.files().filter_map(UploadedFile::path).collect();
    assert_eq!(
        paths,
        [Path::new("/tmp/1"), Path::new("/tmp/3"), Path::new("/tmp/2")]
    );
}

#[test]
fn error_codes() {
    for code in [1, 2, 3, 4, 6, 7, 8] {
        assert_eq!(UploadError::from_code(code).map(UploadError::code), Some(code));
    }

    assert_eq!(UploadError::from_code(0), None);
    assert_eq!(UploadError::from_code(5), None);
    assert_eq!(UploadError::NoFile.to_string(), "no file was uploaded");
}
