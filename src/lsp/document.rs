use std::path::Path;

use tower_lsp::lsp_types::Url;

/// State for each open story document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    /// Story ID, taken from the file name
    pub story_id: String,
}

impl DocumentState {
    pub fn new(uri: &Url, content: String) -> Self {
        Self {
            content,
            story_id: story_id_from_uri(uri),
        }
    }

    /// Length of a source line in UTF-16 code units
    pub fn line_len_utf16(&self, line: usize) -> u32 {
        self.content
            .split('\n')
            .nth(line)
            .map(|l| l.trim_end_matches('\r').encode_utf16().count() as u32)
            .unwrap_or(0)
    }
}

/// Story ID for a document: the file name up to its first dot
///
/// `file:///stories/राजा%20और%20रानी.story.txt` yields `राजा और रानी`.
pub fn story_id_from_uri(uri: &Url) -> String {
    uri.to_file_path()
        .map(|path| story_id_from_path(&path))
        .unwrap_or_default()
}

pub fn story_id_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_id_from_file_uri() {
        let uri = Url::from_file_path("/stories/राजा और रानी.story.txt").unwrap();
        assert_eq!(story_id_from_uri(&uri), "राजा और रानी");
    }

    #[test]
    fn test_story_id_from_path() {
        assert_eq!(story_id_from_path(Path::new("कथा.txt")), "कथा");
        assert_eq!(story_id_from_path(Path::new("dir/कथा")), "कथा");
        assert_eq!(story_id_from_path(Path::new("/")), "");
    }

    #[test]
    fn test_story_id_without_file_path() {
        let uri = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(story_id_from_uri(&uri), "");
    }

    #[test]
    fn test_line_len_utf16() {
        let uri = Url::from_file_path("/stories/कथा.txt").unwrap();
        let doc = DocumentState::new(&uri, "कथा\r\n\nab".to_string());
        assert_eq!(doc.line_len_utf16(0), 3);
        assert_eq!(doc.line_len_utf16(1), 0);
        assert_eq!(doc.line_len_utf16(2), 2);
        assert_eq!(doc.line_len_utf16(9), 0);
    }
}
