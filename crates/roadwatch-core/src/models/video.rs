//! 업로드할 영상 파일.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// 업로드 1회 동안 컨트롤러가 소유하는 영상 핸들.
///
/// 미리보기 참조는 로컬에서만 유도되며 서버로 전송되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
    source_path: Option<PathBuf>,
}

impl VideoFile {
    /// 로컬 파일에서 읽기
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CoreError::Validation {
                field: "video".to_string(),
                message: format!("파일 이름 없음: {}", path.display()),
            })?
            .to_string();

        let bytes = fs::read(path)?;
        let source_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        Ok(Self {
            mime_type: guess_mime(&file_name),
            file_name,
            bytes,
            source_path: Some(source_path),
        })
    }

    /// 메모리 버퍼로 생성
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            mime_type: guess_mime(&file_name),
            file_name,
            bytes,
            source_path: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 로컬 미리보기 참조.
    ///
    /// 파일에서 읽었으면 `file://` URL, 메모리 버퍼면 `blob:` 참조.
    pub fn preview_url(&self) -> String {
        self.source_path
            .as_deref()
            .filter(|p| p.is_absolute())
            .and_then(|p| url::Url::from_file_path(p).ok())
            .map(|u| u.to_string())
            .unwrap_or_else(|| format!("blob:roadwatch/{}", self.file_name))
    }
}

fn guess_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
