//! 本地上传存储
//!
//! 文章图片写入 `<public_dir>/upload/<YYYY>/<MM>/<uuid>-<filename>`，
//! 数据库中保存相对于 public_dir 的路径。同名上传互不覆盖。

use crate::{config::StorageConfig, error::AppError};
use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// 上传目录名（相对于 public_dir）
pub const UPLOAD_DIR: &str = "upload";

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// 存储服务
#[derive(Debug, Clone)]
pub struct StorageService {
    public_dir: PathBuf,
}

impl StorageService {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.public_dir)
    }

    /// 上传文件的服务目录
    pub fn upload_root(&self) -> PathBuf {
        self.public_dir.join(UPLOAD_DIR)
    }

    /// 计算存储相对路径：upload/YYYY/MM/<sanitized>
    pub fn relative_path(filename: &str, now: DateTime<Utc>) -> String {
        format!(
            "{}/{:04}/{:02}/{}",
            UPLOAD_DIR,
            now.year(),
            now.month(),
            sanitize_filename(filename)
        )
    }

    /// 保存文件，返回相对路径
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, AppError> {
        let unique = format!("{}-{}", Uuid::new_v4().simple(), sanitize_filename(filename));
        let relative = Self::relative_path(&unique, Utc::now());
        let target = self.public_dir.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(path = %relative, size = bytes.len(), "Upload stored");

        Ok(relative)
    }

    /// 删除已保存的文件（写库失败时回滚）；失败只记录日志
    pub async fn remove(&self, relative: &str) {
        if let Err(e) = tokio::fs::remove_file(self.public_dir.join(relative)).await {
            tracing::warn!(path = %relative, error = %e, "Failed to remove upload");
        }
    }
}

/// 去掉目录部分并替换不安全字符
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned.to_string()
    }
}
