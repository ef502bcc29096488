//! CSV-backed CRUD for the course and student tables
//!
//! Column headers follow the original data files (`CursoID`, `Nombre`,
//! `Descripcion`, ...). Id assignment is append-only: max existing id + 1,
//! starting at 1 on an empty store. Edits rewrite the whole file; datasets
//! are small enough that this stays trivially cheap.

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseRecord {
    #[serde(rename = "CursoID")]
    pub id: u32,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Descripcion")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    #[serde(rename = "EstudianteID")]
    pub id: u32,
    #[serde(rename = "Nombre")]
    pub name: String,
    /// Declared interests as a comma-joined string
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Descripcion")]
    pub description: String,
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RecommenderError::Storage(format!(
            "backing file {} does not exist",
            path.display()
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RecommenderError::validation("name must not be empty"));
    }
    Ok(())
}

pub struct CourseStore {
    path: PathBuf,
}

impl CourseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn register(&self, name: &str, description: &str) -> Result<u32> {
        validate_name(name)?;
        let mut rows = read_rows::<CourseRecord>(&self.path)?;
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(CourseRecord {
            id,
            name: name.to_string(),
            description: description.to_string(),
        });
        write_rows(&self.path, &rows)?;
        info!("Registered course {} ('{}')", id, name);
        Ok(id)
    }

    pub fn edit(&self, id: u32, name: Option<&str>, description: Option<&str>) -> Result<()> {
        require_file(&self.path)?;
        if let Some(name) = name {
            validate_name(name)?;
        }
        let mut rows = read_rows::<CourseRecord>(&self.path)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecommenderError::not_found(format!("course {}", id)))?;
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(description) = description {
            row.description = description.to_string();
        }
        write_rows(&self.path, &rows)
    }

    pub fn get(&self, id: u32) -> Result<CourseRecord> {
        require_file(&self.path)?;
        read_rows::<CourseRecord>(&self.path)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RecommenderError::not_found(format!("course {}", id)))
    }

    pub fn list(&self) -> Result<Vec<CourseRecord>> {
        read_rows(&self.path)
    }
}

pub struct StudentStore {
    path: PathBuf,
}

impl StudentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn register(&self, name: &str, tags: &str, description: &str) -> Result<u32> {
        validate_name(name)?;
        let mut rows = read_rows::<StudentRecord>(&self.path)?;
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(StudentRecord {
            id,
            name: name.to_string(),
            tags: tags.to_string(),
            description: description.to_string(),
        });
        write_rows(&self.path, &rows)?;
        info!("Registered student {} ('{}')", id, name);
        Ok(id)
    }

    pub fn edit(
        &self,
        id: u32,
        name: Option<&str>,
        tags: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        require_file(&self.path)?;
        if let Some(name) = name {
            validate_name(name)?;
        }
        let mut rows = read_rows::<StudentRecord>(&self.path)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecommenderError::not_found(format!("student {}", id)))?;
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(tags) = tags {
            row.tags = tags.to_string();
        }
        if let Some(description) = description {
            row.description = description.to_string();
        }
        write_rows(&self.path, &rows)
    }

    pub fn get(&self, id: u32) -> Result<StudentRecord> {
        require_file(&self.path)?;
        read_rows::<StudentRecord>(&self.path)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RecommenderError::not_found(format!("student {}", id)))
    }

    pub fn list(&self) -> Result<Vec<StudentRecord>> {
        read_rows(&self.path)
    }
}
