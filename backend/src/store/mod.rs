//! # Student Record Store
//!
//! SQLite-backed table of student records. A connection is opened per
//! operation against the configured database file, so the store itself is
//! just a path and can be cloned freely into request handlers.
//!
//! The `usn` column carries a UNIQUE constraint. A violation is reported as
//! [`StoreError::DuplicateUsn`] and the statement writes nothing.

use common::model::student::{optional, StudentForm, StudentRecord};
use log::info;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SELECT_COLUMNS: &str = "id, name, dob, mother_name, father_name, branch, semester, usn, \
     phone, email, photo_path, sports, blood_group, gender";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("USN must be unique. A student with this USN already exists.")]
    DuplicateUsn,
    #[error("Student not found.")]
    NotFound(i64),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordering of full-table listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentOrder {
    /// Alphabetical by name, as used by selection pages and "generate all".
    Name,
    /// Most recently created first.
    Newest,
}

impl StudentOrder {
    fn sql(self) -> &'static str {
        match self {
            StudentOrder::Name => "name COLLATE NOCASE ASC, id ASC",
            StudentOrder::Newest => "id DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudentStore {
    path: PathBuf,
}

impl StudentStore {
    /// Opens (and if needed creates) the database at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = StudentStore { path: path.into() };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = store.connect()?;
        init_schema(&conn)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Inserts a validated form and returns the new record id.
    pub fn insert(&self, form: &StudentForm, photo_ref: Option<&str>) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO students (name, dob, mother_name, father_name, branch, semester, usn, \
             phone, email, photo_path, sports, blood_group, gender)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                form.name,
                optional(&form.dob),
                optional(&form.mother_name),
                optional(&form.father_name),
                optional(&form.branch),
                optional(&form.semester),
                form.usn,
                form.phone,
                optional(&form.email),
                photo_ref,
                optional(&form.sports),
                optional(&form.blood_group),
                optional(&form.gender),
            ],
        )
        .map_err(map_constraint)?;
        let id = conn.last_insert_rowid();
        info!("Inserted student {} (USN {})", id, form.usn);
        Ok(id)
    }

    /// Replaces the fields of record `id`.
    ///
    /// A `photo_ref` of `None` keeps whatever photo is already stored.
    pub fn update(
        &self,
        id: i64,
        form: &StudentForm,
        photo_ref: Option<&str>,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE students SET name = ?1, dob = ?2, mother_name = ?3, father_name = ?4, \
                 branch = ?5, semester = ?6, usn = ?7, phone = ?8, email = ?9, \
                 photo_path = COALESCE(?10, photo_path), sports = ?11, blood_group = ?12, \
                 gender = ?13
                 WHERE id = ?14",
                params![
                    form.name,
                    optional(&form.dob),
                    optional(&form.mother_name),
                    optional(&form.father_name),
                    optional(&form.branch),
                    optional(&form.semester),
                    form.usn,
                    form.phone,
                    optional(&form.email),
                    photo_ref,
                    optional(&form.sports),
                    optional(&form.blood_group),
                    optional(&form.gender),
                    id,
                ],
            )
            .map_err(map_constraint)?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("Updated student {}", id);
        Ok(())
    }

    /// Deletes record `id`. Deleting a missing record is not an error.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
        info!("Deleted student {} ({} row(s))", id, removed);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<StudentRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM students WHERE id = ?1",
            SELECT_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], read_record)?;
        match rows.next() {
            Some(record) => Ok(Some(record?)),
            None => Ok(None),
        }
    }

    /// Fetches the given ids, returned in the order they were asked for.
    ///
    /// Unknown ids are skipped and repeated ids appear once.
    pub fn select_by_ids(&self, ids: &[i64]) -> Result<Vec<StudentRecord>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.connect()?;
        let placeholders = vec!["?"; ids.len()].join(",");
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM students WHERE id IN ({})",
            SELECT_COLUMNS, placeholders
        ))?;
        let mut by_id: HashMap<i64, StudentRecord> = stmt
            .query_map(params_from_iter(ids.iter()), read_record)?
            .map(|r| r.map(|record| (record.id, record)))
            .collect::<Result<_, _>>()?;

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    pub fn select_all(&self, order: StudentOrder) -> Result<Vec<StudentRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM students ORDER BY {}",
            SELECT_COLUMNS,
            order.sql()
        ))?;
        let records = stmt
            .query_map([], read_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Case-insensitive name search ordered by name. A blank fragment lists everyone.
    pub fn search_by_name(&self, fragment: &str) -> Result<Vec<StudentRecord>, StoreError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return self.select_all(StudentOrder::Name);
        }
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM students WHERE name LIKE ?1 ESCAPE '\\' ORDER BY {}",
            SELECT_COLUMNS,
            StudentOrder::Name.sql()
        ))?;
        let pattern = format!("%{}%", escape_like(fragment));
        let records = stmt
            .query_map(params![pattern], read_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            dob TEXT,
            mother_name TEXT,
            father_name TEXT,
            branch TEXT,
            semester TEXT,
            usn TEXT NOT NULL UNIQUE,
            phone TEXT,
            email TEXT,
            photo_path TEXT,
            sports TEXT,
            blood_group TEXT,
            gender TEXT
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)",
        [],
    )?;
    Ok(())
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<StudentRecord> {
    Ok(StudentRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        dob: row.get(2)?,
        mother_name: row.get(3)?,
        father_name: row.get(4)?,
        branch: row.get(5)?,
        semester: row.get(6)?,
        usn: row.get(7)?,
        phone: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        email: row.get(9)?,
        photo_ref: row.get(10)?,
        sports: row.get(11)?,
        blood_group: row.get(12)?,
        gender: row.get(13)?,
    })
}

/// Turns a UNIQUE violation into `DuplicateUsn`; other errors pass through.
fn map_constraint(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::DuplicateUsn
        }
        _ => StoreError::Sqlite(err),
    }
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
