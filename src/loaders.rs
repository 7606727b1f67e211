//! SQL storage of the allocation input and output.
//!
//! Expected tables:
//!
//! - `students (id, name, home_lat, home_lon)`
//! - `attendance (student_id, attendance_percentage)`
//! - `rooms (id, room_type, capacity)`
//! - `room_forms (id, student_id, submitted_at)`, `id` auto-incremented, so
//!   increasing with submission. `submitted_at` may be any date or text
//!   column: it is read back as text.
//! - `room_preferences (form_id, position, room_type)`
//! - `allocations (student_id, room_type, room_id, status)`

use crate::model::{
    Allocation, AllocationStatus, AttendanceRecord, PreferenceForm, Room, RoomId, RoomType,
    Student, StudentId,
};
use crate::store::{AllocationStore, AttendanceStore, FormStore, RoomStore, StudentStore};
use eyre::{Error, WrapErr, eyre};
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::trace;

pub struct Loader {
    conn: AnyConnection,
}

impl Loader {
    pub async fn new(s: &str) -> Result<Self, Error> {
        sqlx::any::install_default_drivers();
        Ok(Self {
            conn: AnyConnection::connect_with(&AnyConnectOptions::from_str(s)?)
                .await
                .wrap_err("cannot connect to database")?,
        })
    }

    async fn load_forms(&mut self) -> Result<Vec<(i64, PreferenceForm)>, Error> {
        Ok(
            sqlx::query(
                "SELECT id, student_id, CAST(submitted_at AS CHAR) AS submitted_at \
                 FROM room_forms ORDER BY id",
            )
                .try_map(|row: AnyRow| {
                    Ok((
                        row.try_get::<i64, _>("id")?,
                        PreferenceForm {
                            student_id: StudentId(row.try_get("student_id")?),
                            preferences: Vec::new(),
                            submitted_at: row.try_get("submitted_at")?,
                        },
                    ))
                })
                .fetch_all(&mut self.conn)
                .await?,
        )
    }

    async fn load_preferences(&mut self) -> Result<Vec<(i64, i64, RoomType)>, Error> {
        Ok(
            sqlx::query("SELECT form_id, position, room_type FROM room_preferences")
                .try_map(|row: AnyRow| {
                    Ok((
                        row.try_get::<i64, _>("form_id")?,
                        row.try_get::<i64, _>("position")?,
                        RoomType(row.try_get("room_type")?),
                    ))
                })
                .fetch_all(&mut self.conn)
                .await?,
        )
    }

    #[cfg(all(test, feature = "sqlite"))]
    pub async fn execute(&mut self, sql: &str) -> Result<(), Error> {
        sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        Ok(())
    }
}

impl FormStore for Loader {
    async fn forms(&mut self) -> Result<Vec<PreferenceForm>, Error> {
        let forms = self.load_forms().await.wrap_err("cannot load forms")?;
        let preferences = self
            .load_preferences()
            .await
            .wrap_err("cannot load room preferences")?;
        Ok(forms
            .into_iter()
            .map(|(id, mut form)| {
                let mut prefs = preferences
                    .iter()
                    .filter_map(|(f, p, t)| if *f == id { Some((*p, t)) } else { None })
                    .collect::<Vec<_>>();
                prefs.sort_by_key(|&(p, _)| p);
                form.preferences = prefs.into_iter().map(|(_, t)| t.clone()).collect();
                trace!(
                    student = %form.student_id,
                    preferences = ?form.preferences,
                    "loaded form",
                );
                form
            })
            .collect())
    }

    async fn submit_form(
        &mut self,
        student_id: &StudentId,
        preferences: &[RoomType],
    ) -> Result<PreferenceForm, Error> {
        let mut trans = self.conn.begin().await?;
        let form_id = sqlx::query(
            "INSERT INTO room_forms (student_id, submitted_at) VALUES (?, CURRENT_TIMESTAMP)",
        )
        .bind(student_id.as_str())
        .execute(&mut *trans)
        .await
        .wrap_err("cannot save form")?
        .last_insert_id()
        .ok_or_else(|| eyre!("database did not return the identifier of the new form"))?;
        for (position, room_type) in preferences.iter().enumerate() {
            sqlx::query(
                "INSERT INTO room_preferences (form_id, position, room_type) VALUES (?, ?, ?)",
            )
            .bind(form_id)
            .bind(position as i64)
            .bind(room_type.as_str())
            .execute(&mut *trans)
            .await
            .wrap_err("cannot save room preferences")?;
        }
        let submitted_at = sqlx::query(
            "SELECT CAST(submitted_at AS CHAR) AS submitted_at FROM room_forms WHERE id = ?",
        )
        .bind(form_id)
        .try_map(|row: AnyRow| row.try_get::<String, _>("submitted_at"))
        .fetch_one(&mut *trans)
        .await?;
        trans
            .commit()
            .await
            .wrap_err("error when committing transaction")?;
        Ok(PreferenceForm {
            student_id: student_id.clone(),
            preferences: preferences.to_vec(),
            submitted_at,
        })
    }

    async fn delete_forms(&mut self) -> Result<u64, Error> {
        let mut trans = self.conn.begin().await?;
        sqlx::query("DELETE FROM room_preferences")
            .execute(&mut *trans)
            .await
            .wrap_err("cannot delete room preferences")?;
        let removed = sqlx::query("DELETE FROM room_forms")
            .execute(&mut *trans)
            .await
            .wrap_err("cannot delete forms")?
            .rows_affected();
        trans
            .commit()
            .await
            .wrap_err("error when committing transaction")?;
        Ok(removed)
    }
}

impl StudentStore for Loader {
    async fn student(&mut self, id: &StudentId) -> Result<Option<Student>, Error> {
        Ok(
            sqlx::query("SELECT id, name, home_lat, home_lon FROM students WHERE id = ?")
                .bind(id.as_str())
                .try_map(|row: AnyRow| {
                    Ok(Student::new(
                        StudentId(row.try_get("id")?),
                        row.try_get("name")?,
                        row.try_get("home_lat")?,
                        row.try_get("home_lon")?,
                    ))
                })
                .fetch_optional(&mut self.conn)
                .await?,
        )
    }
}

impl AttendanceStore for Loader {
    async fn attendance(&mut self, id: &StudentId) -> Result<Option<AttendanceRecord>, Error> {
        Ok(sqlx::query(
            "SELECT attendance_percentage FROM attendance WHERE student_id = ?",
        )
        .bind(id.as_str())
        .try_map(|row: AnyRow| {
            Ok(AttendanceRecord {
                attendance_percentage: row.try_get("attendance_percentage")?,
            })
        })
        .fetch_optional(&mut self.conn)
        .await?)
    }
}

impl RoomStore for Loader {
    async fn rooms(&mut self) -> Result<Vec<Room>, Error> {
        Ok(
            sqlx::query("SELECT id, room_type, capacity FROM rooms ORDER BY id")
                .try_map(|row: AnyRow| {
                    Ok(Room {
                        id: RoomId(row.try_get("id")?),
                        room_type: RoomType(row.try_get("room_type")?),
                        capacity: row.try_get("capacity")?,
                    })
                })
                .fetch_all(&mut self.conn)
                .await?,
        )
    }
}

impl AllocationStore for Loader {
    async fn delete_allocations(&mut self) -> Result<u64, Error> {
        Ok(sqlx::query("DELETE FROM allocations")
            .execute(&mut self.conn)
            .await?
            .rows_affected())
    }

    async fn insert_allocation(&mut self, allocation: &Allocation) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO allocations (student_id, room_type, room_id, status) VALUES (?, ?, ?, ?)",
        )
        .bind(allocation.student_id.as_str())
        .bind(allocation.room_type.as_str())
        .bind(allocation.room_id.0.as_str())
        .bind(allocation.status.as_str())
        .execute(&mut self.conn)
        .await?;
        Ok(())
    }

    async fn allocations(&mut self) -> Result<Vec<Allocation>, Error> {
        let rows = sqlx::query(
            "SELECT student_id, room_type, room_id, status FROM allocations ORDER BY student_id",
        )
        .try_map(|row: AnyRow| {
            Ok((
                StudentId(row.try_get("student_id")?),
                RoomType(row.try_get("room_type")?),
                RoomId(row.try_get("room_id")?),
                row.try_get::<String, _>("status")?,
            ))
        })
        .fetch_all(&mut self.conn)
        .await
        .wrap_err("cannot load allocations")?;
        rows.into_iter()
            .map(|(student_id, room_type, room_id, status)| -> Result<_, Error> {
                Ok(Allocation {
                    student_id,
                    room_type,
                    room_id,
                    status: status.parse::<AllocationStatus>()?,
                })
            })
            .collect()
    }
}
