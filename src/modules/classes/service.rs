use std::collections::HashMap;

use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{ClassTeacherView, ClassWithTeachers, CreateClassDto, DanceClass};

const CLASS_COLUMNS: &str = "id, modality, level, class_type, start_date, end_date, schedule, \
                             duration, price, enrollment_fee, status, created_at, updated_at";

pub struct ClassService;

impl ClassService {
    /// Create a class together with its teacher assignments.
    ///
    /// Status is forced to `active` regardless of input. The class row and
    /// its assignment rows are written in one transaction, so a failed
    /// teacher insert leaves no partial class behind.
    #[instrument(skip(db, dto))]
    pub async fn create_class(
        db: &PgPool,
        dto: CreateClassDto,
    ) -> Result<ClassWithTeachers, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let class = sqlx::query_as::<_, DanceClass>(&format!(
            "INSERT INTO classes (modality, level, class_type, start_date, end_date, schedule,
                                  duration, price, enrollment_fee, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active')
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&dto.modality)
        .bind(dto.level)
        .bind(dto.class_type)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(Json(&dto.schedule))
        .bind(dto.duration)
        .bind(dto.price)
        .bind(dto.enrollment_fee)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        for teacher in &dto.teachers {
            sqlx::query(
                "INSERT INTO class_teachers (class_id, teacher_id, commission)
                 VALUES ($1, $2, $3)",
            )
            .bind(class.id)
            .bind(teacher.teacher_id)
            .bind(teacher.commission)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        let teachers = Self::teachers_for_classes(db, &[class.id]).await?;
        let teachers = teachers.into_iter().map(|(_, view)| view).collect();

        Ok(ClassWithTeachers { class, teachers })
    }

    /// All active classes, each enriched with its teacher assignments.
    /// Public read; requires no identity.
    #[instrument(skip(db))]
    pub async fn list_active(db: &PgPool) -> Result<Vec<ClassWithTeachers>, AppError> {
        let classes = sqlx::query_as::<_, DanceClass>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE status = 'active' ORDER BY created_at"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let class_ids: Vec<Uuid> = classes.iter().map(|c| c.id).collect();
        let assignments = Self::teachers_for_classes(db, &class_ids).await?;

        let mut by_class: HashMap<Uuid, Vec<ClassTeacherView>> = HashMap::new();
        for (class_id, view) in assignments {
            by_class.entry(class_id).or_default().push(view);
        }

        let enriched = classes
            .into_iter()
            .map(|class| {
                let teachers = by_class.remove(&class.id).unwrap_or_default();
                ClassWithTeachers { class, teachers }
            })
            .collect();

        Ok(enriched)
    }

    /// A class enriched with its teachers, or `None` when the id does not
    /// resolve. Absence is not a failure.
    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<ClassWithTeachers>, AppError> {
        let class = sqlx::query_as::<_, DanceClass>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(class) = class else {
            return Ok(None);
        };

        let teachers = Self::teachers_for_classes(db, &[class.id]).await?;
        let teachers = teachers.into_iter().map(|(_, view)| view).collect();

        Ok(Some(ClassWithTeachers { class, teachers }))
    }

    /// Teacher assignments for a set of classes, joined to staff names.
    /// A dangling teacher reference yields `teacher_name = None`.
    async fn teachers_for_classes(
        db: &PgPool,
        class_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, ClassTeacherView)>, AppError> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let views = sqlx::query_as::<_, ClassTeacherView>(
            "SELECT ct.id, ct.class_id, ct.teacher_id, ct.commission,
                    s.full_name AS teacher_name
             FROM class_teachers ct
             LEFT JOIN staff s ON s.id = ct.teacher_id
             WHERE ct.class_id = ANY($1)
             ORDER BY ct.class_id",
        )
        .bind(class_ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(views.into_iter().map(|v| (v.class_id, v)).collect())
    }
}
