use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Lists the authenticated user's tasks.
///
/// Returns the caller's tasks in insertion order as a JSON array; an empty
/// array when the user has none. Other users' tasks are never visible here.
#[get("")]
pub async fn index(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, due_date, user_id, created_at, updated_at
         FROM tasks WHERE user_id = $1
         ORDER BY created_at",
    )
    .bind(user.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// Expects `title`, `status`, and `due_date`, with an optional
/// `description`; answers 201 with the stored task, or 422 when validation
/// fails (including a status outside pending/in_progress/completed).
#[post("/create")]
pub async fn store(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0.id);

    let result = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, due_date, user_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, title, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.due_date)
    .bind(task.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Retrieves one of the authenticated user's tasks by id.
///
/// The lookup is a single statement scoped by both id and owner, so a task
/// owned by someone else is indistinguishable from one that does not exist:
/// both answer 404.
#[get("/{id}")]
pub async fn show(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, due_date, user_id, created_at, updated_at
         FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id.into_inner())
    .bind(user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Partially updates one of the authenticated user's tasks.
///
/// Only the supplied fields change; omitted fields keep their stored
/// values. Ownership scoping and the update happen in one statement, with
/// COALESCE carrying the unchanged columns.
#[put("/{id}")]
pub async fn update(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            status = COALESCE($3, status),
            due_date = COALESCE($4, due_date),
            updated_at = now()
         WHERE id = $5 AND user_id = $6
         RETURNING id, title, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.status)
    .bind(task_data.due_date)
    .bind(task_id.into_inner())
    .bind(user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes one of the authenticated user's tasks.
///
/// Answers 204 with an empty body on success; 404 when the id does not
/// exist for this user.
#[delete("/{id}")]
pub async fn destroy(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id.into_inner())
        .bind(user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
