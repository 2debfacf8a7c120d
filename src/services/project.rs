//! Project store: list, lookup, create, partial update, and delete.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::project::{MapProject, Project, ProjectInput, ProjectSummary};

/// Every project, in id order.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY projectid")
        .fetch_all(pool)
        .await?;
    Ok(projects)
}

/// Id, title and leader of every project.
pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ProjectSummary>, AppError> {
    let rows = sqlx::query_as::<_, ProjectSummary>(
        "SELECT projectid, title, leader FROM projects ORDER BY projectid",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Projects with both coordinates set, projected for the map.
pub async fn list_located(pool: &PgPool) -> Result<Vec<MapProject>, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE x IS NOT NULL AND y IS NOT NULL ORDER BY projectid",
    )
    .fetch_all(pool)
    .await?;

    Ok(projects.into_iter().filter_map(MapProject::from_project).collect())
}

/// Find a project by ID.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Project, AppError> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE projectid = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

/// Insert a project. The id comes from the table's identity sequence.
pub async fn create(pool: &PgPool, input: &ProjectInput) -> Result<Project, AppError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (title, projectlocation, leader, assistant, members,
            projectdate, duration, projectstatus, link, x, y, sdg, collegecampus)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.projectlocation)
    .bind(&input.leader)
    .bind(&input.assistant)
    .bind(&input.members)
    .bind(&input.projectdate)
    .bind(&input.duration)
    .bind(&input.projectstatus)
    .bind(&input.link)
    .bind(input.x)
    .bind(input.y)
    .bind(&input.sdg)
    .bind(&input.collegecampus)
    .fetch_one(pool)
    .await?;

    tracing::info!(projectid = project.projectid, sdg = ?project.sdg, "Program added");
    Ok(project)
}

/// Update only the supplied fields of a project.
pub async fn update(pool: &PgPool, id: i32, input: &ProjectInput) -> Result<Project, AppError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects SET
            title = COALESCE($2, title),
            projectlocation = COALESCE($3, projectlocation),
            leader = COALESCE($4, leader),
            assistant = COALESCE($5, assistant),
            members = COALESCE($6, members),
            projectdate = COALESCE($7, projectdate),
            duration = COALESCE($8, duration),
            projectstatus = COALESCE($9, projectstatus),
            link = COALESCE($10, link),
            x = COALESCE($11, x),
            y = COALESCE($12, y),
            sdg = COALESCE($13, sdg),
            collegecampus = COALESCE($14, collegecampus)
        WHERE projectid = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.projectlocation)
    .bind(&input.leader)
    .bind(&input.assistant)
    .bind(&input.members)
    .bind(&input.projectdate)
    .bind(&input.duration)
    .bind(&input.projectstatus)
    .bind(&input.link)
    .bind(input.x)
    .bind(input.y)
    .bind(&input.sdg)
    .bind(&input.collegecampus)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("No program found with the given ID".to_string()))?;

    tracing::info!(projectid = id, "Program updated");
    Ok(project)
}

/// Hard-delete a project.
pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE projectid = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(projectid = id, "Program deleted");
    Ok(())
}
