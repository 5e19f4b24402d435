//! Database operations for profiles
//!
//! A profile row is joined with its owner for `name` and `avatar`;
//! experience and education entries are stored in child tables and
//! attached newest first.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{types::Json, SqlitePool};
use uuid::Uuid;

use crate::backend::profiles::types::{
    Education, EducationFields, Experience, ExperienceFields, Profile, ProfileFields, ProfileOwner,
    Social,
};

const PROFILE_SELECT: &str = r#"
    SELECT p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
           p.company, p.website, p.designation, p.location, p.skills, p.bio,
           p.github_user_name, p.youtube, p.facebook, p.twitter, p.linkedin, p.instagram,
           p.created_at, p.updated_at
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_avatar: String,
    company: String,
    website: String,
    designation: String,
    location: String,
    skills: Json<Vec<String>>,
    bio: String,
    github_user_name: String,
    youtube: String,
    facebook: String,
    twitter: String,
    linkedin: String,
    instagram: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self, experience: Vec<Experience>, education: Vec<Education>) -> Profile {
        Profile {
            id: self.id,
            user: ProfileOwner {
                id: self.user_id,
                name: self.user_name,
                avatar: self.user_avatar,
            },
            company: self.company,
            website: self.website,
            designation: self.designation,
            location: self.location,
            skills: self.skills.0,
            bio: self.bio,
            github_user_name: self.github_user_name,
            social: Social {
                youtube: self.youtube,
                facebook: self.facebook,
                twitter: self.twitter,
                linkedin: self.linkedin,
                instagram: self.instagram,
            },
            experience,
            education,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExperienceRow {
    id: Uuid,
    profile_id: Uuid,
    title: String,
    company: String,
    location: String,
    from_date: String,
    to_date: Option<String>,
    current: bool,
    description: String,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Experience {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            from: row.from_date,
            to: row.to_date,
            current: row.current,
            description: row.description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EducationRow {
    id: Uuid,
    profile_id: Uuid,
    school: String,
    degree: String,
    field_of_study: String,
    from_date: String,
    to_date: Option<String>,
    current: bool,
    description: String,
}

impl From<EducationRow> for Education {
    fn from(row: EducationRow) -> Self {
        Education {
            id: row.id,
            school: row.school,
            degree: row.degree,
            field_of_study: row.field_of_study,
            from: row.from_date,
            to: row.to_date,
            current: row.current,
            description: row.description,
        }
    }
}

async fn fetch_experience(
    pool: &SqlitePool,
    profile_id: Option<Uuid>,
) -> Result<HashMap<Uuid, Vec<Experience>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ExperienceRow>(
        r#"
        SELECT id, profile_id, title, company, location, from_date, to_date, current, description
        FROM profile_experience
        WHERE ?1 IS NULL OR profile_id = ?1
        ORDER BY rowid DESC
        "#,
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Experience>> = HashMap::new();
    for row in rows {
        grouped.entry(row.profile_id).or_default().push(row.into());
    }
    Ok(grouped)
}

async fn fetch_education(
    pool: &SqlitePool,
    profile_id: Option<Uuid>,
) -> Result<HashMap<Uuid, Vec<Education>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EducationRow>(
        r#"
        SELECT id, profile_id, school, degree, field_of_study, from_date, to_date, current, description
        FROM profile_education
        WHERE ?1 IS NULL OR profile_id = ?1
        ORDER BY rowid DESC
        "#,
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Education>> = HashMap::new();
    for row in rows {
        grouped.entry(row.profile_id).or_default().push(row.into());
    }
    Ok(grouped)
}

async fn assemble_one(pool: &SqlitePool, row: Option<ProfileRow>) -> Result<Option<Profile>, sqlx::Error> {
    let Some(row) = row else {
        return Ok(None);
    };
    let mut experience = fetch_experience(pool, Some(row.id)).await?;
    let mut education = fetch_education(pool, Some(row.id)).await?;
    let id = row.id;
    Ok(Some(row.into_profile(
        experience.remove(&id).unwrap_or_default(),
        education.remove(&id).unwrap_or_default(),
    )))
}

pub async fn get_profile_by_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    let sql = format!("{PROFILE_SELECT} WHERE p.user_id = ?");
    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    assemble_one(pool, row).await
}

pub async fn get_profile_by_id(pool: &SqlitePool, profile_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    let sql = format!("{PROFILE_SELECT} WHERE p.id = ?");
    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(profile_id)
        .fetch_optional(pool)
        .await?;
    assemble_one(pool, row).await
}

/// All profiles in creation order
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>, sqlx::Error> {
    let sql = format!("{PROFILE_SELECT} ORDER BY p.rowid");
    let rows = sqlx::query_as::<_, ProfileRow>(&sql).fetch_all(pool).await?;

    let mut experience = fetch_experience(pool, None).await?;
    let mut education = fetch_education(pool, None).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            row.into_profile(
                experience.remove(&id).unwrap_or_default(),
                education.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

/// Insert the profile for `user_id`
///
/// A second profile for the same user fails with a unique-constraint error.
pub async fn create_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO profiles (
            id, user_id, company, website, designation, location, skills, bio,
            github_user_name, youtube, facebook, twitter, linkedin, instagram,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&fields.company)
    .bind(&fields.website)
    .bind(&fields.designation)
    .bind(&fields.location)
    .bind(Json(&fields.skills))
    .bind(&fields.bio)
    .bind(&fields.github_user_name)
    .bind(&fields.social.youtube)
    .bind(&fields.social.facebook)
    .bind(&fields.social.twitter)
    .bind(&fields.social.linkedin)
    .bind(&fields.social.instagram)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Overwrite the profile of `user_id`; `false` when there is none
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET company = ?, website = ?, designation = ?, location = ?, skills = ?, bio = ?,
            github_user_name = ?, youtube = ?, facebook = ?, twitter = ?, linkedin = ?,
            instagram = ?, updated_at = ?
        WHERE user_id = ?
        "#,
    )
    .bind(&fields.company)
    .bind(&fields.website)
    .bind(&fields.designation)
    .bind(&fields.location)
    .bind(Json(&fields.skills))
    .bind(&fields.bio)
    .bind(&fields.github_user_name)
    .bind(&fields.social.youtube)
    .bind(&fields.social.facebook)
    .bind(&fields.social.twitter)
    .bind(&fields.social.linkedin)
    .bind(&fields.social.instagram)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn add_experience(
    pool: &SqlitePool,
    profile_id: Uuid,
    fields: &ExperienceFields,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO profile_experience (id, profile_id, title, company, location, from_date, to_date, current, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(&fields.title)
    .bind(&fields.company)
    .bind(&fields.location)
    .bind(&fields.from)
    .bind(&fields.to)
    .bind(fields.current)
    .bind(&fields.description)
    .execute(&mut *tx)
    .await?;
    touch_profile(&mut tx, profile_id).await?;

    tx.commit().await?;
    Ok(id)
}

/// Delete one experience entry of the profile; `false` when it is not there
pub async fn delete_experience(pool: &SqlitePool, profile_id: Uuid, experience_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM profile_experience WHERE id = ? AND profile_id = ?")
        .bind(experience_id)
        .bind(profile_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed > 0 {
        touch_profile(&mut tx, profile_id).await?;
    }

    tx.commit().await?;
    Ok(removed > 0)
}

pub async fn add_education(
    pool: &SqlitePool,
    profile_id: Uuid,
    fields: &EducationFields,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO profile_education (id, profile_id, school, degree, field_of_study, from_date, to_date, current, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(&fields.school)
    .bind(&fields.degree)
    .bind(&fields.field_of_study)
    .bind(&fields.from)
    .bind(&fields.to)
    .bind(fields.current)
    .bind(&fields.description)
    .execute(&mut *tx)
    .await?;
    touch_profile(&mut tx, profile_id).await?;

    tx.commit().await?;
    Ok(id)
}

pub async fn delete_education(pool: &SqlitePool, profile_id: Uuid, education_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM profile_education WHERE id = ? AND profile_id = ?")
        .bind(education_id)
        .bind(profile_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed > 0 {
        touch_profile(&mut tx, profile_id).await?;
    }

    tx.commit().await?;
    Ok(removed > 0)
}

async fn touch_profile(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>, profile_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(profile_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
