//! Profile documents and request bodies.
//!
//! Requests are validated into the `*Fields` structs before any database
//! work; the handlers never see a partially filled request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::validation::{ListInput, Validator};

/// A profile with its owner, experience and education (newest first)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user: ProfileOwner,
    pub company: String,
    pub website: String,
    pub designation: String,
    pub location: String,
    pub skills: Vec<String>,
    pub bio: String,
    pub github_user_name: String,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner fields shown on a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Social {
    pub youtube: String,
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: String,
}

/// Body of POST and PUT /api/profiles
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub designation: Option<String>,
    pub skills: Option<ListInput>,
    pub bio: Option<String>,
    pub github_user_name: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Validated profile fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub company: String,
    pub website: String,
    pub location: String,
    pub designation: String,
    pub skills: Vec<String>,
    pub bio: String,
    pub github_user_name: String,
    pub social: Social,
}

impl ProfileRequest {
    pub fn validate(self) -> Result<ProfileFields, BackendError> {
        let mut v = Validator::default();
        let fields = ProfileFields {
            company: v.required("company", self.company, "Company is Required"),
            website: v.required("website", self.website, "Website is Required"),
            location: v.required("location", self.location, "Location is Required"),
            designation: v.required("designation", self.designation, "Designation is Required"),
            skills: v.required_list("skills", self.skills, "Skills is Required"),
            bio: v.required("bio", self.bio, "Bio is Required"),
            github_user_name: v.required(
                "githubUserName",
                self.github_user_name,
                "GithubUserName is Required",
            ),
            social: Social {
                youtube: v.required("youtube", self.youtube, "Youtube is Required"),
                facebook: v.required("facebook", self.facebook, "Facebook is Required"),
                twitter: v.required("twitter", self.twitter, "Twitter is Required"),
                linkedin: v.required("linkedin", self.linkedin, "Linkedin is Required"),
                instagram: v.required("instagram", self.instagram, "Instagram is Required"),
            },
        };
        v.finish()?;
        Ok(fields)
    }
}

/// Body of PUT /api/profiles/experience
#[derive(Debug, Default, Deserialize)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: String,
}

impl ExperienceRequest {
    pub fn validate(self) -> Result<ExperienceFields, BackendError> {
        let mut v = Validator::default();
        let fields = ExperienceFields {
            title: v.required("title", self.title, "Title is Required"),
            company: v.required("company", self.company, "Company is Required"),
            location: v.required("location", self.location, "Location is Required"),
            from: v.required("from", self.from, "From is Required"),
            to: self.to.filter(|to| !to.trim().is_empty()),
            current: self.current.unwrap_or(false),
            description: v.required("description", self.description, "Description is Required"),
        };
        v.finish()?;
        Ok(fields)
    }
}

/// Body of PUT /api/profiles/education
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationFields {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: String,
}

impl EducationRequest {
    pub fn validate(self) -> Result<EducationFields, BackendError> {
        let mut v = Validator::default();
        let fields = EducationFields {
            school: v.required("school", self.school, "School is Required"),
            degree: v.required("degree", self.degree, "Degree is Required"),
            field_of_study: v.required("fieldOfStudy", self.field_of_study, "FieldOfStudy is Required"),
            from: v.required("from", self.from, "From is Required"),
            to: self.to.filter(|to| !to.trim().is_empty()),
            current: self.current.unwrap_or(false),
            description: v.required("description", self.description, "Description is Required"),
        };
        v.finish()?;
        Ok(fields)
    }
}

/// `{ "profile": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: Profile,
}

/// `{ "msg": ..., "profile": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileMessageResponse {
    pub msg: String,
    pub profile: Profile,
}

/// `{ "profiles": [...] }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfilesEnvelope {
    pub profiles: Vec<Profile>,
}
