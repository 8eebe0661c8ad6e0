// src/api/academic.rs

//! Resource clients for the academic-structure families: years, semesters,
//! courses, and subjects.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{
    Course, CourseData, CourseDetails, Semester, SemesterData, Subject, SubjectData, Year,
    YearData,
};

/// Client for `/years` endpoints.
pub struct YearsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> YearsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Year>> {
        self.client.get_data("/years").await
    }

    pub async fn get(&self, id: &str) -> Result<Year> {
        self.client.get_data(&format!("/years/{id}")).await
    }

    pub async fn create(&self, data: &YearData) -> Result<()> {
        self.client.post_unit("/years", data).await
    }

    pub async fn update(&self, id: &str, data: &YearData) -> Result<()> {
        self.client.put_unit(&format!("/years/{id}"), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/years/{id}")).await
    }
}

/// Client for `/semesters` endpoints.
pub struct SemestersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SemestersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Semester>> {
        self.client.get_data("/semesters").await
    }

    pub async fn get(&self, id: &str) -> Result<Semester> {
        self.client.get_data(&format!("/semesters/{id}")).await
    }

    pub async fn create(&self, data: &SemesterData) -> Result<()> {
        self.client.post_unit("/semesters", data).await
    }

    pub async fn update(&self, id: &str, data: &SemesterData) -> Result<()> {
        self.client
            .put_unit(&format!("/semesters/{id}"), data)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/semesters/{id}")).await
    }
}

/// Client for `/courses` endpoints.
pub struct CoursesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CoursesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Course>> {
        self.client.get_data("/courses").await
    }

    /// `GET /courses/:id` returns the nested details payload; this projects
    /// the plain course record out of it.
    pub async fn get(&self, id: &str) -> Result<Course> {
        let details = self.details(id).await?;
        Ok(Course {
            id: details.id,
            name: details.name,
            created_at: details.created_at,
            updated_at: String::new(),
        })
    }

    /// Full nested payload: subjects, years with semesters, and materials.
    pub async fn details(&self, id: &str) -> Result<CourseDetails> {
        self.client.get_data(&format!("/courses/{id}")).await
    }

    pub async fn create(&self, data: &CourseData) -> Result<Course> {
        self.client.post_data("/courses", data).await
    }

    pub async fn update(&self, id: &str, data: &CourseData) -> Result<Course> {
        self.client.put_data(&format!("/courses/{id}"), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/courses/{id}")).await
    }
}

/// Client for `/subjects` endpoints.
pub struct SubjectsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SubjectsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Subject>> {
        self.client.get_data("/subjects").await
    }

    pub async fn get(&self, id: &str) -> Result<Subject> {
        self.client.get_data(&format!("/subjects/{id}")).await
    }

    pub async fn by_course(&self, course_id: &str) -> Result<Vec<Subject>> {
        self.client
            .get_data(&format!("/subjects/course/{course_id}"))
            .await
    }

    pub async fn create(&self, data: &SubjectData) -> Result<Subject> {
        self.client.post_data("/subjects", data).await
    }

    pub async fn update(&self, id: &str, data: &SubjectData) -> Result<Subject> {
        self.client.put_data(&format!("/subjects/{id}"), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/subjects/{id}")).await
    }
}
